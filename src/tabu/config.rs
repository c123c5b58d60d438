//! Tabu Search configuration.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::{Diversification, SearchPolicy, TabuVariant};
use crate::error::ConfigError;

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use qbf_tabu::tabu::{SearchPolicy, TabuConfig, TabuVariant};
///
/// let config = TabuConfig::default()
///     .with_max_iterations(10_000)
///     .with_time_limit(Duration::from_secs(5))
///     .with_policy(SearchPolicy::FirstImprovement)
///     .with_variant(TabuVariant::Probabilistic)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.reset_countdown(), 1_000);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TabuConfig {
    /// Move selection policy.
    pub policy: SearchPolicy,
    /// Whether randomized double swaps are sampled.
    pub variant: TabuVariant,
    /// Whether the reset/freeze/thaw cycle runs.
    pub diversification: Diversification,
    /// Wall-clock budget. Zero stops before the first iteration.
    pub time_limit: Duration,
    /// Iteration budget.
    pub max_iterations: usize,
    /// Maximum number of reverse moves held in tabu memory.
    pub tabu_capacity: usize,
    /// C1: the reset countdown starts at `max_iterations / reset_divisor`.
    pub reset_divisor: usize,
    /// C2: iterations between a reset and the thaw of all locks.
    pub unfix_period: usize,
    /// Per-side truncation of the double-swap permutations.
    pub sample_size: usize,
    /// Seed for the double-swap sampler.
    pub seed: u64,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            policy: SearchPolicy::default(),
            variant: TabuVariant::default(),
            diversification: Diversification::default(),
            time_limit: Duration::from_secs(10),
            max_iterations: 10_000,
            tabu_capacity: 10,
            reset_divisor: 10,
            unfix_period: 30,
            sample_size: 10,
            seed: 0,
        }
    }
}

impl TabuConfig {
    /// Sets the move selection policy.
    pub fn with_policy(mut self, policy: SearchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the tabu variant (whether double swaps are sampled).
    pub fn with_variant(mut self, variant: TabuVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Enables or disables the reset/freeze/thaw cycle.
    pub fn with_diversification(mut self, diversification: Diversification) -> Self {
        self.diversification = diversification;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the tabu memory capacity (how many reverse moves stay forbidden).
    pub fn with_tabu_capacity(mut self, capacity: usize) -> Self {
        self.tabu_capacity = capacity;
        self
    }

    /// Sets C1, the divisor of `max_iterations` giving the reset period.
    pub fn with_reset_divisor(mut self, c1: usize) -> Self {
        self.reset_divisor = c1;
        self
    }

    /// Sets C2, the number of iterations a freeze lasts after each reset.
    pub fn with_unfix_period(mut self, c2: usize) -> Self {
        self.unfix_period = c2;
        self
    }

    /// Sets how many variables per side the double-swap sampler keeps.
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = size;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Initial value of the reset countdown.
    ///
    /// Zero when `reset_divisor` is zero; [`validate`](Self::validate)
    /// rejects that case.
    pub fn reset_countdown(&self) -> usize {
        self.max_iterations
            .checked_div(self.reset_divisor)
            .unwrap_or(0)
    }

    /// Validates the configuration.
    ///
    /// The countdown ordering is enforced in every diversification mode.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.reset_divisor == 0 {
            return Err(ConfigError::ZeroResetDivisor);
        }
        if self.unfix_period == 0 {
            return Err(ConfigError::ZeroUnfixPeriod);
        }
        if self.sample_size == 0 {
            return Err(ConfigError::ZeroSampleSize);
        }
        let reset = self.reset_countdown();
        if reset < 2 * self.unfix_period {
            return Err(ConfigError::CountdownOrder {
                reset,
                unfix: self.unfix_period,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabu_config_defaults() {
        let config = TabuConfig::default();
        assert_eq!(config.policy, SearchPolicy::BestImprovement);
        assert_eq!(config.variant, TabuVariant::Standard);
        assert_eq!(config.diversification, Diversification::Plain);
        assert_eq!(config.reset_divisor, 10);
        assert_eq!(config.unfix_period, 30);
        assert_eq!(config.sample_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tabu_config_builder() {
        let config = TabuConfig::default()
            .with_max_iterations(1000)
            .with_tabu_capacity(4)
            .with_reset_divisor(5)
            .with_unfix_period(20)
            .with_sample_size(3)
            .with_diversification(Diversification::Active)
            .with_time_limit(Duration::from_millis(250))
            .with_seed(123);

        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.tabu_capacity, 4);
        assert_eq!(config.reset_countdown(), 200);
        assert_eq!(config.sample_size, 3);
        assert_eq!(config.diversification, Diversification::Active);
        assert_eq!(config.time_limit, Duration::from_millis(250));
        assert_eq!(config.seed, 123);
    }

    #[test]
    fn test_validate_countdown_order() {
        let config = TabuConfig::default()
            .with_max_iterations(100)
            .with_reset_divisor(10)
            .with_unfix_period(30);
        assert_eq!(
            config.validate(),
            Err(ConfigError::CountdownOrder {
                reset: 10,
                unfix: 30
            })
        );
    }

    #[test]
    fn test_validate_countdown_boundary() {
        let config = TabuConfig::default()
            .with_max_iterations(600)
            .with_reset_divisor(10)
            .with_unfix_period(30);
        assert!(config.validate().is_ok());
        assert!(config.with_max_iterations(599).validate().is_err());
    }

    #[test]
    fn test_validate_zero_budgets() {
        assert_eq!(
            TabuConfig::default().with_max_iterations(0).validate(),
            Err(ConfigError::ZeroIterations)
        );
        assert_eq!(
            TabuConfig::default().with_reset_divisor(0).validate(),
            Err(ConfigError::ZeroResetDivisor)
        );
        assert_eq!(
            TabuConfig::default().with_unfix_period(0).validate(),
            Err(ConfigError::ZeroUnfixPeriod)
        );
        assert_eq!(
            TabuConfig::default().with_sample_size(0).validate(),
            Err(ConfigError::ZeroSampleSize)
        );
    }

    #[test]
    fn test_zero_time_limit_is_valid() {
        let config = TabuConfig::default().with_time_limit(Duration::ZERO);
        assert!(config.validate().is_ok());
    }
}
