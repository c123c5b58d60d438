//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Clone the initial solution into `current` and `best`
//! 2. At each iteration:
//!    a. Update residency counters, stop if the time or iteration budget is spent
//!    b. Tick the diversification cycle (reset to best and freeze, or thaw)
//!    c. Scan the neighbourhood and apply the best admissible move
//!    d. Forbid its reverse and update `best` if strictly improved
//! 3. Return `best`
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use super::config::TabuConfig;
use super::diversify::{freeze, Diversifier};
use super::memory::TabuMemory;
use super::neighborhood::{apply_move, select_move, ScanParams};
use super::types::Diversification;
use crate::error::ConfigError;
use crate::solution::Solution;

/// Upper bound on the up-front `cost_history` allocation.
const HISTORY_PREALLOC: usize = 1 << 20;

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult<'a> {
    /// Best solution found.
    pub best: Solution<'a>,
    /// Objective value of the best solution.
    pub best_cost: i64,
    /// Iterations executed.
    pub iterations: usize,
    /// Iteration after which the best solution was found (0 if never improved).
    pub best_iteration: usize,
    /// Wall-clock time spent.
    pub elapsed: Duration,
    /// Best cost after each iteration.
    pub cost_history: Vec<i64>,
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Improves `initial` under `config`. Higher objective values are better.
    ///
    /// The configuration is validated before the first iteration.
    ///
    /// # Panics
    ///
    /// Panics if the search state becomes inconsistent or if an iteration
    /// finds no admissible move (e.g. every variable is fixed, or the tabu
    /// capacity is too large for the instance).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use qbf_tabu::tabu::{TabuConfig, TabuRunner};
    /// use qbf_tabu::{Instance, Solution};
    ///
    /// let instance = Instance::from_values(5, vec![2, 2, 3, 1], vec![3, 3, 4, 2]).unwrap();
    /// let config = TabuConfig::default()
    ///     .with_max_iterations(1_000)
    ///     .with_time_limit(Duration::from_secs(1))
    ///     .with_tabu_capacity(2);
    ///
    /// let result = TabuRunner::run(&Solution::empty(&instance), &config).unwrap();
    /// assert!(result.best.weight() <= instance.capacity());
    /// ```
    pub fn run<'a>(
        initial: &Solution<'a>,
        config: &TabuConfig,
    ) -> Result<TabuResult<'a>, ConfigError> {
        config.validate()?;
        Ok(Search::new(initial, config).run())
    }
}

/// State owned by one run.
struct Search<'a, 'c> {
    config: &'c TabuConfig,
    current: Solution<'a>,
    best: Solution<'a>,
    memory: TabuMemory,
    fixed: Vec<bool>,
    residency: Vec<usize>,
    diversifier: Option<Diversifier>,
    rng: ChaCha8Rng,
    iterations: usize,
    best_iteration: usize,
}

impl<'a, 'c> Search<'a, 'c> {
    fn new(initial: &Solution<'a>, config: &'c TabuConfig) -> Self {
        let n = initial.n();
        let diversifier = match config.diversification {
            Diversification::Plain => None,
            Diversification::Active => Some(Diversifier::new(config)),
        };
        Self {
            config,
            current: initial.clone(),
            best: initial.clone(),
            memory: TabuMemory::new(config.tabu_capacity),
            fixed: vec![false; n],
            residency: vec![0; n],
            diversifier,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            iterations: 0,
            best_iteration: 0,
        }
    }

    fn run(mut self) -> TabuResult<'a> {
        let start = Instant::now();
        let mut cost_history =
            Vec::with_capacity(self.config.max_iterations.min(HISTORY_PREALLOC));

        info!(
            event = "search_start",
            variables = self.current.n(),
            initial_cost = self.current.cost(),
            max_iterations = self.config.max_iterations,
            tabu_capacity = self.memory.capacity(),
            time_limit_ms = self.config.time_limit.as_millis() as u64,
        );

        loop {
            self.update_residency();

            if start.elapsed() >= self.config.time_limit
                || self.iterations >= self.config.max_iterations
            {
                break;
            }

            self.diversify();
            self.step();
            self.iterations += 1;
            cost_history.push(self.best.cost());
        }

        let elapsed = start.elapsed();
        info!(
            event = "search_end",
            iterations = self.iterations,
            best_cost = self.best.cost(),
            best_iteration = self.best_iteration,
            duration_ms = elapsed.as_millis() as u64,
        );

        TabuResult {
            best_cost: self.best.cost(),
            best: self.best,
            iterations: self.iterations,
            best_iteration: self.best_iteration,
            elapsed,
            cost_history,
        }
    }

    fn update_residency(&mut self) {
        for (i, count) in self.residency.iter_mut().enumerate() {
            if self.current.is_used(i) {
                *count += 1;
            } else {
                *count = 0;
            }
        }
    }

    fn diversify(&mut self) {
        let Some(diversifier) = self.diversifier.as_mut() else {
            return;
        };
        let tick = diversifier.tick();

        if tick.reset {
            self.current = self.best.clone();
            let frozen = freeze(&self.current, &self.residency, &mut self.fixed);
            debug!(
                event = "diversify_reset",
                iteration = self.iterations,
                cost = self.current.cost(),
                frozen,
            );
        }
        if tick.thaw {
            self.fixed.fill(false);
            debug!(event = "diversify_thaw", iteration = self.iterations);
        }
    }

    /// Applies exactly one admissible move.
    fn step(&mut self) {
        let params = ScanParams {
            policy: self.config.policy,
            variant: self.config.variant,
            sample_size: self.config.sample_size,
        };
        let best_cost = self.best.cost();
        let Some(candidate) = select_move(
            &self.current,
            &self.fixed,
            &self.memory,
            best_cost,
            params,
            &mut self.rng,
        ) else {
            panic!(
                "no admissible move at iteration {}: {} of {} variables fixed, {} of {} tabu entries",
                self.iterations,
                self.fixed.iter().filter(|&&f| f).count(),
                self.fixed.len(),
                self.memory.len(),
                self.memory.capacity(),
            );
        };

        apply_move(&mut self.current, &candidate);
        assert!(
            !self.memory.is_tabu(&candidate.mv) || self.current.cost() > best_cost,
            "tabu move {:?} applied without aspiration",
            candidate.mv
        );
        self.memory.record(&candidate.mv);

        if self.current.cost() > best_cost {
            self.best = self.current.clone();
            self.best_iteration = self.iterations + 1;
            trace!(
                event = "new_best",
                iteration = self.iterations,
                cost = self.best.cost(),
            );
        }
    }
}
