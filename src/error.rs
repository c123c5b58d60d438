//! Error types for instance and configuration construction.
//!
//! Only construction-time problems are recoverable. Once a search runs,
//! internal consistency violations abort the run.

use thiserror::Error;

/// Rejected [`TabuConfig`](crate::tabu::TabuConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The iteration budget is zero.
    #[error("max_iterations must be positive")]
    ZeroIterations,

    /// The reset divisor (C1) is zero.
    #[error("reset_divisor must be positive")]
    ZeroResetDivisor,

    /// The unfix period (C2) is zero, which would thaw every lock on the
    /// same tick it is set.
    #[error("unfix_period must be positive")]
    ZeroUnfixPeriod,

    /// The double-swap sample size is zero.
    #[error("sample_size must be positive")]
    ZeroSampleSize,

    /// A full thaw would not complete before the next reset.
    #[error(
        "reset countdown {reset} must be at least twice the unfix countdown {unfix} \
         (max_iterations / reset_divisor >= 2 * unfix_period)"
    )]
    CountdownOrder {
        /// Initial reset countdown (`max_iterations / reset_divisor`).
        reset: usize,
        /// Initial unfix countdown.
        unfix: usize,
    },
}

/// Rejected [`Instance`](crate::Instance) or initial
/// [`Solution`](crate::Solution).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    /// The cost matrix does not match the number of weights.
    #[error("cost matrix must be {expected}x{expected}, row {row} has {found} entries")]
    Dimension {
        /// Number of variables.
        expected: usize,
        /// Offending row (or `expected` when the row count is wrong).
        row: usize,
        /// Length found.
        found: usize,
    },

    /// A weight or the capacity is negative.
    #[error("negative weight {value} at {index:?}")]
    NegativeWeight {
        /// Variable index, `None` for the capacity itself.
        index: Option<usize>,
        /// The offending value.
        value: i64,
    },

    /// An assignment has the wrong length.
    #[error("assignment has {found} entries, instance has {expected} variables")]
    AssignmentLength {
        /// Number of variables.
        expected: usize,
        /// Length found.
        found: usize,
    },

    /// An assignment exceeds the capacity.
    #[error("assignment weight {weight} exceeds capacity {capacity}")]
    Infeasible {
        /// Total weight of the assignment.
        weight: i64,
        /// Instance capacity.
        capacity: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_message_names_both_values() {
        let err = ConfigError::CountdownOrder { reset: 10, unfix: 30 };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("30"));
    }

    #[test]
    fn test_capacity_error_has_no_index() {
        let err = InstanceError::NegativeWeight {
            index: None,
            value: -3,
        };
        assert!(err.to_string().contains("None"));
    }
}
