//! Tabu search for quadratic binary objectives under a knapsack constraint.
//!
//! Given `n` binary variables with weights, a capacity `W` and a pairwise
//! cost matrix, the search maximizes
//!
//! ```text
//! Σ_i Σ_j cost[i][j] · x_i · x_j    subject to    Σ_i weight[i] · x_i ≤ W
//! ```
//!
//! starting from a feasible [`Solution`] supplied by the caller.
//!
//! - [`Instance`]: immutable problem data, shared by reference across runs.
//! - [`Solution`]: assignment with incremental weight, objective and
//!   per-variable marginals.
//! - [`tabu`]: the search engine (move scan, tabu memory, diversification).
//!
//! # Architecture
//!
//! The crate performs no I/O. Instance loading, initial construction and
//! reporting belong to consumers. Progress is emitted as `tracing` events;
//! install a subscriber to see them.

pub mod error;
pub mod instance;
pub mod solution;
pub mod tabu;

pub use error::{ConfigError, InstanceError};
pub use instance::Instance;
pub use solution::Solution;
