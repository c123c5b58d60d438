//! Tabu Search for quadratic knapsack objectives.
//!
//! A single-solution trajectory metaheuristic that uses a short-term memory
//! (the tabu list) to forbid undoing recently applied moves, preventing
//! cycling and encouraging exploration of new regions of the search space.
//!
//! Each iteration scores three move families against the current solution:
//! single toggles, simple swaps, and (with [`TabuVariant::Probabilistic`])
//! randomly sampled double swaps. With [`Diversification::Active`] the
//! search periodically resets to the best solution and freezes its
//! low-residency members for a while.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod diversify;
mod memory;
mod neighborhood;
mod runner;
mod types;

pub use config::TabuConfig;
pub use memory::TabuMemory;
pub use runner::{TabuResult, TabuRunner};
pub use types::{Diversification, Move, SearchPolicy, TabuVariant};
