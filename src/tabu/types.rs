//! Move encoding and search policy enums.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A neighbourhood move: up to two insertions and two removals.
///
/// Moves double as tabu keys, so two moves are equal exactly when their
/// slots are equal. `double_swap(i, h, j, l)` and `double_swap(h, i, j, l)`
/// are distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    ins: [Option<usize>; 2],
    outs: [Option<usize>; 2],
}

impl Move {
    /// Inserts `i`.
    pub fn insert(i: usize) -> Self {
        Self {
            ins: [Some(i), None],
            outs: [None, None],
        }
    }

    /// Removes `j`.
    pub fn remove(j: usize) -> Self {
        Self {
            ins: [None, None],
            outs: [Some(j), None],
        }
    }

    /// Inserts `i` and removes `j`.
    pub fn swap(i: usize, j: usize) -> Self {
        Self {
            ins: [Some(i), None],
            outs: [Some(j), None],
        }
    }

    /// Inserts `i` and `h`, removes `j` and `l`.
    pub fn double_swap(i: usize, h: usize, j: usize, l: usize) -> Self {
        Self {
            ins: [Some(i), Some(h)],
            outs: [Some(j), Some(l)],
        }
    }

    /// The move that exactly undoes `self`.
    pub fn reverse(&self) -> Self {
        Self {
            ins: self.outs,
            outs: self.ins,
        }
    }

    /// Variables inserted by this move.
    pub fn insertions(&self) -> impl Iterator<Item = usize> + '_ {
        self.ins.iter().flatten().copied()
    }

    /// Variables removed by this move.
    pub fn removals(&self) -> impl Iterator<Item = usize> + '_ {
        self.outs.iter().flatten().copied()
    }

    /// Every variable the move touches.
    pub fn variables(&self) -> impl Iterator<Item = usize> + '_ {
        self.insertions().chain(self.removals())
    }
}

/// How a neighbourhood scan picks its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SearchPolicy {
    /// Scan every admissible candidate and take the best delta.
    #[default]
    BestImprovement,
    /// Take the first admissible candidate with a positive delta.
    FirstImprovement,
}

/// Which move families the scan evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TabuVariant {
    /// Single toggles and simple swaps.
    #[default]
    Standard,
    /// Also samples randomized double swaps.
    Probabilistic,
}

/// Whether the reset/freeze/thaw cycle runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Diversification {
    /// The neighbourhood scan alone drives every iteration.
    #[default]
    Plain,
    /// Periodically reset to the best solution and freeze variables.
    Active,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_reverse_swaps_roles() {
        let mv = Move::double_swap(1, 2, 3, 4);
        let rev = mv.reverse();
        assert_eq!(rev.insertions().collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(rev.removals().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(rev.reverse(), mv);
    }

    #[test]
    fn test_insert_reverses_to_remove() {
        assert_eq!(Move::insert(5).reverse(), Move::remove(5));
        assert_eq!(Move::swap(1, 2).reverse(), Move::swap(2, 1));
    }

    #[test]
    fn test_slot_order_matters_for_keys() {
        let mut set = HashSet::new();
        set.insert(Move::double_swap(1, 2, 3, 4));
        assert!(!set.contains(&Move::double_swap(2, 1, 3, 4)));
        assert!(set.contains(&Move::double_swap(1, 2, 3, 4)));
    }

    #[test]
    fn test_variables() {
        assert_eq!(Move::swap(7, 0).variables().collect::<Vec<_>>(), vec![7, 0]);
        assert_eq!(Move::remove(3).variables().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_enum_defaults() {
        assert_eq!(SearchPolicy::default(), SearchPolicy::BestImprovement);
        assert_eq!(TabuVariant::default(), TabuVariant::Standard);
        assert_eq!(Diversification::default(), Diversification::Plain);
    }
}
