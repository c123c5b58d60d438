//! Short-term tabu memory.

use std::collections::{HashSet, VecDeque};

use super::types::Move;

/// Bounded FIFO of forbidden moves with O(1) membership.
///
/// Applying a move records its reverse, forbidding the undo until the entry
/// ages out of the window.
#[derive(Debug, Clone)]
pub struct TabuMemory {
    capacity: usize,
    queue: VecDeque<Move>,
    set: HashSet<Move>,
}

impl TabuMemory {
    /// Creates an empty memory holding at most `capacity` moves.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queue: VecDeque::new(),
            set: HashSet::new(),
        }
    }

    /// Whether `mv` is currently forbidden.
    #[inline]
    pub fn is_tabu(&self, mv: &Move) -> bool {
        self.set.contains(mv)
    }

    /// Whether `mv` may be applied. A tabu move still qualifies when the
    /// resulting cost strictly beats `best_cost` (aspiration).
    #[inline]
    pub fn admits(&self, mv: &Move, resulting_cost: i64, best_cost: i64) -> bool {
        !self.is_tabu(mv) || resulting_cost > best_cost
    }

    /// Forbids undoing `applied`. Evicts the oldest entry when over capacity.
    /// A reverse move already held is left where it is.
    pub fn record(&mut self, applied: &Move) {
        let reverse = applied.reverse();
        if self.set.insert(reverse) {
            self.queue.push_back(reverse);
            if self.queue.len() > self.capacity {
                if let Some(oldest) = self.queue.pop_front() {
                    self.set.remove(&oldest);
                }
            }
        }
        assert_eq!(
            self.queue.len(),
            self.set.len(),
            "tabu queue and set out of sync"
        );
    }

    /// Number of forbidden moves held.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no move is forbidden.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Maximum number of forbidden moves held at once.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
