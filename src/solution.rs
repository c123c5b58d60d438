//! Mutable assignment with incrementally maintained weight and objective.

use crate::error::InstanceError;
use crate::instance::Instance;

/// A binary assignment over an [`Instance`].
///
/// Besides `weight` and `cost`, the solution caches for every variable `k`
/// its marginal value
///
/// ```text
/// gain[k] = cost[k][k] + Σ_{j used, j ≠ k} (cost[k][j] + cost[j][k])
/// ```
///
/// which is what inserting `k` adds to the objective when `k` is unused and
/// what removing it subtracts when `k` is used. [`add`](Self::add) and
/// [`remove`](Self::remove) refresh the cache in O(n).
#[derive(Debug, Clone)]
pub struct Solution<'a> {
    instance: &'a Instance,
    used: Vec<bool>,
    gain: Vec<i64>,
    weight: i64,
    cost: i64,
}

impl<'a> Solution<'a> {
    /// The empty assignment. Always feasible.
    pub fn empty(instance: &'a Instance) -> Self {
        let n = instance.n();
        Self {
            instance,
            used: vec![false; n],
            gain: (0..n).map(|k| instance.cost(k, k)).collect(),
            weight: 0,
            cost: 0,
        }
    }

    /// Builds a solution from an explicit assignment.
    pub fn from_assignment(instance: &'a Instance, used: Vec<bool>) -> Result<Self, InstanceError> {
        if used.len() != instance.n() {
            return Err(InstanceError::AssignmentLength {
                expected: instance.n(),
                found: used.len(),
            });
        }
        let weight = instance.total_weight(&used);
        if weight > instance.capacity() {
            return Err(InstanceError::Infeasible {
                weight,
                capacity: instance.capacity(),
            });
        }

        let mut solution = Self::empty(instance);
        for i in (0..used.len()).filter(|&i| used[i]) {
            solution.add(i);
        }
        Ok(solution)
    }

    #[inline]
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.used.len()
    }

    #[inline]
    pub fn is_used(&self, i: usize) -> bool {
        self.used[i]
    }

    #[inline]
    pub fn used(&self) -> &[bool] {
        &self.used
    }

    /// Indices of the selected variables, ascending.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.used
            .iter()
            .enumerate()
            .filter_map(|(i, &u)| u.then_some(i))
    }

    #[inline]
    pub fn weight(&self) -> i64 {
        self.weight
    }

    /// Current objective value.
    #[inline]
    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Whether inserting `i` keeps the weight within capacity.
    #[inline]
    pub fn can_add(&self, i: usize) -> bool {
        self.weight + self.instance.weight(i) <= self.instance.capacity()
    }

    /// Marginal value of toggling `i`: the gain of inserting it if unused,
    /// the loss of removing it if used. Callers negate it for removals.
    #[inline]
    pub fn delta(&self, i: usize) -> i64 {
        self.gain[i]
    }

    /// Inserts `i`. Capacity is not checked here.
    ///
    /// # Panics
    ///
    /// Panics if `i` is already used.
    pub fn add(&mut self, i: usize) {
        assert!(!self.used[i], "variable {i} is already in the solution");
        self.cost += self.gain[i];
        self.weight += self.instance.weight(i);
        self.used[i] = true;
        self.shift_gains(i, 1);
    }

    /// Removes `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not used.
    pub fn remove(&mut self, i: usize) {
        assert!(self.used[i], "variable {i} is not in the solution");
        self.cost -= self.gain[i];
        self.weight -= self.instance.weight(i);
        self.used[i] = false;
        self.shift_gains(i, -1);
    }

    fn shift_gains(&mut self, i: usize, sign: i64) {
        for k in (0..self.gain.len()).filter(|&k| k != i) {
            self.gain[k] += sign * self.instance.pair_cost(k, i);
        }
    }
}
