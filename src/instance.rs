//! Problem instance: weights, capacity and the pairwise cost matrix.
//!
//! The objective of an assignment `x` is `Σ_i Σ_j cost[i][j] · x_i · x_j`
//! over ordered pairs. The matrix is not assumed symmetric, so `cost[i][j]`
//! and `cost[j][i]` both contribute when `i` and `j` are selected together.

use crate::error::InstanceError;

/// Immutable quadratic knapsack instance.
///
/// # Examples
///
/// ```
/// use qbf_tabu::Instance;
///
/// let instance = Instance::from_values(5, vec![2, 2, 3, 1], vec![3, 3, 4, 2])
///     .unwrap()
///     .with_cost(0, 1, 1)
///     .with_cost(1, 0, 1);
/// assert_eq!(instance.n(), 4);
/// assert_eq!(instance.objective(&[true, true, false, false]), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    n: usize,
    capacity: i64,
    weights: Vec<i64>,
    /// Row-major `n × n`.
    costs: Vec<i64>,
}

impl Instance {
    /// Builds an instance from a square cost matrix given as rows.
    pub fn new(
        capacity: i64,
        weights: Vec<i64>,
        costs: Vec<Vec<i64>>,
    ) -> Result<Self, InstanceError> {
        let n = weights.len();
        if capacity < 0 {
            return Err(InstanceError::NegativeWeight {
                index: None,
                value: capacity,
            });
        }
        if let Some((i, &w)) = weights.iter().enumerate().find(|&(_, &w)| w < 0) {
            return Err(InstanceError::NegativeWeight {
                index: Some(i),
                value: w,
            });
        }
        if costs.len() != n {
            return Err(InstanceError::Dimension {
                expected: n,
                row: n,
                found: costs.len(),
            });
        }

        let mut flat = Vec::with_capacity(n * n);
        for (row, values) in costs.into_iter().enumerate() {
            if values.len() != n {
                return Err(InstanceError::Dimension {
                    expected: n,
                    row,
                    found: values.len(),
                });
            }
            flat.extend(values);
        }

        Ok(Self {
            n,
            capacity,
            weights,
            costs: flat,
        })
    }

    /// Builds an instance with `values[i]` on the diagonal and no cross terms.
    pub fn from_values(
        capacity: i64,
        weights: Vec<i64>,
        values: Vec<i64>,
    ) -> Result<Self, InstanceError> {
        let n = weights.len();
        if values.len() != n {
            return Err(InstanceError::Dimension {
                expected: n,
                row: 0,
                found: values.len(),
            });
        }
        let costs = (0..n)
            .map(|i| {
                let mut row = vec![0; n];
                row[i] = values[i];
                row
            })
            .collect();
        Self::new(capacity, weights, costs)
    }

    /// Sets `cost[i][j]`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of range.
    pub fn with_cost(mut self, i: usize, j: usize, cost: i64) -> Self {
        assert!(i < self.n && j < self.n, "cost index ({i}, {j}) out of range");
        self.costs[i * self.n + j] = cost;
        self
    }

    /// Number of decision variables.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Knapsack capacity `W`.
    #[inline]
    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    #[inline]
    pub fn weight(&self, i: usize) -> i64 {
        self.weights[i]
    }

    /// `cost[i][j]`.
    #[inline]
    pub fn cost(&self, i: usize, j: usize) -> i64 {
        self.costs[i * self.n + j]
    }

    /// `cost[i][j] + cost[j][i]`, the interaction paid once per unordered pair.
    #[inline]
    pub fn pair_cost(&self, i: usize, j: usize) -> i64 {
        self.cost(i, j) + self.cost(j, i)
    }

    /// Objective of `used`, recomputed from scratch.
    pub fn objective(&self, used: &[bool]) -> i64 {
        let selected: Vec<usize> = (0..self.n).filter(|&i| used[i]).collect();
        selected
            .iter()
            .flat_map(|&i| selected.iter().map(move |&j| (i, j)))
            .map(|(i, j)| self.cost(i, j))
            .sum()
    }

    /// Total weight of `used`.
    pub fn total_weight(&self, used: &[bool]) -> i64 {
        (0..self.n).filter(|&i| used[i]).map(|i| self.weights[i]).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Instance {
        Instance::from_values(5, vec![2, 2, 3, 1], vec![3, 3, 4, 2])
            .unwrap()
            .with_cost(0, 1, 1)
            .with_cost(1, 0, 1)
    }

    #[test]
    fn test_objective_counts_both_orderings() {
        let inst = scenario();
        assert_eq!(inst.objective(&[true, true, false, false]), 3 + 3 + 1 + 1);
        assert_eq!(inst.objective(&[true, false, true, false]), 7);
        assert_eq!(inst.objective(&[false; 4]), 0);
    }

    #[test]
    fn test_asymmetric_costs() {
        let inst = Instance::from_values(10, vec![1, 1], vec![0, 0])
            .unwrap()
            .with_cost(0, 1, 5)
            .with_cost(1, 0, -2);
        assert_eq!(inst.pair_cost(0, 1), 3);
        assert_eq!(inst.objective(&[true, true]), 3);
    }

    #[test]
    fn test_total_weight() {
        let inst = scenario();
        assert_eq!(inst.total_weight(&[true, false, true, true]), 6);
    }

    #[test]
    fn test_rejects_ragged_matrix() {
        let err = Instance::new(5, vec![1, 1], vec![vec![0, 0], vec![0]]).unwrap_err();
        assert_eq!(
            err,
            InstanceError::Dimension {
                expected: 2,
                row: 1,
                found: 1
            }
        );
    }

    #[test]
    fn test_rejects_negative_weight() {
        let err = Instance::from_values(5, vec![1, -1], vec![0, 0]).unwrap_err();
        assert!(matches!(
            err,
            InstanceError::NegativeWeight { index: Some(1), .. }
        ));
        assert!(Instance::from_values(-1, vec![1], vec![0]).is_err());
    }

    #[test]
    #[should_panic]
    fn test_with_cost_out_of_range() {
        let _ = scenario().with_cost(4, 0, 1);
    }
}
