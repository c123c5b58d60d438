//! Reset, freeze and thaw cycle.
//!
//! Every `max_iterations / C1` iterations the working solution jumps back to
//! the best one and its low-residency members are locked. `C2` iterations
//! after each reset every lock is cleared again. Validation guarantees the
//! thaw lands strictly before the next reset.

use crate::solution::Solution;

use super::config::TabuConfig;

/// What a [`Diversifier::tick`] asks the search loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Tick {
    pub reset: bool,
    pub thaw: bool,
}

/// Countdown state machine. Counters are signed: after firing, the unfix
/// countdown keeps falling below zero until the next reset rearms it.
#[derive(Debug, Clone)]
pub(crate) struct Diversifier {
    reset_period: i64,
    unfix_period: i64,
    reset_countdown: i64,
    unfix_countdown: i64,
}

impl Diversifier {
    pub fn new(config: &TabuConfig) -> Self {
        let reset_period = config.reset_countdown() as i64;
        let unfix_period = config.unfix_period as i64;
        Self {
            reset_period,
            unfix_period,
            reset_countdown: reset_period,
            unfix_countdown: unfix_period,
        }
    }

    /// Advances one iteration. Both countdowns decrement unconditionally,
    /// including on the tick they fire.
    pub fn tick(&mut self) -> Tick {
        let mut tick = Tick::default();
        if self.reset_countdown == 0 {
            tick.reset = true;
            self.reset_countdown = self.reset_period;
            self.unfix_countdown = self.unfix_period;
        }
        if self.unfix_countdown == 0 {
            tick.thaw = true;
        }
        self.reset_countdown -= 1;
        self.unfix_countdown -= 1;
        tick
    }
}

/// Residency at or below which a selected variable is frozen:
/// `ceil(0.1 × max residency)`.
pub(crate) fn freeze_threshold(residency: &[usize]) -> usize {
    let max = residency.iter().copied().max().unwrap_or(0);
    (max as f64 * 0.1).ceil() as usize
}

/// Locks every selected variable whose residency is at or below the
/// threshold. Returns how many variables were locked.
pub(crate) fn freeze(solution: &Solution<'_>, residency: &[usize], fixed: &mut [bool]) -> usize {
    let threshold = freeze_threshold(residency);
    let mut frozen = 0;
    for i in solution.selected() {
        if residency[i] <= threshold {
            fixed[i] = true;
            frozen += 1;
        }
    }
    frozen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;

    fn ticks(config: &TabuConfig, count: usize) -> Vec<Tick> {
        let mut div = Diversifier::new(config);
        (0..count).map(|_| div.tick()).collect()
    }

    #[test]
    fn test_reset_fires_every_period() {
        let config = TabuConfig::default()
            .with_max_iterations(100)
            .with_reset_divisor(10)
            .with_unfix_period(3);
        let resets: Vec<usize> = ticks(&config, 45)
            .iter()
            .enumerate()
            .filter_map(|(k, t)| t.reset.then_some(k))
            .collect();
        assert_eq!(resets, vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_thaw_follows_each_reset() {
        let config = TabuConfig::default()
            .with_max_iterations(100)
            .with_reset_divisor(10)
            .with_unfix_period(3);
        let thaws: Vec<usize> = ticks(&config, 25)
            .iter()
            .enumerate()
            .filter_map(|(k, t)| t.thaw.then_some(k))
            .collect();
        assert_eq!(thaws, vec![3, 13, 23]);
    }

    #[test]
    fn test_freeze_threshold_rounds_up() {
        assert_eq!(freeze_threshold(&[0, 0]), 0);
        assert_eq!(freeze_threshold(&[10, 3]), 1);
        assert_eq!(freeze_threshold(&[11, 3]), 2);
        assert_eq!(freeze_threshold(&[]), 0);
    }

    #[test]
    fn test_freeze_locks_low_residency_members_only() {
        let inst = Instance::from_values(10, vec![1; 4], vec![1; 4]).unwrap();
        let sol = Solution::from_assignment(&inst, vec![true, true, false, true]).unwrap();
        // threshold = ceil(2.0) = 2
        let residency = [20, 2, 0, 1];
        let mut fixed = [false; 4];
        let frozen = freeze(&sol, &residency, &mut fixed);
        assert_eq!(frozen, 2);
        assert_eq!(fixed, [false, true, false, true]);
    }
}
