//! Neighbourhood scan over toggles, swaps and sampled double swaps.
//!
//! Deltas are assembled from the per-variable marginals cached in
//! [`Solution`]. Marginals are computed against the current assignment, so
//! every pair of variables toggled together needs a correction:
//!
//! - insertion `i` with removal `j`: the marginal of `i` counts its
//!   interaction with `j`, which is leaving, so `cost[i][j] + cost[j][i]`
//!   is subtracted;
//! - two insertions `i, h`: neither marginal sees the other, so their
//!   interaction is added back;
//! - two removals `j, l`: both marginals count their interaction, which is
//!   only lost once, so it is added back.

use std::ops::ControlFlow;

use rand::seq::SliceRandom;
use rand::Rng;

use super::memory::TabuMemory;
use super::types::{Move, SearchPolicy, TabuVariant};
use crate::solution::Solution;

/// A scored move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub mv: Move,
    pub delta: i64,
}

/// Per-iteration scan parameters.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScanParams {
    pub policy: SearchPolicy,
    pub variant: TabuVariant,
    pub sample_size: usize,
}

/// Running selection over the admissible candidates of one iteration.
struct Scan<'s> {
    fixed: &'s [bool],
    memory: &'s TabuMemory,
    current_cost: i64,
    best_cost: i64,
    policy: SearchPolicy,
    best: Option<Candidate>,
}

impl Scan<'_> {
    /// Offers a capacity-feasible candidate. Breaks when First-Improvement
    /// accepts it.
    fn offer(&mut self, mv: Move, delta: i64) -> ControlFlow<()> {
        if mv.variables().any(|v| self.fixed[v]) {
            return ControlFlow::Continue(());
        }
        if !self
            .memory
            .admits(&mv, self.current_cost + delta, self.best_cost)
        {
            return ControlFlow::Continue(());
        }
        if self.best.is_none_or(|b| delta > b.delta) {
            self.best = Some(Candidate { mv, delta });
        }
        if self.policy == SearchPolicy::FirstImprovement && delta > 0 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// Picks the move to apply this iteration, or `None` if nothing is
/// admissible.
///
/// Families are scanned in order: single toggles, simple swaps, then (for
/// [`TabuVariant::Probabilistic`]) sampled double swaps. Ties keep the
/// first candidate encountered.
pub(crate) fn select_move<R: Rng>(
    solution: &Solution<'_>,
    fixed: &[bool],
    memory: &TabuMemory,
    best_cost: i64,
    params: ScanParams,
    rng: &mut R,
) -> Option<Candidate> {
    let mut scan = Scan {
        fixed,
        memory,
        current_cost: solution.cost(),
        best_cost,
        policy: params.policy,
        best: None,
    };

    let _ = scan_families(&mut scan, solution, params, rng);
    scan.best
}

fn scan_families<R: Rng>(
    scan: &mut Scan<'_>,
    solution: &Solution<'_>,
    params: ScanParams,
    rng: &mut R,
) -> ControlFlow<()> {
    scan_toggles(scan, solution)?;

    let (ins, outs) = partition_free(solution, scan.fixed);
    scan_swaps(scan, solution, &ins, &outs)?;

    if params.variant == TabuVariant::Probabilistic {
        scan_double_swaps(scan, solution, &ins, &outs, params.sample_size, rng)?;
    }
    ControlFlow::Continue(())
}

/// Unfixed variables split into (in solution, out of solution).
fn partition_free(solution: &Solution<'_>, fixed: &[bool]) -> (Vec<usize>, Vec<usize>) {
    (0..solution.n())
        .filter(|&i| !fixed[i])
        .partition(|&i| solution.is_used(i))
}

fn scan_toggles(scan: &mut Scan<'_>, solution: &Solution<'_>) -> ControlFlow<()> {
    for i in 0..solution.n() {
        if scan.fixed[i] {
            continue;
        }
        if solution.is_used(i) {
            scan.offer(Move::remove(i), -solution.delta(i))?;
        } else if solution.can_add(i) {
            scan.offer(Move::insert(i), solution.delta(i))?;
        }
    }
    ControlFlow::Continue(())
}

fn scan_swaps(
    scan: &mut Scan<'_>,
    solution: &Solution<'_>,
    ins: &[usize],
    outs: &[usize],
) -> ControlFlow<()> {
    let instance = solution.instance();
    let capacity = instance.capacity();

    for &i in outs {
        for &j in ins {
            if solution.weight() + instance.weight(i) - instance.weight(j) > capacity {
                continue;
            }
            scan.offer(Move::swap(i, j), swap_delta(solution, i, j))?;
        }
    }
    ControlFlow::Continue(())
}

fn scan_double_swaps<R: Rng>(
    scan: &mut Scan<'_>,
    solution: &Solution<'_>,
    ins: &[usize],
    outs: &[usize],
    sample_size: usize,
    rng: &mut R,
) -> ControlFlow<()> {
    let ins1 = sample(ins, sample_size, rng);
    let ins2 = sample(ins, sample_size, rng);
    let outs1 = sample(outs, sample_size, rng);
    let outs2 = sample(outs, sample_size, rng);

    let instance = solution.instance();
    let capacity = instance.capacity();

    for &i in &outs1 {
        for &h in outs2.iter().filter(|&&h| h != i) {
            let added = instance.weight(i) + instance.weight(h);
            for &j in &ins1 {
                for &l in ins2.iter().filter(|&&l| l != j) {
                    let removed = instance.weight(j) + instance.weight(l);
                    if solution.weight() + added - removed > capacity {
                        continue;
                    }
                    let delta = double_swap_delta(solution, i, h, j, l);
                    scan.offer(Move::double_swap(i, h, j, l), delta)?;
                }
            }
        }
    }
    ControlFlow::Continue(())
}

/// A random permutation of `pool` truncated to `size`.
fn sample<R: Rng>(pool: &[usize], size: usize, rng: &mut R) -> Vec<usize> {
    let mut drawn = pool.to_vec();
    drawn.shuffle(rng);
    drawn.truncate(size);
    drawn
}

/// Delta of inserting unused `i` and removing used `j`.
pub(crate) fn swap_delta(solution: &Solution<'_>, i: usize, j: usize) -> i64 {
    solution.delta(i) - solution.delta(j) - solution.instance().pair_cost(i, j)
}

/// Delta of inserting unused `i, h` and removing used `j, l`.
pub(crate) fn double_swap_delta(
    solution: &Solution<'_>,
    i: usize,
    h: usize,
    j: usize,
    l: usize,
) -> i64 {
    let inst = solution.instance();
    solution.delta(i) + solution.delta(h) - solution.delta(j) - solution.delta(l)
        - inst.pair_cost(i, j)
        - inst.pair_cost(h, j)
        - inst.pair_cost(i, l)
        - inst.pair_cost(h, l)
        + inst.pair_cost(i, h)
        + inst.pair_cost(j, l)
}

/// Applies `candidate`: removals first, then insertions.
///
/// # Panics
///
/// Panics if the resulting cost differs from `previous cost + delta`, which
/// means the incremental bookkeeping is corrupted.
pub(crate) fn apply_move(solution: &mut Solution<'_>, candidate: &Candidate) {
    let expected = solution.cost() + candidate.delta;
    for j in candidate.mv.removals() {
        solution.remove(j);
    }
    for i in candidate.mv.insertions() {
        solution.add(i);
    }
    assert_eq!(
        solution.cost(),
        expected,
        "incremental cost mismatch after applying {:?}",
        candidate.mv
    );
}
