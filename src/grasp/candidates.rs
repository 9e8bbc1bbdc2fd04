//! Candidate list (CL) and restricted candidate list (RCL).

use super::solution::Solution;
use super::types::KnapsackEvaluator;

/// Elements that may enter `solution`: not selected, and light enough for
/// the remaining capacity.
///
/// Always recomputed from the full `universe`, never patched, so it tracks
/// the current free capacity exactly. Candidate order follows `universe`.
pub fn candidate_list<E: KnapsackEvaluator>(
    universe: &[usize],
    solution: &Solution,
    evaluator: &E,
) -> Vec<usize> {
    let free = solution.free_capacity(evaluator);
    universe
        .iter()
        .copied()
        .filter(|&e| !solution.contains(e) && evaluator.weight(e) <= free)
        .collect()
}

/// Candidates whose insertion delta lies within `alpha` of the best.
///
/// `scored` pairs each candidate with its insertion delta. A candidate is
/// kept when `delta <= min + alpha * (max - min)`.
pub fn restricted_candidate_list(scored: &[(usize, f64)], alpha: f64) -> Vec<usize> {
    let (min, max) = scored
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, d)| {
            (lo.min(d), hi.max(d))
        });
    let threshold = min + alpha * (max - min);
    scored
        .iter()
        .filter(|&&(_, d)| d <= threshold)
        .map(|&(e, _)| e)
        .collect()
}

/// Pairs each candidate with its insertion delta against `solution`.
pub(crate) fn score_insertions<E: KnapsackEvaluator>(
    candidates: &[usize],
    solution: &Solution,
    evaluator: &E,
) -> Vec<(usize, f64)> {
    candidates
        .iter()
        .map(|&e| (e, evaluator.insertion_delta(e, solution)))
        .collect()
}
