//! Constructive phase.
//!
//! # Algorithm (semi-greedy)
//!
//! 1. Start from the empty solution
//! 2. Recompute the candidate list against the current solution
//! 3. Score every candidate by its insertion delta
//! 4. Keep candidates with `delta <= min + alpha * (max - min)` (the RCL)
//! 5. Insert one RCL member chosen uniformly at random
//! 6. Repeat while the last insertion strictly reduced the cost
//!
//! The greedy variant replaces steps 4 and 5 with "insert the candidate of
//! lowest delta".

use rand::Rng;
use tracing::{debug, warn};

use super::candidates::{candidate_list, restricted_candidate_list, score_insertions};
use super::config::ConstructionStrategy;
use super::solution::Solution;
use super::types::KnapsackEvaluator;

/// Builds feasible solutions from scratch.
#[derive(Debug)]
pub struct Constructor<'a, E> {
    evaluator: &'a E,
    universe: &'a [usize],
    alpha: f64,
}

impl<'a, E: KnapsackEvaluator> Constructor<'a, E> {
    /// Creates a constructor over `universe` (all element ids, in scan order).
    pub fn new(evaluator: &'a E, universe: &'a [usize], alpha: f64) -> Self {
        Self {
            evaluator,
            universe,
            alpha,
        }
    }

    /// Builds one solution.
    ///
    /// `iteration` is the 1-based GRASP iteration number; only
    /// [`ConstructionStrategy::RandomPlusGreedy`] looks at it.
    pub fn build<R: Rng>(
        &self,
        strategy: ConstructionStrategy,
        iteration: usize,
        rng: &mut R,
    ) -> Solution {
        match strategy {
            ConstructionStrategy::Standard => self.semi_greedy(rng),
            ConstructionStrategy::RandomPlusGreedy { greedy_after } => {
                if iteration > greedy_after {
                    if iteration == greedy_after + 1 {
                        debug!(event = "greedy_phase_start", iteration);
                    }
                    self.greedy()
                } else {
                    self.semi_greedy(rng)
                }
            }
            ConstructionStrategy::Reactive => {
                warn!("reactive GRASP is not implemented, returning the empty solution");
                Solution::empty(self.evaluator.domain_size())
            }
        }
    }

    /// Randomized construction from the alpha-restricted candidate list.
    pub fn semi_greedy<R: Rng>(&self, rng: &mut R) -> Solution {
        self.grow(|scored| {
            let rcl = restricted_candidate_list(scored, self.alpha);
            if rcl.is_empty() {
                None
            } else {
                Some(rcl[rng.random_range(0..rcl.len())])
            }
        })
    }

    /// Deterministic construction: always insert the best candidate.
    ///
    /// Ties go to the earliest candidate in universe order.
    pub fn greedy(&self) -> Solution {
        self.grow(|scored| {
            scored
                .iter()
                .fold(None, |best: Option<(usize, f64)>, &(e, d)| match best {
                    Some((_, bd)) if bd <= d => best,
                    _ => Some((e, d)),
                })
                .map(|(e, _)| e)
        })
    }

    /// Shared insertion loop. `choose` picks the next element from the
    /// scored candidate list, or `None` when nothing should be inserted.
    fn grow<F>(&self, mut choose: F) -> Solution
    where
        F: FnMut(&[(usize, f64)]) -> Option<usize>,
    {
        let mut solution = Solution::empty(self.evaluator.domain_size());
        let mut previous = f64::INFINITY;

        while previous > solution.cost() {
            previous = solution.cost();
            let candidates = candidate_list(self.universe, &solution, self.evaluator);
            let scored = score_insertions(&candidates, &solution, self.evaluator);
            if let Some(element) = choose(&scored) {
                solution.insert(element, self.evaluator);
            }
        }

        solution
    }
}
