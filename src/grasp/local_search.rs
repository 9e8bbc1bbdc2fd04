//! Local search over insertion, removal and exchange neighborhoods.
//!
//! Each round recomputes the candidate list, looks for an improving move
//! and applies it. The search ends at the first round without one, so the
//! result is a local optimum for all three neighborhoods.

use tracing::trace;

use super::candidates::candidate_list;
use super::config::LocalSearchStrategy;
use super::solution::Solution;
use super::types::KnapsackEvaluator;

/// A single neighborhood move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Add a candidate-list element.
    Insert(usize),
    /// Drop a selected element.
    Remove(usize),
    /// Drop `outgoing` and add `incoming` atomically.
    Exchange {
        /// Element entering the selection.
        incoming: usize,
        /// Element leaving the selection.
        outgoing: usize,
    },
}

impl Move {
    /// Cost change of this move against `solution`.
    pub fn delta<E: KnapsackEvaluator>(&self, solution: &Solution, evaluator: &E) -> f64 {
        match *self {
            Move::Insert(e) => evaluator.insertion_delta(e, solution),
            Move::Remove(e) => evaluator.removal_delta(e, solution),
            Move::Exchange { incoming, outgoing } => {
                evaluator.exchange_delta(incoming, outgoing, solution)
            }
        }
    }

    /// Applies this move; the solution's caches are refreshed in full.
    pub fn apply<E: KnapsackEvaluator>(&self, solution: &mut Solution, evaluator: &E) {
        match *self {
            Move::Insert(e) => solution.insert(e, evaluator),
            Move::Remove(e) => solution.remove(e, evaluator),
            Move::Exchange { incoming, outgoing } => {
                solution.exchange(incoming, outgoing, evaluator)
            }
        }
    }
}

/// Outcome of a local search run.
#[derive(Debug, Clone)]
pub struct Improved {
    /// The locally optimal solution.
    pub solution: Solution,
    /// Number of moves applied.
    pub moves: usize,
}

/// Neighborhood descent engine.
#[derive(Debug)]
pub struct LocalSearch<'a, E> {
    evaluator: &'a E,
    universe: &'a [usize],
    epsilon: f64,
}

impl<'a, E: KnapsackEvaluator> LocalSearch<'a, E> {
    /// Creates a local search over `universe`. A move counts as improving
    /// only when its delta is below `-epsilon`.
    pub fn new(evaluator: &'a E, universe: &'a [usize], epsilon: f64) -> Self {
        Self {
            evaluator,
            universe,
            epsilon,
        }
    }

    /// Descends from a feasible `solution` to a local optimum.
    pub fn improve(&self, mut solution: Solution, strategy: LocalSearchStrategy) -> Improved {
        let mut moves = 0;
        loop {
            let candidates = candidate_list(self.universe, &solution, self.evaluator);
            let found = match strategy {
                LocalSearchStrategy::BestImproving => self.best_move(&candidates, &solution),
                LocalSearchStrategy::FirstImproving => self.first_move(&candidates, &solution),
            };
            let Some((mv, delta)) = found.filter(|&(_, d)| self.improves(d)) else {
                break;
            };
            mv.apply(&mut solution, self.evaluator);
            moves += 1;
            trace!(event = "move", ?mv, delta, cost = solution.cost());
        }
        Improved { solution, moves }
    }

    /// Lowest-delta move over all three neighborhoods, improving or not.
    ///
    /// Ties keep the first move found, scanning insertions, removals, then
    /// exchanges.
    pub fn best_move(&self, candidates: &[usize], solution: &Solution) -> Option<(Move, f64)> {
        self.neighborhood(candidates, solution)
            .map(|mv| (mv, mv.delta(solution, self.evaluator)))
            .fold(None, |best: Option<(Move, f64)>, (mv, d)| match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((mv, d)),
            })
    }

    /// First improving move, scanning insertions, removals, then exchanges.
    pub fn first_move(&self, candidates: &[usize], solution: &Solution) -> Option<(Move, f64)> {
        self.neighborhood(candidates, solution)
            .map(|mv| (mv, mv.delta(solution, self.evaluator)))
            .find(|&(_, d)| self.improves(d))
    }

    /// Whether no single move improves `solution`.
    pub fn is_local_optimum(&self, solution: &Solution) -> bool {
        let candidates = candidate_list(self.universe, solution, self.evaluator);
        self.first_move(&candidates, solution).is_none()
    }

    fn improves(&self, delta: f64) -> bool {
        delta < -self.epsilon
    }

    /// All moves in scan order: insertions, removals, then exchanges with
    /// the candidate list as the outer loop.
    fn neighborhood<'s>(
        &self,
        candidates: &'s [usize],
        solution: &'s Solution,
    ) -> impl Iterator<Item = Move> + 's {
        let inserts = candidates.iter().map(|&e| Move::Insert(e));
        let removes = solution.elements().iter().map(|&e| Move::Remove(e));
        let exchanges = candidates.iter().flat_map(move |&incoming| {
            solution
                .elements()
                .iter()
                .map(move |&outgoing| Move::Exchange { incoming, outgoing })
        });
        inserts.chain(removes).chain(exchanges)
    }
}
