//! GRASP driver.
//!
//! # Algorithm
//!
//! 1. Incumbent = empty solution (cost 0)
//! 2. For each iteration `i = 1..=iterations`:
//!    a. Stop if the wall-clock budget is exhausted
//!    b. **Construct** a feasible solution (semi-greedy or greedy)
//!    c. **Local search** it to a local optimum
//!    d. Replace the incumbent if the local optimum is strictly better
//! 3. Return the incumbent
//!
//! # Reference
//!
//! Feo, T. A. & Resende, M. G. C. (1995). "Greedy randomized adaptive search
//! procedures", *Journal of Global Optimization* 6, 109-133.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use u_numflow::random::create_rng;

use super::config::{ConstructionStrategy, GraspConfig};
use super::construct::Constructor;
use super::local_search::LocalSearch;
use super::solution::Solution;
use super::types::KnapsackEvaluator;
use crate::error::Result;

/// Result of a GRASP run.
#[derive(Debug, Clone)]
pub struct GraspResult {
    /// Best solution found (the incumbent).
    pub best: Solution,
    /// Cost of the best solution.
    pub best_cost: f64,
    /// Iterations completed before the iteration count or time budget ran out.
    pub iterations: usize,
    /// Iteration (1-based) that produced the best solution; 0 if the empty
    /// solution was never beaten.
    pub best_iteration: usize,
    /// Incumbent cost after each completed iteration.
    pub cost_history: Vec<f64>,
    /// Local search moves applied across all iterations.
    pub local_search_moves: usize,
    /// Whether the wall-clock budget stopped the run early.
    pub timed_out: bool,
}

/// GRASP runner.
pub struct GraspRunner;

impl GraspRunner {
    /// Runs GRASP on a single thread.
    ///
    /// # Errors
    ///
    /// Returns [`GraspError::InvalidConfig`](crate::GraspError::InvalidConfig)
    /// before any search work if the configuration is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_grasp::grasp::{GraspConfig, GraspRunner};
    /// use u_grasp::qbf::{Inverse, Kqbf};
    ///
    /// let problem = Inverse::new(Kqbf::random(20, 0.4, 1));
    /// let config = GraspConfig::default().with_iterations(20).with_seed(42);
    ///
    /// let result = GraspRunner::run(&problem, &config).unwrap();
    /// assert!(result.best_cost <= 0.0);
    /// println!("best value: {}", problem.original_cost(result.best_cost));
    /// ```
    pub fn run<E: KnapsackEvaluator>(evaluator: &E, config: &GraspConfig) -> Result<GraspResult> {
        config.validate()?;
        let started = Instant::now();
        log_start(evaluator, config, false);

        if config.construction == ConstructionStrategy::Reactive {
            return Ok(reactive_stub(evaluator));
        }

        let universe: Vec<usize> = (0..evaluator.domain_size()).collect();
        let mut rng = create_rng(config.seed.unwrap_or(0));
        let outcome = search(
            evaluator,
            config,
            &universe,
            1..=config.iterations,
            &mut rng,
            started,
        );

        let result = outcome.into_result();
        log_end(&result, started);
        Ok(result)
    }

    /// Runs GRASP iterations on the rayon thread pool.
    ///
    /// Each worker owns its RNG stream (derived from the seed and the worker
    /// index) and its working solution, and runs global iterations
    /// `w, w + workers, ...`. Worker incumbents are merged at the end; ties
    /// go to the earlier iteration. Results are reproducible for a given
    /// seed and thread count.
    #[cfg(feature = "parallel")]
    pub fn run_parallel<E: KnapsackEvaluator>(
        evaluator: &E,
        config: &GraspConfig,
    ) -> Result<GraspResult> {
        use rayon::prelude::*;

        config.validate()?;
        let started = Instant::now();
        log_start(evaluator, config, true);

        if config.construction == ConstructionStrategy::Reactive {
            return Ok(reactive_stub(evaluator));
        }

        let universe: Vec<usize> = (0..evaluator.domain_size()).collect();
        let base_seed = config.seed.unwrap_or(0);
        let workers = rayon::current_num_threads().clamp(1, config.iterations);

        let outcome = (0..workers)
            .into_par_iter()
            .map(|w| {
                let mut rng = create_rng(worker_seed(base_seed, w));
                let iterations = (1 + w..=config.iterations).step_by(workers);
                search(evaluator, config, &universe, iterations, &mut rng, started)
            })
            .reduce_with(Outcome::merge)
            .unwrap_or_else(|| Outcome::new(evaluator.domain_size()));

        let result = outcome.into_result();
        log_end(&result, started);
        Ok(result)
    }
}

/// Incumbent and per-iteration record of one (partial) search.
#[derive(Debug)]
struct Outcome {
    best: Solution,
    best_iteration: usize,
    /// `(iteration, local optimum cost)` for every completed iteration.
    completed: Vec<(usize, f64)>,
    moves: usize,
    timed_out: bool,
}

impl Outcome {
    fn new(domain_size: usize) -> Self {
        Self {
            best: Solution::empty(domain_size),
            best_iteration: 0,
            completed: Vec::new(),
            moves: 0,
            timed_out: false,
        }
    }

    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    fn merge(mut self, mut other: Self) -> Self {
        let other_wins = other.best.cost() < self.best.cost()
            || (other.best.cost() == self.best.cost()
                && other.best_iteration != 0
                && (self.best_iteration == 0 || other.best_iteration < self.best_iteration));
        if other_wins {
            std::mem::swap(&mut self.best, &mut other.best);
            self.best_iteration = other.best_iteration;
        }
        self.completed.append(&mut other.completed);
        self.moves += other.moves;
        self.timed_out |= other.timed_out;
        self
    }

    fn into_result(mut self) -> GraspResult {
        self.completed.sort_by_key(|&(iteration, _)| iteration);
        let mut incumbent = 0.0_f64;
        let cost_history = self
            .completed
            .iter()
            .map(|&(_, cost)| {
                incumbent = incumbent.min(cost);
                incumbent
            })
            .collect();

        GraspResult {
            best_cost: self.best.cost(),
            best: self.best,
            iterations: self.completed.len(),
            best_iteration: self.best_iteration,
            cost_history,
            local_search_moves: self.moves,
            timed_out: self.timed_out,
        }
    }
}

/// Runs the given iterations with one RNG stream and one working solution.
fn search<E, R, I>(
    evaluator: &E,
    config: &GraspConfig,
    universe: &[usize],
    iterations: I,
    rng: &mut R,
    started: Instant,
) -> Outcome
where
    E: KnapsackEvaluator,
    R: rand::Rng,
    I: IntoIterator<Item = usize>,
{
    let budget = Duration::from_secs(config.max_time_secs);
    let constructor = Constructor::new(evaluator, universe, config.alpha);
    let local_search = LocalSearch::new(evaluator, universe, config.improvement_epsilon);
    let mut outcome = Outcome::new(evaluator.domain_size());

    for iteration in iterations {
        if started.elapsed() > budget {
            info!(
                event = "time_limit",
                iteration,
                elapsed_ms = started.elapsed().as_millis() as u64,
            );
            outcome.timed_out = true;
            break;
        }

        let built = constructor.build(config.construction, iteration, rng);
        let improved = local_search.improve(built, config.local_search);
        outcome.moves += improved.moves;

        let cost = improved.solution.cost();
        if cost < outcome.best.cost() {
            outcome.best = improved.solution;
            outcome.best_iteration = iteration;
            debug!(
                event = "new_best",
                iteration,
                cost,
                size = outcome.best.len(),
                used_capacity = outcome.best.used_capacity(),
            );
        }
        outcome.completed.push((iteration, cost));
    }

    outcome
}

#[cfg(feature = "parallel")]
fn worker_seed(base: u64, worker: usize) -> u64 {
    base ^ (worker as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn reactive_stub<E: KnapsackEvaluator>(evaluator: &E) -> GraspResult {
    warn!("reactive GRASP is not implemented, returning the empty solution");
    Outcome::new(evaluator.domain_size()).into_result()
}

fn log_start<E: KnapsackEvaluator>(evaluator: &E, config: &GraspConfig, parallel: bool) {
    info!(
        event = "solve_start",
        domain_size = evaluator.domain_size(),
        capacity = evaluator.capacity(),
        alpha = config.alpha,
        iterations = config.iterations,
        max_time_secs = config.max_time_secs,
        construction = ?config.construction,
        local_search = ?config.local_search,
        parallel,
    );
}

fn log_end(result: &GraspResult, started: Instant) {
    info!(
        event = "solve_end",
        iterations = result.iterations,
        best_iteration = result.best_iteration,
        best_cost = result.best_cost,
        timed_out = result.timed_out,
        duration_ms = started.elapsed().as_millis() as u64,
    );
}
