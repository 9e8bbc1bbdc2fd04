//! Greedy Randomized Adaptive Search Procedure (GRASP).
//!
//! A multi-start metaheuristic for binary selection problems under a
//! knapsack constraint. Each iteration builds a feasible solution with a
//! randomized greedy construction, then refines it by local search over
//! insertion, removal and exchange moves. The best local optimum across
//! iterations is returned.
//!
//! The problem is supplied through [`KnapsackEvaluator`]; the engines only
//! need full evaluation, the three move deltas, weights and the capacity.
//!
//! # References
//!
//! - Feo, T. A. & Resende, M. G. C. (1995). "Greedy randomized adaptive
//!   search procedures", *Journal of Global Optimization* 6, 109-133.
//! - Resende, M. G. C. & Ribeiro, C. C. (2016). *Optimization by GRASP*,
//!   Springer.

mod candidates;
mod config;
mod construct;
mod local_search;
mod runner;
mod solution;
mod types;

pub use candidates::{candidate_list, restricted_candidate_list};
pub use config::{ConstructionStrategy, GraspConfig, LocalSearchStrategy};
pub use construct::Constructor;
pub use local_search::{Improved, LocalSearch, Move};
pub use runner::{GraspResult, GraspRunner};
pub use solution::Solution;
pub use types::KnapsackEvaluator;
