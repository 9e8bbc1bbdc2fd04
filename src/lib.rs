//! GRASP metaheuristic for knapsack-constrained quadratic binary
//! optimization.
//!
//! - **GRASP**: multi-start construction + local search with an
//!   alpha-restricted candidate list, semi-greedy or random-plus-greedy
//!   construction, and first- or best-improving local search over
//!   insertion, removal and exchange moves.
//! - **QBF**: a reference knapsack quadratic binary function and a
//!   sign-inverting adapter for maximization problems.
//!
//! # Architecture
//!
//! The engines are generic over [`grasp::KnapsackEvaluator`] and contain no
//! instance I/O. Randomness comes from an explicit, seeded generator owned
//! by each run; logging goes through `tracing` and no subscriber is
//! installed here.

pub mod error;
pub mod grasp;
pub mod qbf;

pub use error::{GraspError, Result};
