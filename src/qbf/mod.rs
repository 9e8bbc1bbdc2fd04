//! Quadratic binary functions under a knapsack constraint.
//!
//! [`Kqbf`] is an in-memory KQBF instance reporting values in the
//! maximization sense; [`Inverse`] negates any evaluator so it can be
//! minimized by [`GraspRunner`](crate::grasp::GraspRunner).
//!
//! # Objective
//!
//! ```text
//! max  f(x) = Σ_i Σ_j x_i · A_ij · x_j
//! s.t. Σ_i w_i · x_i ≤ W,   x ∈ {0, 1}^n
//! ```

mod inverse;
mod kqbf;

pub use inverse::Inverse;
pub use kqbf::Kqbf;
