//! Core trait for GRASP problems.

use super::solution::Solution;

/// Objective and knapsack data for a binary selection problem.
///
/// Implementors describe a domain of `domain_size()` elements, each with a
/// weight, and a capacity that the selected weights may not exceed. The
/// GRASP engines only ever see the problem through this trait.
///
/// # Minimization
///
/// GRASP minimizes. For maximization, report negated values, or wrap the
/// evaluator in [`Inverse`](crate::qbf::Inverse).
///
/// # Consistency
///
/// The three delta methods must agree with [`evaluate`](Self::evaluate):
/// applying a move and re-evaluating must change the value by exactly the
/// reported delta (up to floating-point rounding).
///
/// # Examples
///
/// ```
/// use u_grasp::grasp::{KnapsackEvaluator, Solution};
///
/// /// Linear knapsack: every element is worth -1, no interactions.
/// struct Count { n: usize }
///
/// impl KnapsackEvaluator for Count {
///     fn domain_size(&self) -> usize { self.n }
///     fn weight(&self, _element: usize) -> f64 { 1.0 }
///     fn capacity(&self) -> f64 { 3.0 }
///     fn evaluate(&self, sol: &Solution) -> f64 { -(sol.len() as f64) }
///     fn insertion_delta(&self, e: usize, sol: &Solution) -> f64 {
///         if sol.contains(e) { 0.0 } else { -1.0 }
///     }
///     fn removal_delta(&self, e: usize, sol: &Solution) -> f64 {
///         if sol.contains(e) { 1.0 } else { 0.0 }
///     }
///     fn exchange_delta(&self, _in: usize, _out: usize, _sol: &Solution) -> f64 { 0.0 }
/// }
///
/// let problem = Count { n: 5 };
/// let mut sol = Solution::empty(problem.domain_size());
/// sol.insert(2, &problem);
/// assert_eq!(sol.cost(), -1.0);
/// assert_eq!(sol.used_capacity(), 1.0);
/// ```
pub trait KnapsackEvaluator: Send + Sync {
    /// Number of distinct elements. Element ids are `0..domain_size()`.
    fn domain_size(&self) -> usize;

    /// Weight of an element.
    fn weight(&self, element: usize) -> f64;

    /// Total knapsack capacity.
    fn capacity(&self) -> f64;

    /// Full objective recomputation for the selected elements. Lower is better.
    fn evaluate(&self, solution: &Solution) -> f64;

    /// Cost change from adding `element` (not yet selected).
    fn insertion_delta(&self, element: usize, solution: &Solution) -> f64;

    /// Cost change from removing `element` (currently selected).
    fn removal_delta(&self, element: usize, solution: &Solution) -> f64;

    /// Cost change from removing `outgoing` and adding `incoming` in one move.
    fn exchange_delta(&self, incoming: usize, outgoing: usize, solution: &Solution) -> f64;

    /// Sum of the weights of the selected elements.
    fn used_capacity(&self, solution: &Solution) -> f64 {
        solution.elements().iter().map(|&e| self.weight(e)).sum()
    }
}
