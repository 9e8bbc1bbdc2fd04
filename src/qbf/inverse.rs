//! Sign-inverting evaluator adapter.

use crate::grasp::{KnapsackEvaluator, Solution};

/// Wraps an evaluator and negates every value it reports.
///
/// GRASP minimizes; a maximization objective such as [`Kqbf`](super::Kqbf)
/// becomes a minimization objective under this adapter. Weights and
/// capacity pass through unchanged.
///
/// # Examples
///
/// ```
/// use u_grasp::grasp::{KnapsackEvaluator, Solution};
/// use u_grasp::qbf::{Inverse, Kqbf};
///
/// let kqbf = Kqbf::new(vec![vec![3.0]], vec![1.0], 1.0).unwrap();
/// let inverse = Inverse::new(kqbf);
///
/// let mut sol = Solution::empty(1);
/// sol.insert(0, &inverse);
/// assert_eq!(sol.cost(), -3.0);
/// assert_eq!(inverse.original_cost(sol.cost()), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct Inverse<E> {
    inner: E,
}

impl<E: KnapsackEvaluator> Inverse<E> {
    /// Wraps `inner`.
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    /// The wrapped evaluator.
    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Unwraps the adapter.
    pub fn into_inner(self) -> E {
        self.inner
    }

    /// Converts a cost reported by this adapter back to the wrapped
    /// evaluator's sign convention.
    pub fn original_cost(&self, cost: f64) -> f64 {
        -cost
    }
}

impl<E: KnapsackEvaluator> KnapsackEvaluator for Inverse<E> {
    fn domain_size(&self) -> usize {
        self.inner.domain_size()
    }

    fn weight(&self, element: usize) -> f64 {
        self.inner.weight(element)
    }

    fn capacity(&self) -> f64 {
        self.inner.capacity()
    }

    fn evaluate(&self, solution: &Solution) -> f64 {
        -self.inner.evaluate(solution)
    }

    fn insertion_delta(&self, element: usize, solution: &Solution) -> f64 {
        -self.inner.insertion_delta(element, solution)
    }

    fn removal_delta(&self, element: usize, solution: &Solution) -> f64 {
        -self.inner.removal_delta(element, solution)
    }

    fn exchange_delta(&self, incoming: usize, outgoing: usize, solution: &Solution) -> f64 {
        -self.inner.exchange_delta(incoming, outgoing, solution)
    }

    fn used_capacity(&self, solution: &Solution) -> f64 {
        self.inner.used_capacity(solution)
    }
}
