//! Knapsack-constrained quadratic binary function.

use rand::Rng;
use u_numflow::random::create_rng;

use crate::error::{GraspError, Result};
use crate::grasp::{KnapsackEvaluator, Solution};

/// A KQBF instance: maximize `f(x) = Σ_i Σ_j x_i·A_ij·x_j` subject to
/// `Σ_i w_i·x_i ≤ W`.
///
/// Values are reported in the maximization sense. Wrap the instance in
/// [`Inverse`](super::Inverse) to hand it to the minimizing GRASP engine.
#[derive(Debug, Clone)]
pub struct Kqbf {
    matrix: Vec<Vec<f64>>,
    weights: Vec<f64>,
    capacity: f64,
}

impl Kqbf {
    /// Creates an instance from an `n × n` interaction matrix, `n` weights
    /// and a capacity.
    ///
    /// # Errors
    ///
    /// Returns [`GraspError::InvalidInstance`] if the matrix is not square,
    /// the weight count differs from the matrix size, an interaction is not
    /// finite, or any weight or the capacity is negative or not finite.
    pub fn new(matrix: Vec<Vec<f64>>, weights: Vec<f64>, capacity: f64) -> Result<Self> {
        let n = matrix.len();
        if let Some((row, r)) = matrix.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(GraspError::InvalidInstance(format!(
                "matrix row {row} has {} entries, expected {n}",
                r.len()
            )));
        }
        for (i, row) in matrix.iter().enumerate() {
            if let Some(j) = row.iter().position(|a| !a.is_finite()) {
                return Err(GraspError::InvalidInstance(format!(
                    "interaction ({i}, {j}) must be finite, got {}",
                    row[j]
                )));
            }
        }
        if weights.len() != n {
            return Err(GraspError::InvalidInstance(format!(
                "expected {n} weights, got {}",
                weights.len()
            )));
        }
        if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(GraspError::InvalidInstance(format!(
                "weights must be finite and non-negative, got {w}"
            )));
        }
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(GraspError::InvalidInstance(format!(
                "capacity must be finite and non-negative, got {capacity}"
            )));
        }
        Ok(Self {
            matrix,
            weights,
            capacity,
        })
    }

    /// Generates a random upper-triangular instance.
    ///
    /// Interactions are integers in `[-10, 10]`, weights integers in
    /// `[1, 10]`, and the capacity is `capacity_ratio` times the total weight.
    pub fn random(n: usize, capacity_ratio: f64, seed: u64) -> Self {
        let mut rng = create_rng(seed);
        let mut matrix = vec![vec![0.0; n]; n];
        for (i, row) in matrix.iter_mut().enumerate() {
            for entry in row.iter_mut().skip(i) {
                *entry = rng.random_range(-10i32..=10) as f64;
            }
        }
        let weights: Vec<f64> = (0..n).map(|_| rng.random_range(1u32..=10) as f64).collect();
        let capacity = (capacity_ratio.max(0.0) * weights.iter().sum::<f64>()).floor();
        Self {
            matrix,
            weights,
            capacity,
        }
    }

    /// Interaction coefficient `A_ij`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is not below [`domain_size`](KnapsackEvaluator::domain_size).
    pub fn interaction(&self, i: usize, j: usize) -> f64 {
        self.matrix[i][j]
    }

    /// All element weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Value gained by `element` against the current selection, ignoring
    /// whether `element` itself is selected.
    fn contribution(&self, element: usize, solution: &Solution) -> f64 {
        let row = &self.matrix[element];
        let pairs: f64 = solution
            .elements()
            .iter()
            .filter(|&&j| j != element)
            .map(|&j| row[j] + self.matrix[j][element])
            .sum();
        row[element] + pairs
    }
}

impl KnapsackEvaluator for Kqbf {
    fn domain_size(&self) -> usize {
        self.matrix.len()
    }

    fn weight(&self, element: usize) -> f64 {
        self.weights[element]
    }

    fn capacity(&self) -> f64 {
        self.capacity
    }

    fn evaluate(&self, solution: &Solution) -> f64 {
        let elements = solution.elements();
        elements
            .iter()
            .map(|&i| elements.iter().map(|&j| self.matrix[i][j]).sum::<f64>())
            .sum()
    }

    fn insertion_delta(&self, element: usize, solution: &Solution) -> f64 {
        if solution.contains(element) {
            0.0
        } else {
            self.contribution(element, solution)
        }
    }

    fn removal_delta(&self, element: usize, solution: &Solution) -> f64 {
        if solution.contains(element) {
            -self.contribution(element, solution)
        } else {
            0.0
        }
    }

    fn exchange_delta(&self, incoming: usize, outgoing: usize, solution: &Solution) -> f64 {
        if incoming == outgoing {
            return 0.0;
        }
        if solution.contains(incoming) {
            return self.removal_delta(outgoing, solution);
        }
        if !solution.contains(outgoing) {
            return self.insertion_delta(incoming, solution);
        }
        self.contribution(incoming, solution)
            - self.contribution(outgoing, solution)
            - (self.matrix[incoming][outgoing] + self.matrix[outgoing][incoming])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Kqbf {
        Kqbf::new(
            vec![
                vec![1.0, 2.0, -3.0, 0.0],
                vec![0.0, -1.0, 4.0, 1.0],
                vec![0.0, 0.0, 2.0, -2.0],
                vec![0.0, 0.0, 0.0, 5.0],
            ],
            vec![2.0, 3.0, 1.0, 4.0],
            7.0,
        )
        .unwrap()
    }

    fn select(p: &Kqbf, elements: &[usize]) -> Solution {
        let mut sol = Solution::empty(p.domain_size());
        for &e in elements {
            sol.insert(e, p);
        }
        sol
    }

    #[test]
    fn test_evaluate_sums_pairs() {
        let p = sample();
        let sol = select(&p, &[0, 1, 2]);
        // 1 - 1 + 2 + 2 - 3 + 4
        assert!((p.evaluate(&sol) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_insertion_delta_matches_full() {
        let p = sample();
        let sol = select(&p, &[0, 2]);
        let delta = p.insertion_delta(1, &sol);
        let after = select(&p, &[0, 2, 1]);
        assert!((p.evaluate(&after) - p.evaluate(&sol) - delta).abs() < 1e-12);
        assert_eq!(p.insertion_delta(0, &sol), 0.0);
    }

    #[test]
    fn test_removal_delta_matches_full() {
        let p = sample();
        let sol = select(&p, &[0, 1, 3]);
        let delta = p.removal_delta(1, &sol);
        let after = select(&p, &[0, 3]);
        assert!((p.evaluate(&after) - p.evaluate(&sol) - delta).abs() < 1e-12);
        assert_eq!(p.removal_delta(2, &sol), 0.0);
    }

    #[test]
    fn test_exchange_delta_matches_full() {
        let p = sample();
        let sol = select(&p, &[0, 1]);
        let delta = p.exchange_delta(2, 1, &sol);
        let after = select(&p, &[0, 2]);
        assert!((p.evaluate(&after) - p.evaluate(&sol) - delta).abs() < 1e-12);
    }

    #[test]
    fn test_exchange_degenerate_cases() {
        let p = sample();
        let sol = select(&p, &[0, 1]);
        assert_eq!(p.exchange_delta(1, 1, &sol), 0.0);
        // incoming already selected: only the removal happens
        assert_eq!(p.exchange_delta(0, 1, &sol), p.removal_delta(1, &sol));
        // outgoing not selected: only the insertion happens
        assert_eq!(p.exchange_delta(2, 3, &sol), p.insertion_delta(2, &sol));
    }

    #[test]
    fn test_new_rejects_bad_shapes() {
        assert!(Kqbf::new(vec![vec![1.0, 2.0]], vec![1.0], 1.0).is_err());
        assert!(Kqbf::new(vec![vec![1.0]], vec![1.0, 2.0], 1.0).is_err());
        assert!(Kqbf::new(vec![vec![1.0]], vec![-1.0], 1.0).is_err());
        assert!(Kqbf::new(vec![vec![1.0]], vec![1.0], -1.0).is_err());
        assert!(Kqbf::new(vec![vec![1.0]], vec![1.0], f64::NAN).is_err());
    }

    #[test]
    fn test_new_rejects_non_finite_interactions() {
        let weights = vec![1.0, 1.0];
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let matrix = vec![vec![1.0, bad], vec![0.0, 2.0]];
            assert!(matches!(
                Kqbf::new(matrix, weights.clone(), 2.0),
                Err(GraspError::InvalidInstance(_))
            ));
        }
    }

    #[test]
    #[should_panic]
    fn test_interaction_out_of_range_panics() {
        let p = Kqbf::random(3, 0.5, 1);
        p.interaction(0, 3);
    }

    #[test]
    fn test_random_is_reproducible() {
        let a = Kqbf::random(12, 0.5, 7);
        let b = Kqbf::random(12, 0.5, 7);
        assert_eq!(a.weights(), b.weights());
        assert_eq!(a.capacity(), b.capacity());
        for i in 0..12 {
            for j in 0..12 {
                assert_eq!(a.interaction(i, j), b.interaction(i, j));
            }
        }
    }

    #[test]
    fn test_random_is_upper_triangular() {
        let p = Kqbf::random(10, 0.3, 1);
        for i in 0..10 {
            for j in 0..i {
                assert_eq!(p.interaction(i, j), 0.0);
            }
        }
        assert!(p.weights().iter().all(|&w| (1.0..=10.0).contains(&w)));
        assert!(p.capacity() <= p.weights().iter().sum::<f64>());
    }
}
