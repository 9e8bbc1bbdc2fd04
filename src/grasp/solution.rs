//! Selection state shared by the constructive and local-search phases.

use super::types::KnapsackEvaluator;
#[cfg(feature = "serde")]
use crate::error::GraspError;

/// A subset of selected elements with cached cost and used capacity.
///
/// The caches are refreshed from the evaluator on every mutation, so they
/// always match what [`KnapsackEvaluator::evaluate`] and
/// [`KnapsackEvaluator::used_capacity`] report for the current selection.
///
/// The empty selection has cost 0 and is always feasible.
///
/// Deserialization rejects documents whose element list and selection mask
/// disagree. Cost and used capacity are taken as stored; call
/// [`refresh`](Self::refresh) to recompute them against an evaluator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "StoredSolution"))]
pub struct Solution {
    elements: Vec<usize>,
    selected: Vec<bool>,
    cost: f64,
    used_capacity: f64,
}

impl Solution {
    /// Creates the empty selection over a domain of `domain_size` elements.
    pub fn empty(domain_size: usize) -> Self {
        Self {
            elements: Vec::new(),
            selected: vec![false; domain_size],
            cost: 0.0,
            used_capacity: 0.0,
        }
    }

    /// Selected elements, in insertion order.
    pub fn elements(&self) -> &[usize] {
        &self.elements
    }

    /// Whether `element` is selected. Out-of-domain ids are never selected.
    pub fn contains(&self, element: usize) -> bool {
        self.selected.get(element).copied().unwrap_or(false)
    }

    /// Number of selected elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Cached objective value (minimization sign).
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Cached sum of selected weights.
    pub fn used_capacity(&self) -> f64 {
        self.used_capacity
    }

    /// Capacity left before the knapsack is full.
    pub fn free_capacity<E: KnapsackEvaluator>(&self, evaluator: &E) -> f64 {
        evaluator.capacity() - self.used_capacity
    }

    /// Selects `element` and refreshes the caches.
    ///
    /// Selecting an element twice is a no-op.
    pub fn insert<E: KnapsackEvaluator>(&mut self, element: usize, evaluator: &E) {
        if self.add(element) {
            self.refresh(evaluator);
        }
    }

    /// Deselects `element` and refreshes the caches.
    ///
    /// Removing an element that is not selected is a no-op.
    pub fn remove<E: KnapsackEvaluator>(&mut self, element: usize, evaluator: &E) {
        if self.drop_element(element) {
            self.refresh(evaluator);
        }
    }

    /// Swaps `outgoing` for `incoming` with a single cache refresh.
    pub fn exchange<E: KnapsackEvaluator>(
        &mut self,
        incoming: usize,
        outgoing: usize,
        evaluator: &E,
    ) {
        let removed = self.drop_element(outgoing);
        let added = self.add(incoming);
        if removed || added {
            self.refresh(evaluator);
        }
    }

    /// Recomputes cost and used capacity from scratch.
    pub fn refresh<E: KnapsackEvaluator>(&mut self, evaluator: &E) {
        self.cost = evaluator.evaluate(self);
        self.used_capacity = evaluator.used_capacity(self);
    }

    fn add(&mut self, element: usize) -> bool {
        match self.selected.get_mut(element) {
            Some(flag) if !*flag => {
                *flag = true;
                self.elements.push(element);
                true
            }
            _ => false,
        }
    }

    fn drop_element(&mut self, element: usize) -> bool {
        match self.selected.get_mut(element) {
            Some(flag) if *flag => {
                *flag = false;
                self.elements.retain(|&e| e != element);
                true
            }
            _ => false,
        }
    }
}

/// Unchecked form of [`Solution`] as it appears in a serialized document.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StoredSolution {
    elements: Vec<usize>,
    selected: Vec<bool>,
    cost: f64,
    used_capacity: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<StoredSolution> for Solution {
    type Error = GraspError;

    fn try_from(stored: StoredSolution) -> Result<Self, Self::Error> {
        let mut mask = vec![false; stored.selected.len()];
        for &element in &stored.elements {
            match mask.get_mut(element) {
                Some(flag) if !*flag => *flag = true,
                Some(_) => {
                    return Err(GraspError::InvalidInstance(format!(
                        "element {element} is listed twice"
                    )))
                }
                None => {
                    return Err(GraspError::InvalidInstance(format!(
                        "element {element} is outside a domain of {}",
                        mask.len()
                    )))
                }
            }
        }
        if mask != stored.selected {
            return Err(GraspError::InvalidInstance(
                "selection mask does not match the element list".into(),
            ));
        }
        if !stored.cost.is_finite() || !stored.used_capacity.is_finite() {
            return Err(GraspError::InvalidInstance(
                "cost and used capacity must be finite".into(),
            ));
        }
        Ok(Self {
            elements: stored.elements,
            selected: stored.selected,
            cost: stored.cost,
            used_capacity: stored.used_capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qbf::Kqbf;

    fn problem() -> Kqbf {
        Kqbf::new(
            vec![
                vec![2.0, -1.0, 0.0],
                vec![0.0, 3.0, 4.0],
                vec![0.0, 0.0, -5.0],
            ],
            vec![1.0, 2.0, 3.0],
            4.0,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_solution() {
        let sol = Solution::empty(3);
        assert!(sol.is_empty());
        assert_eq!(sol.cost(), 0.0);
        assert_eq!(sol.used_capacity(), 0.0);
        assert!(!sol.contains(0));
        assert!(!sol.contains(99));
    }

    #[test]
    fn test_insert_refreshes_caches() {
        let p = problem();
        let mut sol = Solution::empty(3);
        sol.insert(0, &p);
        sol.insert(1, &p);
        assert_eq!(sol.elements(), &[0, 1]);
        // 2 + 3 - 1
        assert!((sol.cost() - 4.0).abs() < 1e-12);
        assert!((sol.used_capacity() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_insert_twice_is_noop() {
        let p = problem();
        let mut sol = Solution::empty(3);
        sol.insert(1, &p);
        sol.insert(1, &p);
        assert_eq!(sol.len(), 1);
    }

    #[test]
    fn test_remove_refreshes_caches() {
        let p = problem();
        let mut sol = Solution::empty(3);
        sol.insert(0, &p);
        sol.insert(1, &p);
        sol.remove(0, &p);
        assert_eq!(sol.elements(), &[1]);
        assert!((sol.cost() - 3.0).abs() < 1e-12);
        assert!((sol.used_capacity() - 2.0).abs() < 1e-12);

        sol.remove(2, &p);
        assert_eq!(sol.len(), 1);
    }

    #[test]
    fn test_exchange() {
        let p = problem();
        let mut sol = Solution::empty(3);
        sol.insert(0, &p);
        sol.exchange(2, 0, &p);
        assert_eq!(sol.elements(), &[2]);
        assert!(sol.contains(2));
        assert!(!sol.contains(0));
        assert!((sol.cost() + 5.0).abs() < 1e-12);
        assert!((sol.used_capacity() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_free_capacity() {
        let p = problem();
        let mut sol = Solution::empty(3);
        sol.insert(1, &p);
        assert!((sol.free_capacity(&p) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_clone_does_not_alias() {
        let p = problem();
        let mut sol = Solution::empty(3);
        sol.insert(0, &p);
        let snapshot = sol.clone();
        sol.insert(1, &p);
        assert_eq!(snapshot.elements(), &[0]);
        assert_eq!(sol.elements(), &[0, 1]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_keeps_consistent_solution() {
        let p = problem();
        let mut sol = Solution::empty(3);
        sol.insert(2, &p);
        sol.insert(0, &p);

        let text = toml::to_string(&sol).unwrap();
        let back: Solution = toml::from_str(&text).unwrap();
        assert_eq!(back, sol);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_inconsistent_selection() {
        let doc = |elements: &str, selected: &str| {
            format!(
                "elements = {elements}\nselected = {selected}\ncost = 0.0\nused_capacity = 0.0\n"
            )
        };
        for (elements, selected) in [
            ("[0]", "[false, true, false]"),
            ("[1, 1]", "[false, true, false]"),
            ("[5]", "[false, false, false]"),
            ("[]", "[true, false, false]"),
        ] {
            assert!(
                toml::from_str::<Solution>(&doc(elements, selected)).is_err(),
                "accepted elements {elements} with mask {selected}"
            );
        }
        let ok: Solution = toml::from_str(&doc("[1]", "[false, true, false]")).unwrap();
        assert!(ok.contains(1));
    }
}
