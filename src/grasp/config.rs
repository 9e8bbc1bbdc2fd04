//! GRASP configuration and strategy selection.

use crate::error::{GraspError, Result};

/// How the constructive phase builds a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConstructionStrategy {
    /// Semi-greedy construction: pick uniformly from the alpha-restricted
    /// candidate list at every step.
    #[default]
    Standard,

    /// Standard construction for iterations `1..=greedy_after`, then
    /// purely greedy (best insertion, no randomness) for later iterations.
    RandomPlusGreedy {
        /// Last iteration (1-based) of the randomized exploration phase.
        greedy_after: usize,
    },

    /// Reactive GRASP (adaptive alpha). Not implemented: selecting it
    /// yields the empty solution with a warning.
    Reactive,
}

/// How the local-search phase picks moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LocalSearchStrategy {
    /// Apply the first improving move, trying insertions, then removals,
    /// then exchanges.
    FirstImproving,

    /// Apply the best move over all insertions, removals and exchanges.
    #[default]
    BestImproving,
}

/// Configuration for the GRASP driver.
///
/// # Examples
///
/// ```
/// use u_grasp::grasp::{ConstructionStrategy, GraspConfig, LocalSearchStrategy};
///
/// let config = GraspConfig::default()
///     .with_alpha(0.05)
///     .with_iterations(1000)
///     .with_construction(ConstructionStrategy::RandomPlusGreedy { greedy_after: 3 })
///     .with_local_search(LocalSearchStrategy::FirstImproving)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_time_secs, 30 * 60);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraspConfig {
    /// Greediness-randomness parameter in `[0, 1]`.
    ///
    /// 0 keeps only the best insertions in the restricted candidate list
    /// (pure greedy); 1 admits every feasible candidate (pure random).
    pub alpha: f64,

    /// Number of construction + local search iterations.
    pub iterations: usize,

    /// Wall-clock budget in seconds, checked before each iteration.
    pub max_time_secs: u64,

    /// Constructive phase strategy.
    pub construction: ConstructionStrategy,

    /// Local search strategy.
    pub local_search: LocalSearchStrategy,

    /// A move improves only if its delta is below `-improvement_epsilon`.
    pub improvement_epsilon: f64,

    /// Random seed. `None` uses seed 0, so runs are reproducible by default.
    pub seed: Option<u64>,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            iterations: 1000,
            max_time_secs: 30 * 60,
            construction: ConstructionStrategy::default(),
            local_search: LocalSearchStrategy::default(),
            improvement_epsilon: 1e-9,
            seed: None,
        }
    }
}

impl GraspConfig {
    /// Sets the greediness-randomness parameter.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the iteration count.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the wall-clock budget in seconds.
    pub fn with_max_time_secs(mut self, secs: u64) -> Self {
        self.max_time_secs = secs;
        self
    }

    /// Sets the construction strategy.
    pub fn with_construction(mut self, strategy: ConstructionStrategy) -> Self {
        self.construction = strategy;
        self
    }

    /// Sets the local search strategy.
    pub fn with_local_search(mut self, strategy: LocalSearchStrategy) -> Self {
        self.local_search = strategy;
        self
    }

    /// Sets the improvement threshold.
    pub fn with_improvement_epsilon(mut self, epsilon: f64) -> Self {
        self.improvement_epsilon = epsilon;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(GraspError::InvalidConfig(format!(
                "alpha must be in [0, 1], got {}",
                self.alpha
            )));
        }
        if self.iterations == 0 {
            return Err(GraspError::InvalidConfig(
                "iterations must be at least 1".into(),
            ));
        }
        if self.max_time_secs == 0 {
            return Err(GraspError::InvalidConfig(
                "max_time_secs must be positive".into(),
            ));
        }
        if !(self.improvement_epsilon.is_finite() && self.improvement_epsilon > 0.0) {
            return Err(GraspError::InvalidConfig(format!(
                "improvement_epsilon must be positive, got {}",
                self.improvement_epsilon
            )));
        }
        Ok(())
    }

    /// Parses a configuration from TOML. Missing keys take their defaults.
    ///
    /// The parsed configuration is validated before it is returned.
    ///
    /// ```
    /// use u_grasp::grasp::{ConstructionStrategy, GraspConfig};
    ///
    /// let config = GraspConfig::from_toml_str(r#"
    ///     alpha = 0.1
    ///     iterations = 50
    ///     local_search = "first_improving"
    ///
    ///     [construction.random_plus_greedy]
    ///     greedy_after = 3
    /// "#).unwrap();
    /// assert_eq!(config.iterations, 50);
    /// assert_eq!(
    ///     config.construction,
    ///     ConstructionStrategy::RandomPlusGreedy { greedy_after: 3 }
    /// );
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| GraspError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
