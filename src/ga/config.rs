//! Genetic run configuration.

use crate::error::Error;

use super::population::MutationOperator;
use super::selection::Selection;

/// Parameters for one genetic solver run.
///
/// # Defaults
///
/// ```
/// use tsp_engine::ga::GeneticConfig;
///
/// let config = GeneticConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert!(config.seed.is_none());
/// ```
///
/// # Builder pattern
///
/// ```
/// use tsp_engine::ga::{GeneticConfig, MutationOperator, Selection};
///
/// let config = GeneticConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::WeightedByRank)
///     .with_mutation_probability(0.02)
///     .with_mutation_operator(MutationOperator::SingleSwap)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneticConfig {
    /// Number of individuals; constant across generations.
    pub population_size: usize,

    /// Parent-pair selection strategy.
    pub selection: Selection,

    /// Per-opportunity swap probability in `[0, 1]`.
    ///
    /// `0` skips the mutation pass entirely.
    pub mutation_probability: f64,

    /// Which swap-mutation variant to apply.
    pub mutation: MutationOperator,

    /// Random seed for reproducible runs. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            selection: Selection::default(),
            mutation_probability: 0.01,
            mutation: MutationOperator::default(),
            seed: None,
        }
    }
}

impl GeneticConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Convenience for `.with_selection(Selection::Tournament(m))`.
    pub fn with_tournament_size(self, m: usize) -> Self {
        self.with_selection(Selection::Tournament(m))
    }

    /// Sets the mutation probability.
    pub fn with_mutation_probability(mut self, probability: f64) -> Self {
        self.mutation_probability = probability;
        self
    }

    /// Sets the mutation operator.
    pub fn with_mutation_operator(mut self, operator: MutationOperator) -> Self {
        self.mutation = operator;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks every parameter before a worker is spawned.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] describing the first offending parameter.
    pub fn validate(&self) -> Result<(), Error> {
        if self.population_size < 2 {
            return Err(Error::InvalidInput(
                "population size must be at least 2".into(),
            ));
        }
        if !self.mutation_probability.is_finite()
            || !(0.0..=1.0).contains(&self.mutation_probability)
        {
            return Err(Error::InvalidInput(format!(
                "mutation probability must lie in [0, 1], got {}",
                self.mutation_probability
            )));
        }
        if let Selection::Tournament(m) = self.selection {
            if m < 2 {
                return Err(Error::InvalidInput(
                    "tournament size must be at least 2 to form a pair".into(),
                ));
            }
        }
        Ok(())
    }
}
