//! Optimizer configuration.
//!
//! [`OptimizerConfig`] holds the parameters that control the generational loop.
//! It is validated once, when the [`Optimizer`](crate::optimizer::Optimizer) is
//! built, so a bad configuration never surfaces mid-run.

/// Configuration for the parameter optimizer.
///
/// # Defaults
///
/// ```
/// use gridpath_training::config::OptimizerConfig;
///
/// let config = OptimizerConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.generation_count, 10);
/// assert_eq!(config.mutation_rate, 0.2);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use gridpath_training::config::OptimizerConfig;
///
/// let config = OptimizerConfig::default()
///     .with_population_size(8)
///     .with_generation_count(20)
///     .with_seed(42);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    /// Number of individuals in every generation.
    ///
    /// The top half breeds, and every child needs two distinct parents, so at
    /// least 4 is required.
    pub population_size: usize,

    /// Number of generations evaluated before the optimizer finishes.
    pub generation_count: usize,

    /// Probability of mutating each gene of a child (0.0–1.0).
    pub mutation_rate: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            generation_count: 10,
            mutation_rate: 0.2,
            seed: None,
        }
    }
}

/// Reason an [`OptimizerConfig`] was rejected.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display(
        "population size {population_size} leaves fewer than 2 survivors to breed from (need at least 4)"
    )]
    PopulationTooSmall { population_size: usize },
    #[display("generation count must be positive")]
    ZeroGenerations,
    #[display("mutation rate {rate} is not a probability in [0, 1]")]
    InvalidMutationRate { rate: f64 },
}

impl OptimizerConfig {
    /// Minimum number of survivors recombination can draw distinct parent pairs from.
    pub const MIN_SURVIVORS: usize = 2;

    /// Sets the population size.
    #[must_use]
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    #[must_use]
    pub fn with_generation_count(mut self, n: usize) -> Self {
        self.generation_count = n;
        self
    }

    /// Sets the per-gene mutation probability.
    #[must_use]
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets a fixed random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of individuals kept as the breeding pool each generation.
    #[must_use]
    pub fn survivor_count(&self) -> usize {
        self.population_size / 2
    }

    /// Checks the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.survivor_count() < Self::MIN_SURVIVORS {
            return Err(ConfigError::PopulationTooSmall {
                population_size: self.population_size,
            });
        }
        if self.generation_count == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate {
                rate: self.mutation_rate,
            });
        }
        Ok(())
    }
}
