//! Evolution configuration.
//!
//! [`EvolutionConfig`] holds every parameter of a run. All values are fixed
//! once the engine is built.

use crate::error::ConfigError;

/// Configuration for the tour GA.
///
/// # Defaults
///
/// ```
/// use tsp_evo::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 300);
/// assert_eq!(config.max_generations, 100);
/// assert_eq!(config.tournament_size, 3);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use tsp_evo::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(200)
///     .with_crossover_rate(0.7)
///     .with_mutation_rate(0.3)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionConfig {
    /// Number of individuals, constant for the whole run.
    pub population_size: usize,

    /// Number of generations to run. Zero evaluates the initial population
    /// and returns its best tour.
    pub max_generations: usize,

    /// Contestants per tournament (sampled with replacement).
    pub tournament_size: usize,

    /// Probability that an adjacent offspring pair is recombined.
    pub crossover_rate: f64,

    /// Probability that an offspring enters mutation at all.
    pub mutation_rate: f64,

    /// Per-position swap probability once an offspring is mutated.
    pub indpb: f64,

    /// Random seed. `None` draws one from the OS and logs it.
    pub seed: Option<u64>,

    /// Evaluate fitness with rayon. Needs the `parallel` feature; ignored
    /// otherwise. Results are identical to a sequential run.
    pub parallel: bool,

    /// Optional wall-clock budget in milliseconds, checked between
    /// generations.
    pub time_limit_ms: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 300,
            max_generations: 100,
            tournament_size: 3,
            crossover_rate: 0.5,
            mutation_rate: 0.2,
            indpb: 0.05,
            seed: None,
            parallel: false,
            time_limit_ms: None,
        }
    }
}

impl EvolutionConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_indpb(mut self, p: f64) -> Self {
        self.indpb = p;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    ///
    /// Rates are not clamped by the builders; out-of-range values are
    /// reported here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(ConfigError::TournamentSize {
                tournament_size: self.tournament_size,
                population_size: self.population_size,
            });
        }
        ConfigError::check_probability("indpb", self.indpb)?;
        self.validate_run()
    }

    /// Validates only the parameters the engine itself uses, leaving out
    /// `tournament_size` and `indpb`, which only parameterize the default
    /// operators.
    pub(crate) fn validate_run(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        ConfigError::check_probability("crossover_rate", self.crossover_rate)?;
        ConfigError::check_probability("mutation_rate", self.mutation_rate)?;
        if self.time_limit_ms == Some(0) {
            return Err(ConfigError::ZeroTimeLimit);
        }
        Ok(())
    }
}
