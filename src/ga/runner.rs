//! Generational loop.
//!
//! [`EvolutionEngine`] drives a run:
//! initialize → evaluate → (select → recombine → mutate → evaluate → replace)*
//! and finally extracts the shortest tour of the last population.
//!
//! Replacement is fully generational: nothing survives unless it is
//! re-selected, so the best length can get worse between generations.

use super::config::EvolutionConfig;
use super::operators::{OrderedCrossover, ShuffleIndexes};
use super::population::{evaluate_invalid, Population};
use super::selection::Tournament;
use super::types::{Crossover, Individual, Mutation, Selection};
use crate::error::EvolveError;
use crate::random::create_rng;
use crate::tsp::{is_permutation, CoordinateTable, PointId, TourEvaluator};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::instrument;

/// A closed tour in caller-facing point ids.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    /// Visiting order; the tour returns from the last point to the first.
    pub points: Vec<PointId>,

    /// Total closed-tour length.
    pub length: f64,
}

/// Population summary after a generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 0 for the initial population.
    pub generation: usize,

    /// Fitness evaluations performed in this generation.
    pub evaluations: usize,

    pub best_length: f64,
    pub mean_length: f64,
    pub worst_length: f64,
    pub std_dev: f64,
}

impl GenerationStats {
    /// Summarizes an evaluated population.
    ///
    /// # Panics
    /// Panics if the population is empty or not fully evaluated.
    pub fn collect(generation: usize, evaluations: usize, population: &Population) -> Self {
        assert!(!population.is_empty(), "cannot summarize empty population");
        let lengths: Vec<f64> = population.iter().map(Individual::ranked_length).collect();
        let n = lengths.len() as f64;
        let mean = lengths.iter().sum::<f64>() / n;
        let variance = lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / n;
        Self {
            generation,
            evaluations,
            best_length: lengths.iter().copied().fold(f64::INFINITY, f64::min),
            mean_length: mean,
            worst_length: lengths.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            std_dev: variance.sqrt(),
        }
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionResult {
    /// Shortest tour of the final population.
    pub tour: Tour,

    /// Generations completed.
    pub generations: usize,

    /// Whether the run stopped early on cancellation or time limit.
    pub cancelled: bool,

    /// Stats for the initial population and every completed generation.
    pub history: Vec<GenerationStats>,
}

/// Runs the tour GA with a fixed set of operators.
///
/// # Usage
///
/// ```
/// use tsp_evo::ga::{EvolutionConfig, EvolutionEngine};
/// use tsp_evo::tsp::CoordinateTable;
///
/// let table = CoordinateTable::from_coordinates([
///     (0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0),
/// ]).unwrap();
/// let config = EvolutionConfig::default()
///     .with_population_size(30)
///     .with_max_generations(20)
///     .with_seed(42);
///
/// let engine = EvolutionEngine::new(config).unwrap();
/// let result = engine.run(&table).unwrap();
/// assert_eq!(result.tour.points.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionEngine<S = Tournament, C = OrderedCrossover, M = ShuffleIndexes> {
    config: EvolutionConfig,
    selection: S,
    crossover: C,
    mutation: M,
}

impl EvolutionEngine {
    /// Builds an engine with tournament selection, ordered crossover and
    /// index-shuffle mutation, parameterized from `config`.
    pub fn new(config: EvolutionConfig) -> Result<Self, EvolveError> {
        let selection = Tournament::new(config.tournament_size);
        let mutation = ShuffleIndexes::new(config.indpb);
        Self::with_operators(config, selection, OrderedCrossover, mutation)
    }
}

impl<S: Selection, C: Crossover, M: Mutation> EvolutionEngine<S, C, M> {
    /// Builds an engine with explicit operators.
    ///
    /// `config.tournament_size` and `config.indpb` only parameterize the
    /// default operators, so they are neither used nor validated here; the
    /// supplied operators validate their own parameters.
    pub fn with_operators(
        config: EvolutionConfig,
        selection: S,
        crossover: C,
        mutation: M,
    ) -> Result<Self, EvolveError> {
        config.validate_run()?;
        selection.validate(config.population_size)?;
        mutation.validate()?;
        Ok(Self {
            config,
            selection,
            crossover,
            mutation,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Runs the full number of generations.
    pub fn run(&self, table: &CoordinateTable) -> Result<EvolutionResult, EvolveError> {
        self.run_observed(table, None, |_, _| {})
    }

    /// Runs with an optional cancellation flag.
    ///
    /// The flag is checked between generations; when set, the run stops
    /// and returns the best tour of the last completed generation.
    pub fn run_with_cancel(
        &self,
        table: &CoordinateTable,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<EvolutionResult, EvolveError> {
        self.run_observed(table, cancel, |_, _| {})
    }

    /// Runs and calls `observer` with the stats and population after the
    /// initial evaluation and after every completed generation.
    #[instrument(
        level = "debug",
        skip_all,
        fields(points = table.len(), population_size = self.config.population_size)
    )]
    pub fn run_observed<F>(
        &self,
        table: &CoordinateTable,
        cancel: Option<Arc<AtomicBool>>,
        mut observer: F,
    ) -> Result<EvolutionResult, EvolveError>
    where
        F: FnMut(&GenerationStats, &Population),
    {
        let config = &self.config;
        let point_count = table.len();

        if point_count < 2 {
            tracing::info!(points = point_count, "Degenerate instance, skipping evolution");
            return Ok(EvolutionResult {
                tour: Tour {
                    points: table.ids().to_vec(),
                    length: 0.0,
                },
                generations: 0,
                cancelled: false,
                history: Vec::new(),
            });
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::info!(
            points = point_count,
            population_size = config.population_size,
            max_generations = config.max_generations,
            seed,
            "Starting evolution"
        );

        let evaluator = TourEvaluator::new(table);
        let mut rng = create_rng(seed);
        let started = Instant::now();
        let deadline = config.time_limit_ms.map(Duration::from_millis);

        let mut population = Population::initialize(config.population_size, point_count, &mut rng);
        let evaluations = population.evaluate_invalid(&evaluator, config.parallel);
        let stats = GenerationStats::collect(0, evaluations, &population);
        observer(&stats, &population);

        let mut history = Vec::with_capacity(config.max_generations.min(1024) + 1);
        history.push(stats);

        let mut generation = 0;
        let mut cancelled = false;
        while generation < config.max_generations {
            if is_cancelled(cancel.as_deref()) || deadline.is_some_and(|d| started.elapsed() >= d) {
                tracing::warn!(generation, "Evolution stopped before the last generation");
                cancelled = true;
                break;
            }

            let mut offspring = self.select_offspring(&population, &mut rng);
            self.recombine(&mut offspring, &mut rng);
            self.mutate(&mut offspring, &mut rng);
            let evaluations = evaluate_invalid(&mut offspring, &evaluator, config.parallel);
            population.replace(offspring);
            generation += 1;

            let stats = GenerationStats::collect(generation, evaluations, &population);
            tracing::debug!(
                generation,
                evaluations,
                best = stats.best_length,
                mean = stats.mean_length,
                "Generation complete"
            );
            observer(&stats, &population);
            history.push(stats);
        }

        let tour = extract_best(&population, table)?;
        tracing::info!(
            generations = generation,
            length = tour.length,
            cancelled,
            "Evolution finished"
        );

        Ok(EvolutionResult {
            tour,
            generations: generation,
            cancelled,
            history,
        })
    }

    /// Builds the offspring candidate list: one tournament winner per slot,
    /// cloned so the parents stay untouched.
    fn select_offspring<R: Rng>(&self, population: &Population, rng: &mut R) -> Vec<Individual> {
        let parents = population.individuals();
        (0..parents.len())
            .map(|_| parents[self.selection.select(parents, rng)].clone())
            .collect()
    }

    /// Crosses adjacent pairs `(0, 1), (2, 3), …`; a trailing odd
    /// candidate passes through unchanged.
    fn recombine<R: Rng>(&self, offspring: &mut [Individual], rng: &mut R) {
        for pair in offspring.chunks_exact_mut(2) {
            if rng.random_bool(self.config.crossover_rate) {
                let (c1, c2) = self
                    .crossover
                    .crossover(pair[0].genome(), pair[1].genome(), rng);
                pair[0].replace_genome(c1);
                pair[1].replace_genome(c2);
            }
        }
    }

    fn mutate<R: Rng>(&self, offspring: &mut [Individual], rng: &mut R) {
        for child in offspring.iter_mut() {
            if rng.random_bool(self.config.mutation_rate) {
                child.mutate_with(|genome| self.mutation.mutate(genome, rng));
            }
        }
    }
}

fn is_cancelled(flag: Option<&AtomicBool>) -> bool {
    flag.is_some_and(|f| f.load(Ordering::Relaxed))
}

/// Packages the shortest tour of a fully evaluated population; the first
/// one wins ties.
fn extract_best(population: &Population, table: &CoordinateTable) -> Result<Tour, EvolveError> {
    let best = population
        .best()
        .ok_or_else(|| EvolveError::invalid_tour("population is empty"))?;
    if !is_permutation(best.genome(), table.len()) {
        return Err(EvolveError::invalid_tour(format!(
            "best individual is not a permutation of {} points: {:?}",
            table.len(),
            best.genome()
        )));
    }
    Ok(Tour {
        points: best.genome().iter().map(|&slot| table.point_id(slot)).collect(),
        length: best.ranked_length(),
    })
}

// ============================================================================
// Tests
// ============================================================================
