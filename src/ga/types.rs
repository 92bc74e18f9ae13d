//! Core types of the tour GA.
//!
//! [`Individual`] is the candidate record the engine evolves; the three
//! operator traits — [`Selection`], [`Crossover`] and [`Mutation`] — are
//! the seams where concrete strategies plug into
//! [`EvolutionEngine`](super::EvolutionEngine).

use crate::error::ConfigError;
use rand::Rng;

/// Cached tour length of an individual.
///
/// `Unknown` means the genome changed since the last evaluation and the
/// value must be recomputed in full before the individual can compete.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fitness {
    #[default]
    Unknown,
    Known(f64),
}

impl Fitness {
    /// The tour length, if known.
    pub fn value(self) -> Option<f64> {
        match self {
            Fitness::Known(v) => Some(v),
            Fitness::Unknown => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, Fitness::Known(_))
    }
}

/// A candidate tour: an ordering of every point slot plus its cached length.
///
/// The genome can only be changed through methods that also invalidate the
/// fitness, so a stale length is never observable.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    genome: Vec<usize>,
    fitness: Fitness,
}

impl Individual {
    /// Creates an unevaluated individual.
    pub fn new(genome: Vec<usize>) -> Self {
        Self {
            genome,
            fitness: Fitness::Unknown,
        }
    }

    pub fn genome(&self) -> &[usize] {
        &self.genome
    }

    pub fn fitness(&self) -> Fitness {
        self.fitness
    }

    /// Tour length, if evaluated.
    pub fn length(&self) -> Option<f64> {
        self.fitness.value()
    }

    pub fn is_valid(&self) -> bool {
        self.fitness.is_valid()
    }

    /// Marks the cached fitness as stale.
    pub fn invalidate(&mut self) {
        self.fitness = Fitness::Unknown;
    }

    /// Replaces the genome and invalidates the fitness.
    pub fn replace_genome(&mut self, genome: Vec<usize>) {
        self.genome = genome;
        self.invalidate();
    }

    /// Runs an in-place edit on the genome. When `edit` reports a change,
    /// the fitness is invalidated.
    pub fn mutate_with<F>(&mut self, edit: F) -> bool
    where
        F: FnOnce(&mut [usize]) -> bool,
    {
        let changed = edit(&mut self.genome);
        if changed {
            self.invalidate();
        }
        changed
    }

    pub(crate) fn set_length(&mut self, length: f64) {
        self.fitness = Fitness::Known(length);
    }

    /// Length used for ranking.
    ///
    /// # Panics
    /// Panics if the individual has not been evaluated; selection and
    /// result extraction only run after a full evaluation pass.
    pub(crate) fn ranked_length(&self) -> f64 {
        match self.fitness {
            Fitness::Known(v) => v,
            Fitness::Unknown => panic!("individual ranked before its fitness was evaluated"),
        }
    }
}

/// Picks one parent out of an evaluated population.
pub trait Selection: Send + Sync {
    /// Returns the index of the selected individual.
    ///
    /// Every individual in `population` must have a valid fitness.
    fn select<R: Rng>(&self, population: &[Individual], rng: &mut R) -> usize;

    /// Checks the operator's parameters against the population size.
    fn validate(&self, _population_size: usize) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Recombines two parent genomes into two children.
///
/// Implementations must return permutations of the same element set as the
/// parents.
pub trait Crossover: Send + Sync {
    fn crossover<R: Rng>(
        &self,
        parent1: &[usize],
        parent2: &[usize],
        rng: &mut R,
    ) -> (Vec<usize>, Vec<usize>);
}

/// Perturbs a genome in place.
///
/// Implementations must keep the genome a permutation.
pub trait Mutation: Send + Sync {
    /// Returns `true` if the genome was changed.
    fn mutate<R: Rng>(&self, genome: &mut [usize], rng: &mut R) -> bool;

    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_individual_is_unevaluated() {
        let ind = Individual::new(vec![0, 1, 2]);
        assert_eq!(ind.fitness(), Fitness::Unknown);
        assert!(!ind.is_valid());
        assert_eq!(ind.length(), None);
    }

    #[test]
    fn test_replace_genome_invalidates() {
        let mut ind = Individual::new(vec![0, 1, 2]);
        ind.set_length(3.0);
        assert_eq!(ind.length(), Some(3.0));

        ind.replace_genome(vec![2, 1, 0]);
        assert_eq!(ind.genome(), &[2, 1, 0]);
        assert!(!ind.is_valid());
    }

    #[test]
    fn test_mutate_with_only_invalidates_on_change() {
        let mut ind = Individual::new(vec![0, 1, 2]);
        ind.set_length(3.0);

        assert!(!ind.mutate_with(|_| false));
        assert_eq!(ind.length(), Some(3.0));

        assert!(ind.mutate_with(|g| {
            g.swap(0, 2);
            true
        }));
        assert_eq!(ind.genome(), &[2, 1, 0]);
        assert_eq!(ind.fitness(), Fitness::Unknown);
    }

    #[test]
    #[should_panic(expected = "ranked before its fitness was evaluated")]
    fn test_ranking_unevaluated_panics() {
        Individual::new(vec![0]).ranked_length();
    }
}
