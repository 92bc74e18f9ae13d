//! Fixed-size population of tours.

use super::types::Individual;
use crate::tsp::TourEvaluator;
use rand::seq::SliceRandom;
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// An ordered, fixed-size collection of [`Individual`]s.
///
/// The size never changes after [`initialize`](Population::initialize);
/// [`replace`](Population::replace) swaps in a whole new generation at
/// once.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates `size` independent uniformly random tours over
    /// `point_count` slots, all unevaluated.
    pub fn initialize<R: Rng>(size: usize, point_count: usize, rng: &mut R) -> Self {
        let individuals = (0..size)
            .map(|_| {
                let mut genome: Vec<usize> = (0..point_count).collect();
                genome.shuffle(rng);
                Individual::new(genome)
            })
            .collect();
        Self { individuals }
    }

    /// Wraps an existing collection.
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Evaluates every individual whose fitness is unknown and returns how
    /// many were evaluated. Already evaluated individuals are left alone.
    pub fn evaluate_invalid(&mut self, evaluator: &TourEvaluator, parallel: bool) -> usize {
        evaluate_invalid(&mut self.individuals, evaluator, parallel)
    }

    /// Replaces the whole population with the next generation.
    ///
    /// # Panics
    /// Panics if `next` has a different size.
    pub fn replace(&mut self, next: Vec<Individual>) {
        assert_eq!(
            next.len(),
            self.individuals.len(),
            "replacement generation must keep the population size"
        );
        self.individuals = next;
    }

    /// Shortest evaluated tour; the first one wins ties.
    ///
    /// Returns `None` for an empty population.
    ///
    /// # Panics
    /// Panics if any individual is unevaluated.
    pub fn best(&self) -> Option<&Individual> {
        let mut iter = self.individuals.iter();
        let first = iter.next()?;
        Some(iter.fold(first, |best, ind| {
            if ind.ranked_length() < best.ranked_length() {
                ind
            } else {
                best
            }
        }))
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// `true` once every individual has a known fitness.
    pub fn is_evaluated(&self) -> bool {
        self.individuals.iter().all(Individual::is_valid)
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Evaluates the unevaluated individuals of `individuals`.
pub(crate) fn evaluate_invalid(
    individuals: &mut [Individual],
    evaluator: &TourEvaluator,
    parallel: bool,
) -> usize {
    if parallel {
        evaluate_parallel(individuals, evaluator)
    } else {
        evaluate_sequential(individuals, evaluator)
    }
}

#[cfg(feature = "parallel")]
fn evaluate_parallel(individuals: &mut [Individual], evaluator: &TourEvaluator) -> usize {
    individuals
        .par_iter_mut()
        .filter(|ind| !ind.is_valid())
        .map(|ind| {
            let length = evaluator.tour_length(ind.genome());
            ind.set_length(length);
        })
        .count()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_parallel(individuals: &mut [Individual], evaluator: &TourEvaluator) -> usize {
    evaluate_sequential(individuals, evaluator)
}

fn evaluate_sequential(individuals: &mut [Individual], evaluator: &TourEvaluator) -> usize {
    let mut evaluated = 0;
    for ind in individuals.iter_mut().filter(|ind| !ind.is_valid()) {
        let length = evaluator.tour_length(ind.genome());
        ind.set_length(length);
        evaluated += 1;
    }
    evaluated
}
