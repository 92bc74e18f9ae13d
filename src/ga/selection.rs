//! Tournament selection.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::{Individual, Selection};
use crate::error::ConfigError;
use rand::Rng;

/// Tournament selection: sample `size` individuals uniformly with
/// replacement and keep the shortest tour.
///
/// Higher `size` = stronger selection pressure.
/// - 2: light pressure
/// - 3: the usual default
/// - >5: strong pressure, risk of premature convergence
///
/// Ties go to the contestant drawn first.
///
/// # Complexity
/// O(size) per selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tournament {
    size: usize,
}

impl Tournament {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Selection for Tournament {
    /// # Panics
    /// Panics if `population` is empty or holds an unevaluated individual.
    fn select<R: Rng>(&self, population: &[Individual], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );
        let n = population.len();

        let mut best_idx = rng.random_range(0..n);
        let mut best_len = population[best_idx].ranked_length();
        for _ in 1..self.size.max(1) {
            let idx = rng.random_range(0..n);
            let len = population[idx].ranked_length();
            if len < best_len {
                best_idx = idx;
                best_len = len;
            }
        }
        best_idx
    }

    fn validate(&self, population_size: usize) -> Result<(), ConfigError> {
        if self.size == 0 || self.size > population_size {
            return Err(ConfigError::TournamentSize {
                tournament_size: self.size,
                population_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn make_population(lengths: &[f64]) -> Vec<Individual> {
        lengths
            .iter()
            .enumerate()
            .map(|(i, &len)| {
                let mut ind = Individual::new(vec![i]);
                ind.set_length(len);
                ind
            })
            .collect()
    }

    #[test]
    fn test_tournament_favors_shortest() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[Tournament::new(4).select(&pop, &mut rng)] += 1;
        }
        // P(best appears among 4 draws) = 1 - (3/4)^4 ≈ 0.68
        assert!(
            counts[2] > 6000,
            "expected best to be selected >60% of the time, got {}/{n}",
            counts[2]
        );
    }

    #[test]
    fn test_dominant_individual_beats_uniform_rate() {
        let mut lengths = vec![100.0; 50];
        lengths[17] = 1.0;
        let pop = make_population(&lengths);
        let mut rng = create_rng(7);

        let draws = 20_000;
        let hits = (0..draws)
            .filter(|_| Tournament::new(3).select(&pop, &mut rng) == 17)
            .count();
        let uniform = draws / pop.len();
        // Expected ≈ 1 - (49/50)^3 ≈ 5.9%, uniform is 2%.
        assert!(
            hits > 2 * uniform,
            "tournament should be biased: hits={hits}, uniform={uniform}"
        );
    }

    #[test]
    fn test_size_one_is_uniform() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[Tournament::new(1).select(&pop, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 2000, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = create_rng(42);
        assert_eq!(Tournament::new(3).select(&pop, &mut rng), 0);
    }

    #[test]
    fn test_validate_bounds() {
        assert!(Tournament::new(3).validate(300).is_ok());
        assert!(Tournament::new(3).validate(3).is_ok());
        assert_eq!(
            Tournament::new(4).validate(3),
            Err(ConfigError::TournamentSize {
                tournament_size: 4,
                population_size: 3
            })
        );
        assert!(Tournament::new(0).validate(10).is_err());
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<Individual> = vec![];
        let mut rng = create_rng(42);
        Tournament::default().select(&pop, &mut rng);
    }

    #[test]
    #[should_panic(expected = "ranked before its fitness was evaluated")]
    fn test_unevaluated_population_panics() {
        let pop = vec![Individual::new(vec![0, 1])];
        let mut rng = create_rng(42);
        Tournament::default().select(&pop, &mut rng);
    }
}
