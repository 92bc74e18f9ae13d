//! Closed-tour length evaluation.

use super::coordinates::{euclidean_distance, Coordinate, CoordinateTable};
use crate::error::EvolveError;

/// Largest instance for which pairwise distances are precomputed; a
/// 4096-point matrix takes 128 MiB.
pub const MATRIX_POINT_LIMIT: usize = 4096;

/// Computes the length of closed tours over a fixed point set.
///
/// Up to [`MATRIX_POINT_LIMIT`] points, pairwise distances are computed once
/// into a dense symmetric matrix, so evaluating a tour is a single O(n)
/// table walk. Larger instances keep the coordinates and compute each
/// distance on demand, which yields the same values. The evaluator holds no
/// mutable state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct TourEvaluator {
    n: usize,
    distances: Distances,
}

#[derive(Debug, Clone)]
enum Distances {
    Matrix(Vec<f64>),
    OnDemand(Vec<Coordinate>),
}

impl TourEvaluator {
    pub fn new(table: &CoordinateTable) -> Self {
        Self::with_matrix_limit(table, MATRIX_POINT_LIMIT)
    }

    pub(crate) fn with_matrix_limit(table: &CoordinateTable, limit: usize) -> Self {
        let n = table.len();
        if n > limit {
            tracing::debug!(points = n, limit, "Computing distances on demand");
            let coords = (0..n).map(|slot| table.coordinate(slot)).collect();
            return Self {
                n,
                distances: Distances::OnDemand(coords),
            };
        }

        let mut matrix = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = euclidean_distance(table.coordinate(i), table.coordinate(j));
                matrix[i * n + j] = d;
                matrix[j * n + i] = d;
            }
        }
        Self {
            n,
            distances: Distances::Matrix(matrix),
        }
    }

    /// Whether pairwise distances were precomputed.
    pub fn is_precomputed(&self) -> bool {
        matches!(self.distances, Distances::Matrix(_))
    }

    /// Number of points the evaluator covers.
    pub fn point_count(&self) -> usize {
        self.n
    }

    /// Distance between two point slots.
    #[inline]
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        match &self.distances {
            Distances::Matrix(matrix) => matrix[a * self.n + b],
            Distances::OnDemand(coords) => euclidean_distance(coords[a], coords[b]),
        }
    }

    /// Length of the closed tour visiting `genome` in order and returning
    /// to its first point.
    ///
    /// `genome` must be a permutation of `0..point_count()`; this is not
    /// checked here (see [`checked_tour_length`](Self::checked_tour_length)).
    ///
    /// # Panics
    /// Panics if a slot is out of range.
    pub fn tour_length(&self, genome: &[usize]) -> f64 {
        let (Some(&first), Some(&last)) = (genome.first(), genome.last()) else {
            return 0.0;
        };
        let open: f64 = genome
            .windows(2)
            .map(|edge| self.distance(edge[0], edge[1]))
            .sum();
        open + self.distance(last, first)
    }

    /// Like [`tour_length`](Self::tour_length), but first verifies that
    /// `genome` visits every point exactly once.
    pub fn checked_tour_length(&self, genome: &[usize]) -> Result<f64, EvolveError> {
        if !is_permutation(genome, self.n) {
            return Err(EvolveError::invalid_tour(format!(
                "expected a permutation of {} points, got {:?}",
                self.n, genome
            )));
        }
        Ok(self.tour_length(genome))
    }
}

/// Returns `true` if `genome` contains every value of `0..n` exactly once.
pub fn is_permutation(genome: &[usize], n: usize) -> bool {
    if genome.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &slot in genome {
        if slot >= n || seen[slot] {
            return false;
        }
        seen[slot] = true;
    }
    true
}
