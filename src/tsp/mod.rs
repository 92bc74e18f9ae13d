//! Euclidean TSP geometry.
//!
//! - [`CoordinateTable`]: the read-only point set a run optimizes over
//! - [`euclidean_distance`]: the distance oracle
//! - [`TourEvaluator`]: closed-tour length of a point ordering

mod coordinates;
mod evaluator;

pub use coordinates::{euclidean_distance, Coordinate, CoordinateTable, PointId};
pub use evaluator::{is_permutation, TourEvaluator, MATRIX_POINT_LIMIT};
