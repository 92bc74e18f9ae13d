//! Error types.
//!
//! Configuration and input problems are reported before any generation
//! runs. [`EvolveError::InvalidTour`] signals a broken permutation and is
//! unreachable in a correct run.

use crate::tsp::PointId;

/// Invalid engine or operator parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("InvalidPopulationSize: population_size must be at least 1")]
    EmptyPopulation,
    #[error(
        "InvalidTournamentSize: tournament size must be within 1..={population_size}, got {tournament_size}"
    )]
    TournamentSize {
        tournament_size: usize,
        population_size: usize,
    },
    #[error("InvalidProbability: {name} must be within [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },
    #[error("InvalidTimeLimit: time_limit_ms must be positive or None")]
    ZeroTimeLimit,
}

impl ConfigError {
    pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(Self::Probability { name, value })
        }
    }
}

/// Problems with the supplied coordinate table.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("EmptyTable: at least one point is required")]
    Empty,
    #[error("DuplicatePoint: point id {0} appears more than once")]
    DuplicatePoint(PointId),
    #[error("NonFiniteCoordinate: point {id} has coordinate ({x}, {y})")]
    NonFinite { id: PointId, x: f64, y: f64 },
}

/// Errors returned by the evolution engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvolveError {
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("CoordinateError: {0}")]
    Coordinates(#[from] CoordinateError),
    #[error("InvalidTour: {reason}")]
    InvalidTour { reason: String },
}

impl EvolveError {
    pub(crate) fn invalid_tour(reason: impl Into<String>) -> Self {
        Self::InvalidTour {
            reason: reason.into(),
        }
    }
}
