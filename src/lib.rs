//! Genetic-algorithm search for short closed tours (Euclidean TSP).
//!
//! Given a fixed table of point coordinates, the engine evolves a
//! population of candidate tours with tournament selection, ordered
//! crossover and index-shuffle mutation over a fixed number of
//! generations, then returns the shortest tour of the final population.
//!
//! - [`tsp`]: coordinates, the distance oracle and tour evaluation
//! - [`ga`]: population, operators and the evolution engine
//!
//! A run is deterministic for a given seed, configuration and coordinate
//! table.
//!
//! ```
//! use tsp_evo::ga::{EvolutionConfig, EvolutionEngine};
//! use tsp_evo::tsp::CoordinateTable;
//!
//! let table = CoordinateTable::from_coordinates([(0.0, 0.0), (3.0, 4.0)]).unwrap();
//! let engine = EvolutionEngine::new(EvolutionConfig::default().with_seed(42)).unwrap();
//! let result = engine.run(&table).unwrap();
//! assert!((result.tour.length - 10.0).abs() < 1e-9);
//! ```

pub mod error;
pub mod ga;
pub mod random;
pub mod tsp;

pub use error::{ConfigError, CoordinateError, EvolveError};
