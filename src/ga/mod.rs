//! Genetic search for short closed tours.
//!
//! Individuals are permutations of point slots; fitness is the closed-tour
//! length (lower is better). A run is fully generational with no elitism:
//! every generation is rebuilt from tournament winners, recombined and
//! mutated, then re-evaluated where it changed.
//!
//! # Key Types
//!
//! - [`EvolutionConfig`]: run parameters (population size, rates, seed)
//! - [`EvolutionEngine`]: executes the generational loop
//! - [`Population`] / [`Individual`]: the evolving state
//! - [`EvolutionResult`] / [`Tour`]: the shortest tour found plus statistics
//!
//! # Operators
//!
//! Strategies plug in through the [`Selection`], [`Crossover`] and
//! [`Mutation`] traits:
//!
//! - [`Tournament`] selection
//! - [`OrderedCrossover`] (default) and [`PartiallyMatchedCrossover`]
//! - [`ShuffleIndexes`] (default) and [`Inversion`] mutation
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Larrañaga et al. (1999), "Genetic Algorithms for the Travelling Salesman
//!   Problem: A Review of Representations and Operators"

mod config;
pub mod operators;
mod population;
mod runner;
mod selection;
mod types;

pub use config::EvolutionConfig;
pub use operators::{
    order_crossover_at, Inversion, OrderedCrossover, PartiallyMatchedCrossover, ShuffleIndexes,
};
pub use population::Population;
pub use runner::{EvolutionEngine, EvolutionResult, GenerationStats, Tour};
pub use selection::Tournament;
pub use types::{Crossover, Fitness, Individual, Mutation, Selection};
