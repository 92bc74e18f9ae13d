//! Evolves a tour over 15 random cities and prints the result.
//!
//! Run with `cargo run --example random_tour`.

use tsp_evo::ga::{EvolutionConfig, EvolutionEngine};
use tsp_evo::random::create_rng;
use tsp_evo::tsp::CoordinateTable;
use tsp_evo::EvolveError;

const NUM_CITIES: usize = 15;
const MAP_EXTENT: u32 = 100;
const SEED: u64 = 42;

fn main() -> Result<(), EvolveError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut rng = create_rng(SEED);
    let cities = CoordinateTable::random(NUM_CITIES, MAP_EXTENT, &mut rng)?;

    let config = EvolutionConfig::default()
        .with_population_size(300)
        .with_max_generations(100)
        .with_crossover_rate(0.5)
        .with_mutation_rate(0.2)
        .with_seed(SEED);
    let result = EvolutionEngine::new(config)?.run(&cities)?;

    println!("route:  {:?}", result.tour.points);
    println!("length: {:.3}", result.tour.length);
    for id in &result.tour.points {
        if let Some(c) = cities.get(*id) {
            println!("  {id:>2} ({:>5.1}, {:>5.1})", c.x, c.y);
        }
    }
    Ok(())
}
