//! Seeded random source shared by every stochastic step of a run.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from a 64-bit seed.
///
/// Two generators built from the same seed yield identical streams, which
/// is what makes a whole run reproducible.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
