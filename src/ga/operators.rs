//! Permutation crossover and mutation operators.
//!
//! Every operator here keeps tours valid: children and mutants are always
//! permutations of their parents' point slots.
//!
//! # Crossover
//!
//! - [`OrderedCrossover`] (OX): Davis (1985) — preserves relative order
//! - [`PartiallyMatchedCrossover`] (PMX): Goldberg & Lingle (1985) —
//!   preserves absolute position
//!
//! # Mutation
//!
//! - [`ShuffleIndexes`]: per-position swap with another position
//! - [`Inversion`]: reverse a random segment (2-opt move)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"

use super::types::{Crossover, Mutation};
use crate::error::ConfigError;
use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Order Crossover (OX).
///
/// Two distinct cut points bound a segment `[start, end]` of at least two
/// positions, copied verbatim from one parent; the remaining positions are filled, starting after `end` and wrapping
/// around, with the other parent's points in the order they appear from
/// the same position, skipping points already in the segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderedCrossover;

impl Crossover for OrderedCrossover {
    fn crossover<R: Rng>(
        &self,
        parent1: &[usize],
        parent2: &[usize],
        rng: &mut R,
    ) -> (Vec<usize>, Vec<usize>) {
        check_parents(parent1, parent2);
        if parent1.len() < 2 {
            return (parent1.to_vec(), parent2.to_vec());
        }
        let (start, end) = distinct_cut_points(parent1.len(), rng);
        order_crossover_at(parent1, parent2, start, end)
    }
}

/// OX with explicit cut points; the segment `[start, end]` is inclusive.
///
/// # Panics
/// Panics if the parents differ in length or `start > end` or `end` is out
/// of range.
pub fn order_crossover_at(
    parent1: &[usize],
    parent2: &[usize],
    start: usize,
    end: usize,
) -> (Vec<usize>, Vec<usize>) {
    check_parents(parent1, parent2);
    assert!(
        start <= end && end < parent1.len(),
        "invalid cut points [{start}, {end}] for length {}",
        parent1.len()
    );
    (
        ox_child(parent1, parent2, start, end),
        ox_child(parent2, parent1, start, end),
    )
}

fn ox_child(keeper: &[usize], filler: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = keeper.len();
    let mut child = keeper.to_vec();
    let mut taken = vec![false; n];
    for &slot in &keeper[start..=end] {
        taken[slot] = true;
    }

    let mut write = (end + 1) % n;
    for &slot in filler[end + 1..].iter().chain(&filler[..=end]) {
        if !taken[slot] {
            child[write] = slot;
            write = (write + 1) % n;
        }
    }
    child
}

/// Partially Mapped Crossover (PMX).
///
/// The segment is copied from one parent; each point the other parent
/// holds inside the segment is placed by following the segment mapping
/// until a position outside the segment is found; everything else is
/// inherited positionally from the other parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartiallyMatchedCrossover;

impl Crossover for PartiallyMatchedCrossover {
    fn crossover<R: Rng>(
        &self,
        parent1: &[usize],
        parent2: &[usize],
        rng: &mut R,
    ) -> (Vec<usize>, Vec<usize>) {
        check_parents(parent1, parent2);
        if parent1.len() < 2 {
            return (parent1.to_vec(), parent2.to_vec());
        }
        let (start, end) = random_segment(parent1.len(), rng);
        (
            pmx_child(parent1, parent2, start, end),
            pmx_child(parent2, parent1, start, end),
        )
    }
}

fn pmx_child(keeper: &[usize], filler: &[usize], start: usize, end: usize) -> Vec<usize> {
    const EMPTY: usize = usize::MAX;
    let n = keeper.len();
    let mut filler_pos = vec![0; n];
    for (pos, &slot) in filler.iter().enumerate() {
        filler_pos[slot] = pos;
    }

    let mut child = vec![EMPTY; n];
    let mut placed = vec![false; n];
    for pos in start..=end {
        child[pos] = keeper[pos];
        placed[keeper[pos]] = true;
    }

    for pos in start..=end {
        let slot = filler[pos];
        if placed[slot] {
            continue;
        }
        let mut target = pos;
        while (start..=end).contains(&target) {
            target = filler_pos[keeper[target]];
        }
        child[target] = slot;
        placed[slot] = true;
    }

    for (pos, cell) in child.iter_mut().enumerate() {
        if *cell == EMPTY {
            *cell = filler[pos];
        }
    }
    child
}

// ============================================================================
// Mutation
// ============================================================================

/// Index-shuffle mutation.
///
/// Each position is, with probability `indpb`, swapped with a uniformly
/// chosen *other* position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShuffleIndexes {
    indpb: f64,
}

impl ShuffleIndexes {
    pub fn new(indpb: f64) -> Self {
        Self { indpb }
    }

    pub fn indpb(&self) -> f64 {
        self.indpb
    }
}

impl Default for ShuffleIndexes {
    fn default() -> Self {
        Self::new(0.05)
    }
}

impl Mutation for ShuffleIndexes {
    fn mutate<R: Rng>(&self, genome: &mut [usize], rng: &mut R) -> bool {
        let n = genome.len();
        if n < 2 {
            return false;
        }
        let mut changed = false;
        for i in 0..n {
            if rng.random_bool(self.indpb) {
                let mut j = rng.random_range(0..n - 1);
                if j >= i {
                    j += 1;
                }
                genome.swap(i, j);
                changed = true;
            }
        }
        changed
    }

    fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_probability("indpb", self.indpb)
    }
}

/// Inversion mutation: reverse a random segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inversion;

impl Mutation for Inversion {
    fn mutate<R: Rng>(&self, genome: &mut [usize], rng: &mut R) -> bool {
        if genome.len() < 2 {
            return false;
        }
        let (start, end) = random_segment(genome.len(), rng);
        genome[start..=end].reverse();
        start < end
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn check_parents(parent1: &[usize], parent2: &[usize]) {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );
}

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    (a.min(b), a.max(b))
}

/// Two distinct positions within `0..n`, ordered, so `start < end`.
///
/// # Panics
/// Panics if `n < 2`.
fn distinct_cut_points<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    (a.min(b), a.max(b))
}
