//! Point coordinates and the Euclidean distance oracle.

use crate::error::{CoordinateError, EvolveError};
use rand::Rng;
use std::collections::BTreeMap;

/// Caller-facing handle of a point.
pub type PointId = usize;

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Coordinate) -> f64 {
        euclidean_distance(*self, *other)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Straight-line distance between two coordinates.
#[inline]
pub fn euclidean_distance(a: Coordinate, b: Coordinate) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Read-only mapping from [`PointId`] to [`Coordinate`].
///
/// Points are stored in ascending id order. Genomes refer to points by
/// their *slot* (position in that order, `0..len`), which keeps the
/// genetic operators working on dense indices whatever ids the caller
/// chose.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateTable {
    ids: Vec<PointId>,
    coords: Vec<Coordinate>,
}

impl CoordinateTable {
    /// Builds a table from `(id, coordinate)` pairs.
    ///
    /// Fails on an empty input, a repeated id, or a non-finite coordinate.
    pub fn new<I>(points: I) -> Result<Self, EvolveError>
    where
        I: IntoIterator<Item = (PointId, Coordinate)>,
    {
        let mut sorted = BTreeMap::new();
        for (id, coord) in points {
            if !(coord.x.is_finite() && coord.y.is_finite()) {
                return Err(CoordinateError::NonFinite {
                    id,
                    x: coord.x,
                    y: coord.y,
                }
                .into());
            }
            if sorted.insert(id, coord).is_some() {
                return Err(CoordinateError::DuplicatePoint(id).into());
            }
        }
        if sorted.is_empty() {
            return Err(CoordinateError::Empty.into());
        }

        let (ids, coords) = sorted.into_iter().unzip();
        Ok(Self { ids, coords })
    }

    /// Builds a table whose ids are the positions in `coords`.
    pub fn from_coordinates<I>(coords: I) -> Result<Self, EvolveError>
    where
        I: IntoIterator,
        I::Item: Into<Coordinate>,
    {
        Self::new(coords.into_iter().map(Into::<Coordinate>::into).enumerate())
    }

    /// Random integer-valued coordinates in `[0, extent]`, ids `0..count`.
    pub fn random<R: Rng>(count: usize, extent: u32, rng: &mut R) -> Result<Self, EvolveError> {
        Self::from_coordinates((0..count).map(|_| {
            Coordinate::new(
                f64::from(rng.random_range(0..=extent)),
                f64::from(rng.random_range(0..=extent)),
            )
        }))
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always `false` for a constructed table; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Looks up a coordinate by point id.
    pub fn get(&self, id: PointId) -> Option<Coordinate> {
        self.ids
            .binary_search(&id)
            .ok()
            .map(|slot| self.coords[slot])
    }

    /// Point id stored at `slot`.
    ///
    /// # Panics
    /// Panics if `slot >= len()`.
    pub fn point_id(&self, slot: usize) -> PointId {
        self.ids[slot]
    }

    /// Coordinate stored at `slot`.
    ///
    /// # Panics
    /// Panics if `slot >= len()`.
    pub fn coordinate(&self, slot: usize) -> Coordinate {
        self.coords[slot]
    }

    /// All point ids in slot order.
    pub fn ids(&self) -> &[PointId] {
        &self.ids
    }

    /// `(id, coordinate)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, Coordinate)> + '_ {
        self.ids.iter().copied().zip(self.coords.iter().copied())
    }
}
