//! Point generation: produces uniformly distributed 3D point sets for loading.

use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default RNG seed for deterministic, reproducible benchmark runs.
pub const DEFAULT_SEED: u64 = 42;

/// A single 3D point. Stored as one row of the `points` table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance to `other`. Comparisons against a squared
    /// radius avoid the square root.
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }
}

/// Half-open coordinate range `[min, max)` applied to every axis.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Requires `min < max`; the comparison also rejects NaN endpoints.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !(min < max) {
            return Err(Error::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }
}

/// Generate `count` independent points uniformly distributed in `bounds`³.
///
/// Deterministic for a given seed. A count of zero yields an empty set.
pub fn generate_uniform(count: usize, bounds: Bounds, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Point::new(
                rng.gen_range(bounds.min..bounds.max),
                rng.gen_range(bounds.min..bounds.max),
                rng.gen_range(bounds.min..bounds.max),
            )
        })
        .collect()
}
