//! Sphere query strategies: exact distance filtering with and without an
//! index-backed bounding-box prefilter.
//!
//! Two implementations are provided behind [`SphereStrategy`]:
//! - [`FullScan`] — the distance predicate runs over every stored row
//! - [`Prefiltered`] — a bounding-box range query shrinks the candidate
//!   set before the exact distance test
//!
//! Both must return identical sets for any center and radius.

use crate::error::{Error, Result};
use crate::generate::Point;
use crate::store::PointStore;

/// Axis-aligned bounding cube spanning `center ± radius` on every axis.
///
/// Always a superset filter for the sphere with the same center and
/// radius: a point inside the sphere cannot fall outside the cube.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub zmin: f64,
    pub zmax: f64,
}

impl BoundingBox {
    /// Derive the cube for a query center and radius. A zero radius is
    /// valid and selects exact coordinate matches; a negative radius is
    /// rejected.
    pub fn around(center: Point, radius: f64) -> Result<Self> {
        validate_radius(radius)?;
        Ok(Self {
            xmin: center.x - radius,
            xmax: center.x + radius,
            ymin: center.y - radius,
            ymax: center.y + radius,
            zmin: center.z - radius,
            zmax: center.z + radius,
        })
    }

    /// Whether `p` lies inside the box, boundary faces included.
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.xmin
            && p.x <= self.xmax
            && p.y >= self.ymin
            && p.y <= self.ymax
            && p.z >= self.zmin
            && p.z <= self.zmax
    }
}

/// Trait implemented by each sphere-query strategy.
pub trait SphereStrategy {
    /// Human-readable name for reports.
    fn name(&self) -> &'static str;

    /// All stored points within `radius` of `center`. Points at exactly
    /// distance `radius` are included.
    fn query(&self, store: &PointStore, center: Point, radius: f64) -> Result<Vec<Point>>;
}

/// Full-table scan: SQLite evaluates the squared-distance predicate on
/// every row.
pub struct FullScan;

impl FullScan {
    pub fn new() -> Self {
        Self
    }
}

impl SphereStrategy for FullScan {
    fn name(&self) -> &'static str {
        "full-scan"
    }

    fn query(&self, store: &PointStore, center: Point, radius: f64) -> Result<Vec<Point>> {
        validate_radius(radius)?;
        store.query_ball(center, radius)
    }
}

/// Bounding-box prefilter: the index-backed range query retrieves the
/// candidate cube, then the exact squared-distance test runs on the
/// candidates only. Hit count grows as r³ while candidate retrieval stays
/// index-accelerated, so this is the recommended default.
pub struct Prefiltered;

impl Prefiltered {
    pub fn new() -> Self {
        Self
    }
}

impl SphereStrategy for Prefiltered {
    fn name(&self) -> &'static str {
        "prefiltered"
    }

    fn query(&self, store: &PointStore, center: Point, radius: f64) -> Result<Vec<Point>> {
        let bbox = BoundingBox::around(center, radius)?;
        let r2 = radius * radius;
        let candidates = store.query_bbox(&bbox)?;
        Ok(candidates
            .into_iter()
            .filter(|p| p.distance_squared(&center) <= r2)
            .collect())
    }
}

fn validate_radius(radius: f64) -> Result<()> {
    // Rejects NaN as well.
    if !(radius >= 0.0) {
        return Err(Error::InvalidRadius(radius));
    }
    Ok(())
}
