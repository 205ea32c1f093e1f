//! Bounding volumes over position buffers
//!
//! The sphere is the smaller of two candidates: Ritter's incremental sphere
//! seeded with the widest axis-extreme pair, and the naive sphere centred on
//! the axis-aligned box. Neither is guaranteed minimal, but both enclose
//! every vertex.

use serde::{Deserialize, Serialize};

use super::buffers::PositionBuffer;
use super::types::Point3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    pub center: Point3,
    pub radius: f64,
}

impl BoundingSphere {
    pub fn contains(&self, p: &Point3) -> bool {
        // Small slack for accumulated rounding in the Ritter update
        self.center.distance(p) <= self.radius * (1.0 + 1e-9) + 1e-12
    }
}

/// Axis-aligned box over model-space positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox {
    pub fn center(&self) -> Point3 {
        self.min.midpoint(&self.max)
    }

    pub fn contains(&self, p: &Point3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

/// Derived bounding volume of a descriptor
///
/// `Empty` is the documented result for a buffer with no vertices.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BoundingVolume {
    #[default]
    Empty,
    Sphere(BoundingSphere),
}

impl BoundingVolume {
    pub fn is_empty(&self) -> bool {
        matches!(self, BoundingVolume::Empty)
    }

    pub fn sphere(&self) -> Option<&BoundingSphere> {
        match self {
            BoundingVolume::Sphere(s) => Some(s),
            BoundingVolume::Empty => None,
        }
    }
}

/// Axis-aligned box over all vertices, `None` for an empty buffer
pub fn compute_bounding_box(positions: &PositionBuffer) -> Option<BoundingBox> {
    let mut points = positions.points();
    let first = points.next()?;
    let mut min = first;
    let mut max = first;
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        min.z = min.z.min(p.z);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        max.z = max.z.max(p.z);
    }
    Some(BoundingBox { min, max })
}

/// Enclosing sphere over all vertices
pub fn compute_bounding_volume(positions: &PositionBuffer) -> BoundingVolume {
    let mut points = positions.points();
    let Some(first) = points.next() else {
        return BoundingVolume::Empty;
    };

    // Points holding the extreme value on each axis
    let (mut x_min, mut x_max) = (first, first);
    let (mut y_min, mut y_max) = (first, first);
    let (mut z_min, mut z_max) = (first, first);
    for p in points {
        if p.x < x_min.x { x_min = p; }
        if p.x > x_max.x { x_max = p; }
        if p.y < y_min.y { y_min = p; }
        if p.y > y_max.y { y_max = p; }
        if p.z < z_min.z { z_min = p; }
        if p.z > z_max.z { z_max = p; }
    }

    // Seed Ritter's sphere with the widest pair
    let mut diameter = (x_min, x_max);
    let mut max_span = x_min.distance_squared(&x_max);
    let y_span = y_min.distance_squared(&y_max);
    if y_span > max_span {
        max_span = y_span;
        diameter = (y_min, y_max);
    }
    if z_min.distance_squared(&z_max) > max_span {
        diameter = (z_min, z_max);
    }

    let mut ritter_center = diameter.0.midpoint(&diameter.1);
    let mut ritter_radius = diameter.1.distance(&ritter_center);
    let mut radius_squared = ritter_radius * ritter_radius;

    let naive_center = Point3::new(
        (x_min.x + x_max.x) * 0.5,
        (y_min.y + y_max.y) * 0.5,
        (z_min.z + z_max.z) * 0.5,
    );
    let mut naive_radius: f64 = 0.0;

    for p in positions.points() {
        naive_radius = naive_radius.max(p.distance(&naive_center));

        let old_to_point_squared = p.distance_squared(&ritter_center);
        if old_to_point_squared > radius_squared {
            let old_to_point = old_to_point_squared.sqrt();
            ritter_radius = (ritter_radius + old_to_point) * 0.5;
            radius_squared = ritter_radius * ritter_radius;
            let shift = old_to_point - ritter_radius;
            ritter_center = Point3::new(
                (ritter_radius * ritter_center.x + shift * p.x) / old_to_point,
                (ritter_radius * ritter_center.y + shift * p.y) / old_to_point,
                (ritter_radius * ritter_center.z + shift * p.z) / old_to_point,
            );
        }
    }

    let sphere = if ritter_radius < naive_radius {
        BoundingSphere { center: ritter_center, radius: ritter_radius }
    } else {
        BoundingSphere { center: naive_center, radius: naive_radius }
    };
    BoundingVolume::Sphere(sphere)
}
