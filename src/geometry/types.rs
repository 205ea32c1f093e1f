//! Core geometry types
//!
//! Points, triangles and geographic locations used as builder input.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A 3D point in model space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_squared(&self, other: &Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    pub fn distance(&self, other: &Point3) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn midpoint(&self, other: &Point3) -> Point3 {
        Point3::new(
            (self.x + other.x) * 0.5,
            (self.y + other.y) * 0.5,
            (self.z + other.z) * 0.5,
        )
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(v: [f64; 3]) -> Self {
        Point3::new(v[0], v[1], v[2])
    }
}

impl From<Point3> for [f64; 3] {
    fn from(p: Point3) -> Self {
        [p.x, p.y, p.z]
    }
}

/// Three vertex indices in winding order
///
/// Indices are signed so that negative input can be reported instead of
/// wrapping around. Range checking happens in `build_index_buffer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i64; 3]", into = "[i64; 3]")]
pub struct Triangle(pub [i64; 3]);

impl Triangle {
    pub const fn new(a: i64, b: i64, c: i64) -> Self {
        Triangle([a, b, c])
    }

    pub fn indices(&self) -> [i64; 3] {
        self.0
    }
}

impl From<[i64; 3]> for Triangle {
    fn from(v: [i64; 3]) -> Self {
        Triangle(v)
    }
}

impl From<Triangle> for [i64; 3] {
    fn from(t: Triangle) -> Self {
        t.0
    }
}

impl From<[u32; 3]> for Triangle {
    fn from(v: [u32; 3]) -> Self {
        Triangle([v[0] as i64, v[1] as i64, v[2] as i64])
    }
}

impl TryFrom<&[i64]> for Triangle {
    type Error = GeometryError;

    fn try_from(value: &[i64]) -> Result<Self, Self::Error> {
        match value {
            [a, b, c] => Ok(Triangle([*a, *b, *c])),
            _ => Err(GeometryError::MalformedTriangle {
                triangle: 0,
                components: value.len(),
            }),
        }
    }
}

/// Group a flat index list into triangles
///
/// Fails on a trailing partial triangle.
pub fn triangles_from_flat(indices: &[i64]) -> Result<Vec<Triangle>, GeometryError> {
    if indices.len() % 3 != 0 {
        return Err(GeometryError::MalformedTriangle {
            triangle: indices.len() / 3,
            components: indices.len() % 3,
        });
    }
    Ok(indices
        .chunks_exact(3)
        .map(|c| Triangle([c[0], c[1], c[2]]))
        .collect())
}

/// Group nested index runs (e.g. parsed JSON arrays) into triangles
///
/// Each run must have exactly three components.
pub fn triangles_from_runs<R: AsRef<[i64]>>(runs: &[R]) -> Result<Vec<Triangle>, GeometryError> {
    runs.iter()
        .enumerate()
        .map(|(i, run)| {
            Triangle::try_from(run.as_ref()).map_err(|_| GeometryError::MalformedTriangle {
                triangle: i,
                components: run.as_ref().len(),
            })
        })
        .collect()
}

/// A location on the globe in degrees, with elevation in metres
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation: f64,
}

impl GeoLocation {
    pub const fn new(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self { latitude, longitude, elevation }
    }
}
