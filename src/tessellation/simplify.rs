//! Ring simplification
//!
//! Douglas-Peucker over the (longitude, latitude) plane. Elevation is
//! carried along but does not influence which vertices are kept.

use crate::geometry::GeoLocation;

/// Douglas-Peucker simplification
/// Reduces number of vertices while keeping the outline within tolerance
pub fn douglas_peucker(points: &[GeoLocation], tolerance: f64) -> Vec<GeoLocation> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];
    let mut dmax = 0.0;
    let mut index = 0;

    for (i, p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = point_segment_distance(p, &first, &last);
        if d > dmax {
            dmax = d;
            index = i;
        }
    }

    if dmax > tolerance {
        let mut left = douglas_peucker(&points[0..=index], tolerance);
        let right = douglas_peucker(&points[index..], tolerance);
        left.pop(); // shared vertex
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

/// Perpendicular distance from `p` to segment `a`-`b` in degrees
fn point_segment_distance(p: &GeoLocation, a: &GeoLocation, b: &GeoLocation) -> f64 {
    let dx = b.longitude - a.longitude;
    let dy = b.latitude - a.latitude;
    let len_sq = dx * dx + dy * dy;

    if len_sq < 1e-20 {
        return ((p.longitude - a.longitude).powi(2) + (p.latitude - a.latitude).powi(2)).sqrt();
    }

    let t = (((p.longitude - a.longitude) * dx + (p.latitude - a.latitude) * dy) / len_sq).clamp(0.0, 1.0);
    let proj_x = a.longitude + t * dx;
    let proj_y = a.latitude + t * dy;

    ((p.longitude - proj_x).powi(2) + (p.latitude - proj_y).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(lon: f64, lat: f64) -> GeoLocation {
        GeoLocation::new(lat, lon, 0.0)
    }

    #[test]
    fn test_collinear_points_collapse() {
        let line = [loc(0.0, 0.0), loc(1.0, 0.0001), loc(2.0, 0.0), loc(3.0, 0.0)];
        let simplified = douglas_peucker(&line, 0.01);
        assert_eq!(simplified, vec![loc(0.0, 0.0), loc(3.0, 0.0)]);
    }

    #[test]
    fn test_corner_is_kept() {
        let line = [loc(0.0, 0.0), loc(1.0, 0.0), loc(1.0, 1.0)];
        assert_eq!(douglas_peucker(&line, 0.01).len(), 3);
    }
}
