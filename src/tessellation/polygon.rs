//! Footprint triangulation using the earcut algorithm
//!
//! Rings are triangulated in the (longitude, latitude) plane. The resulting
//! points keep longitude/latitude as x/y and carry the footprint elevation
//! as z; projecting them onto the globe is left to the rendering engine.

use crate::geometry::{GeoLocation, Point3, Triangle};

use super::simplify::douglas_peucker;

/// Drop the repeated closing vertex of an explicitly closed ring
fn open_ring(ring: &[GeoLocation]) -> &[GeoLocation] {
    match ring {
        [first, .., last] if ring.len() > 3 && first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

fn prepare_ring(ring: &[GeoLocation], tolerance: f64) -> Vec<GeoLocation> {
    let ring = open_ring(ring);
    if tolerance > 0.0 {
        douglas_peucker(ring, tolerance)
    } else {
        ring.to_vec()
    }
}

/// Triangulate a footprint outline with optional holes
///
/// Holes with fewer than three vertices are skipped. An outline with fewer
/// than three vertices yields no geometry.
pub fn tessellate_footprint(
    outer: &[GeoLocation],
    holes: &[Vec<GeoLocation>],
    elevation: f64,
    tolerance: f64,
) -> (Vec<Point3>, Vec<Triangle>) {
    let outer = prepare_ring(outer, tolerance);
    if outer.len() < 3 {
        return (Vec::new(), Vec::new());
    }

    let mut flat_coords: Vec<f64> = Vec::with_capacity(outer.len() * 2);
    let mut hole_indices: Vec<usize> = Vec::new();

    for p in &outer {
        flat_coords.push(p.longitude);
        flat_coords.push(p.latitude);
    }

    for hole in holes {
        let hole = prepare_ring(hole, tolerance);
        if hole.len() < 3 {
            continue; // degenerate
        }
        hole_indices.push(flat_coords.len() / 2);
        for p in &hole {
            flat_coords.push(p.longitude);
            flat_coords.push(p.latitude);
        }
    }

    let indices = match earcutr::earcut(&flat_coords, &hole_indices, 2) {
        Ok(indices) => indices,
        Err(_) => {
            log::warn!("footprint triangulation failed for {} vertices", flat_coords.len() / 2);
            Vec::new()
        }
    };

    let points = flat_coords
        .chunks_exact(2)
        .map(|c| Point3::new(c[0], c[1], elevation))
        .collect();
    let triangles = indices
        .chunks_exact(3)
        .map(|c| Triangle::new(c[0] as i64, c[1] as i64, c[2] as i64))
        .collect();

    (points, triangles)
}
