//! MeshBuffer builder
//!
//! Flattens points and triangle triples into renderer-ready buffers and
//! derives the bounding volume. Every step is a pure function; `MeshBuilder`
//! just runs them in order with a fixed set of options.

use std::env;

use crate::config::BuildOptions;
use crate::error::{GeometryError, Result};

use super::bounds::compute_bounding_volume;
use super::buffers::{IndexBuffer, PositionBuffer, PositionData, PositionPrecision};
use super::descriptor::{assemble_with_warning, GeometryDescriptor};
use super::types::{Point3, Triangle};

/// Largest vertex count addressable by a u32 index buffer
const MAX_VERTEX_COUNT: usize = u32::MAX as usize;

/// Flatten points into `[x0, y0, z0, x1, ...]` using the given encoding
pub fn build_position_buffer(points: &[Point3], precision: PositionPrecision) -> PositionBuffer {
    let coords = points.iter().flat_map(|p| [p.x, p.y, p.z]);
    let data = match precision {
        PositionPrecision::Float64 => PositionData::Float64(coords.collect()),
        PositionPrecision::Float32 => PositionData::Float32(coords.map(|c| c as f32).collect()),
        // `as` truncates toward zero and saturates, NaN -> 0
        PositionPrecision::Uint16 => PositionData::Uint16(coords.map(|c| c as u16).collect()),
    };
    // Length is 3 * points.len() by construction
    PositionBuffer::from_data_unchecked(data)
}

/// Flatten triangles into a u32 index buffer, preserving winding order
///
/// Negative indices are always rejected. When `vertex_count` is known every
/// index must also be below it.
pub fn build_index_buffer(triangles: &[Triangle], vertex_count: Option<usize>) -> Result<IndexBuffer> {
    let limit = vertex_count.unwrap_or(MAX_VERTEX_COUNT).min(MAX_VERTEX_COUNT);
    let mut indices = Vec::with_capacity(triangles.len() * 3);
    for (t, triangle) in triangles.iter().enumerate() {
        for index in triangle.indices() {
            if index < 0 || index as u64 >= limit as u64 {
                return Err(GeometryError::InvalidIndex {
                    triangle: t,
                    index,
                    vertex_count: limit,
                });
            }
            indices.push(index as u32);
        }
    }
    Ok(IndexBuffer::from_vec_unchecked(indices))
}

fn should_dump_geometry(id: &str) -> bool {
    match env::var("ATLAS_MESH_DEBUG") {
        Ok(val) => val.trim().is_empty() || val.split(',').any(|entry| entry.trim() == id),
        Err(_) => false,
    }
}

fn debug_dump_geometry(id: &str, descriptor: &GeometryDescriptor) {
    if !should_dump_geometry(id) {
        return;
    }
    log::debug!(
        "geometry '{}': {} vertices, {} triangles, bounds {:?}",
        id,
        descriptor.vertex_count(),
        descriptor.triangle_count(),
        descriptor.bounding_volume
    );
    let positions = &descriptor.positions;
    for (t, [a, b, c]) in descriptor.indices.triangles().enumerate().take(200) {
        let (Some(pa), Some(pb), Some(pc)) = (
            positions.point(a as usize),
            positions.point(b as usize),
            positions.point(c as usize),
        ) else {
            continue;
        };
        log::debug!(
            "  triangle {}: [{:.3}, {:.3}, {:.3}], [{:.3}, {:.3}, {:.3}], [{:.3}, {:.3}, {:.3}]",
            t, pa.x, pa.y, pa.z, pb.x, pb.y, pb.z, pc.x, pc.y, pc.z
        );
    }
}

/// Runs the full points + triangles -> descriptor pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshBuilder {
    options: BuildOptions,
}

impl MeshBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    pub fn build(&self, points: &[Point3], triangles: &[Triangle]) -> Result<GeometryDescriptor> {
        let positions = build_position_buffer(points, self.options.precision);
        let indices = build_index_buffer(triangles, Some(positions.vertex_count()))?;
        // Bounds follow the encoded positions, so lossy encodings are reflected
        let bounding_volume = compute_bounding_volume(&positions);
        Ok(assemble_with_warning(
            positions,
            indices,
            bounding_volume,
            self.options.warn_on_empty,
        ))
    }

    /// Build and log the result under `id`
    pub fn build_named(&self, id: &str, points: &[Point3], triangles: &[Triangle]) -> Result<GeometryDescriptor> {
        let descriptor = self.build(points, triangles)?;
        debug_dump_geometry(id, &descriptor);
        Ok(descriptor)
    }
}
