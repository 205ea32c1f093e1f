//! Geometry descriptor handed to the rendering engine

use serde::{Deserialize, Serialize};

use super::bounds::BoundingVolume;
use super::buffers::{IndexBuffer, PositionBuffer};

/// Primitive topology of a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimitiveType {
    #[default]
    Triangles,
}

/// Positions, indices, topology and bounds of one drawable entity
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GeometryDescriptor {
    pub positions: PositionBuffer,
    pub indices: IndexBuffer,
    #[serde(rename = "primitiveType")]
    pub primitive_type: PrimitiveType,
    #[serde(rename = "boundingVolume")]
    pub bounding_volume: BoundingVolume,
}

impl GeometryDescriptor {
    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.indices.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.triangle_count()
    }
}

/// Bundle derived buffers into a descriptor with triangle-list topology
///
/// Does not cross-check indices against positions; that is the builder's job.
/// An empty descriptor is valid and only logged.
pub fn assemble_geometry(
    positions: PositionBuffer,
    indices: IndexBuffer,
    bounding_volume: BoundingVolume,
) -> GeometryDescriptor {
    assemble_with_warning(positions, indices, bounding_volume, true)
}

/// `assemble_geometry` with the empty-geometry warning switchable
pub(crate) fn assemble_with_warning(
    positions: PositionBuffer,
    indices: IndexBuffer,
    bounding_volume: BoundingVolume,
    warn_on_empty: bool,
) -> GeometryDescriptor {
    let descriptor = GeometryDescriptor {
        positions,
        indices,
        primitive_type: PrimitiveType::Triangles,
        bounding_volume,
    };
    if descriptor.is_empty() {
        if warn_on_empty {
            log::warn!("assembled empty geometry descriptor");
        }
    } else {
        log::debug!(
            "assembled geometry: {} vertices, {} triangles",
            descriptor.vertex_count(),
            descriptor.triangle_count()
        );
    }
    descriptor
}
