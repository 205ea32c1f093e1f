//! Domain entities
//!
//! Entities own their source data and hold a derived `GeometryDescriptor`.
//! They never hold a reference to the renderer; primitives are created by
//! passing a `RenderContext` explicitly.
//!
//! # Submodules
//! - `mesh` - 3D mesh from points and triangles
//! - `polygon` - 2D footprint outline with optional holes
//! - `feature` - Entity combining an optional footprint and mesh
//! - `index` - Ordered feature store with an R-tree over footprints

mod mesh;
mod polygon;
mod feature;
mod index;

use crate::error::{GeometryError, Result};
use crate::geometry::{GeoLocation, GeometryDescriptor};
use crate::render::{Appearance, PrimitiveHandle, PrimitiveRequest, RenderContext, IDENTITY_MATRIX};

pub use mesh::{Mesh, MeshSource};
pub use polygon::Polygon;
pub use feature::{DisplayMode, Feature, FeatureArgs};
pub use index::FeatureIndex;

/// Capability shared by everything that can be drawn
pub trait ProvidesGeometry {
    fn id(&self) -> &str;

    fn geometry(&self) -> Option<&GeometryDescriptor>;

    /// Anchor on the globe; `None` means the geometry is already geographic
    fn location(&self) -> Option<&GeoLocation> {
        None
    }

    fn appearance(&self) -> Appearance {
        Appearance::default()
    }

    /// Hand the current geometry to the engine's primitive collection
    fn create_primitive(&self, ctx: &mut RenderContext<'_>) -> Result<PrimitiveHandle> {
        let geometry = match self.geometry() {
            Some(g) if !g.is_empty() => g.clone(),
            _ => return Err(GeometryError::EmptyGeometry { id: self.id().to_string() }),
        };
        let model_matrix = match self.location() {
            Some(location) => ctx.frame.model_matrix(location),
            None => IDENTITY_MATRIX,
        };
        log::debug!(
            "adding primitive '{}' ({} vertices, {} triangles)",
            self.id(),
            geometry.vertex_count(),
            geometry.triangle_count()
        );
        Ok(ctx.primitives.add(PrimitiveRequest {
            id: self.id().to_string(),
            geometry,
            model_matrix,
            appearance: self.appearance(),
        }))
    }
}
