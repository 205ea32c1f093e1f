//! Geometry packing for globe entities
//!
//! Converts application-level geometry (model-space meshes and lat/long
//! footprints) into flat position/index buffers with a bounding volume,
//! ready for a vertex-indexed triangle-list draw call in an external
//! rendering engine.
//!
//! # Example
//! ```
//! use atlas_mesh::{MeshBuilder, Point3, Triangle};
//!
//! let points = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let geometry = MeshBuilder::default()
//!     .build(&points, &[Triangle::new(0, 1, 2)])
//!     .unwrap();
//! assert_eq!(geometry.indices.as_slice(), &[0, 1, 2]);
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod model;
pub mod render;
pub mod tessellation;

pub use config::BuildOptions;
pub use error::GeometryError;
pub use geometry::{
    assemble_geometry, build_index_buffer, build_position_buffer, compute_bounding_volume,
    BoundingSphere, BoundingVolume, GeoLocation, GeometryDescriptor, IndexBuffer, MeshBuilder,
    Point3, PositionBuffer, PositionPrecision, PrimitiveType, Triangle,
};
pub use model::{DisplayMode, Feature, FeatureArgs, FeatureIndex, Mesh, MeshSource, Polygon, ProvidesGeometry};
pub use render::{RenderContext, ReferenceFrame, PrimitiveCollection};
