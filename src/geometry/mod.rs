//! Geometry module
//!
//! Converts structured mesh data into renderer-ready buffers.
//!
//! # Submodules
//! - `types` - Input primitives (Point3, Triangle, GeoLocation)
//! - `buffers` - Flat position/index buffers and their encodings
//! - `bounds` - Bounding sphere and box derivation
//! - `descriptor` - The aggregate handed to the renderer
//! - `builder` - The points + triangles -> descriptor pipeline
//! - `binary` - Packed little-endian export

mod types;
mod buffers;
mod bounds;
mod descriptor;
mod builder;
mod binary;

pub use types::{
    Point3,
    Triangle,
    GeoLocation,
    triangles_from_flat,
    triangles_from_runs,
};

pub use buffers::{
    PositionPrecision,
    PositionData,
    PositionBuffer,
    IndexBuffer,
};

pub use bounds::{
    BoundingSphere,
    BoundingBox,
    BoundingVolume,
    compute_bounding_volume,
    compute_bounding_box,
};

pub use descriptor::{
    PrimitiveType,
    GeometryDescriptor,
    assemble_geometry,
};

pub use builder::{
    MeshBuilder,
    build_position_buffer,
    build_index_buffer,
};

pub use binary::{MESH_MAGIC, MESH_VERSION};
