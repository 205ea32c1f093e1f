//! Rendering engine seam
//!
//! The engine is reached only through an explicitly passed `RenderContext`.
//! It supplies the model-to-world transform and accepts finished primitives;
//! everything it does with them is outside this crate.

use serde::Serialize;

use crate::geometry::{GeoLocation, GeometryDescriptor};

/// Column-major 4x4 matrix
pub type Matrix4 = [f64; 16];

pub const IDENTITY_MATRIX: Matrix4 = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

/// Provides the model matrix that places model-space geometry on the globe
pub trait ReferenceFrame {
    fn model_matrix(&self, location: &GeoLocation) -> Matrix4;
}

/// Frame that leaves geometry in model space
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityFrame;

impl ReferenceFrame for IdentityFrame {
    fn model_matrix(&self, _location: &GeoLocation) -> Matrix4 {
        IDENTITY_MATRIX
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Appearance {
    pub color: [f32; 4],
    pub flat: bool,
    pub translucent: bool,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            flat: true,
            translucent: false,
        }
    }
}

/// Everything the engine needs to draw one entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimitiveRequest {
    pub id: String,
    pub geometry: GeometryDescriptor,
    #[serde(rename = "modelMatrix")]
    pub model_matrix: Matrix4,
    pub appearance: Appearance,
}

/// Opaque handle returned by the engine for an added primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveHandle(pub u64);

/// The engine's scene primitive collection
pub trait PrimitiveCollection {
    fn add(&mut self, request: PrimitiveRequest) -> PrimitiveHandle;
}

/// Collection that keeps every request in memory, for headless use and tests
#[derive(Debug, Default)]
pub struct RecordingCollection {
    pub primitives: Vec<PrimitiveRequest>,
}

impl PrimitiveCollection for RecordingCollection {
    fn add(&mut self, request: PrimitiveRequest) -> PrimitiveHandle {
        self.primitives.push(request);
        PrimitiveHandle(self.primitives.len() as u64 - 1)
    }
}

/// Borrowed view of the engine passed to entities that create primitives
pub struct RenderContext<'a> {
    pub frame: &'a dyn ReferenceFrame,
    pub primitives: &'a mut dyn PrimitiveCollection,
}

impl<'a> RenderContext<'a> {
    pub fn new(frame: &'a dyn ReferenceFrame, primitives: &'a mut dyn PrimitiveCollection) -> Self {
        Self { frame, primitives }
    }
}
