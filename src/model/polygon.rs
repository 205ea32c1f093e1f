//! Footprint polygon entity

use crate::config::BuildOptions;
use crate::error::Result;
use crate::geometry::{GeoLocation, GeometryDescriptor, MeshBuilder};
use crate::render::Appearance;
use crate::tessellation::tessellate_footprint;

use super::ProvidesGeometry;

/// A flat outline on the globe, triangulated into geographic coordinates
#[derive(Debug, Clone)]
pub struct Polygon {
    id: String,
    vertices: Vec<GeoLocation>,
    holes: Vec<Vec<GeoLocation>>,
    elevation: f64,
    appearance: Appearance,
    options: BuildOptions,
    geometry: GeometryDescriptor,
}

impl Polygon {
    pub fn new(id: impl Into<String>, vertices: Vec<GeoLocation>, options: BuildOptions) -> Result<Self> {
        Self::from_parts(id, vertices, Vec::new(), 0.0, options)
    }

    /// Outline, holes and elevation in a single build
    pub fn from_parts(
        id: impl Into<String>,
        vertices: Vec<GeoLocation>,
        holes: Vec<Vec<GeoLocation>>,
        elevation: f64,
        options: BuildOptions,
    ) -> Result<Self> {
        let mut polygon = Self {
            id: id.into(),
            vertices,
            holes,
            elevation,
            appearance: Appearance::default(),
            options,
            geometry: GeometryDescriptor::default(),
        };
        polygon.geometry = polygon.build(&polygon.vertices, &polygon.holes, polygon.elevation)?;
        Ok(polygon)
    }

    pub fn with_holes(mut self, holes: Vec<Vec<GeoLocation>>) -> Result<Self> {
        self.geometry = self.build(&self.vertices, &holes, self.elevation)?;
        self.holes = holes;
        Ok(self)
    }

    pub fn with_elevation(mut self, elevation: f64) -> Result<Self> {
        self.geometry = self.build(&self.vertices, &self.holes, elevation)?;
        self.elevation = elevation;
        Ok(self)
    }

    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    fn build(&self, vertices: &[GeoLocation], holes: &[Vec<GeoLocation>], elevation: f64) -> Result<GeometryDescriptor> {
        let (points, triangles) =
            tessellate_footprint(vertices, holes, elevation, self.options.footprint_tolerance);
        MeshBuilder::new(self.options).build_named(&self.id, &points, &triangles)
    }

    pub fn vertices(&self) -> &[GeoLocation] {
        &self.vertices
    }

    pub fn holes(&self) -> &[Vec<GeoLocation>] {
        &self.holes
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    pub fn descriptor(&self) -> &GeometryDescriptor {
        &self.geometry
    }

    /// Replace the outline and rebuild
    pub fn set_vertices(&mut self, vertices: Vec<GeoLocation>) -> Result<()> {
        self.geometry = self.build(&vertices, &self.holes, self.elevation)?;
        self.vertices = vertices;
        Ok(())
    }

    pub fn rebuild(&mut self, options: BuildOptions) -> Result<()> {
        self.options = options;
        self.geometry = self.build(&self.vertices, &self.holes, self.elevation)?;
        Ok(())
    }

    /// (longitude, latitude) extent of the outline
    pub fn envelope(&self) -> Option<([f64; 2], [f64; 2])> {
        let first = self.vertices.first()?;
        let mut min = [first.longitude, first.latitude];
        let mut max = min;
        for v in &self.vertices[1..] {
            min[0] = min[0].min(v.longitude);
            min[1] = min[1].min(v.latitude);
            max[0] = max[0].max(v.longitude);
            max[1] = max[1].max(v.latitude);
        }
        Some((min, max))
    }
}

impl ProvidesGeometry for Polygon {
    fn id(&self) -> &str {
        &self.id
    }

    fn geometry(&self) -> Option<&GeometryDescriptor> {
        Some(&self.geometry)
    }

    fn appearance(&self) -> Appearance {
        self.appearance
    }
}
