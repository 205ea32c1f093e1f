//! 3D mesh entity

use serde::{Deserialize, Serialize};

use crate::config::BuildOptions;
use crate::error::Result;
use crate::geometry::{
    triangles_from_runs, BoundingVolume, GeoLocation, GeometryDescriptor, MeshBuilder, Point3,
    Triangle,
};
use crate::render::Appearance;

use super::ProvidesGeometry;

/// Serialized mesh description, as read from JSON or MessagePack
///
/// Triangles are kept as loose runs so that malformed entries are reported
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub points: Vec<[f64; 3]>,
    #[serde(default)]
    pub triangles: Vec<Vec<i64>>,
    #[serde(default)]
    pub location: Option<GeoLocation>,
}

/// A mesh in model space with eagerly derived geometry
#[derive(Debug, Clone)]
pub struct Mesh {
    id: String,
    points: Vec<Point3>,
    triangles: Vec<Triangle>,
    location: Option<GeoLocation>,
    appearance: Appearance,
    builder: MeshBuilder,
    geometry: GeometryDescriptor,
}

impl Mesh {
    pub fn new(
        id: impl Into<String>,
        points: Vec<Point3>,
        triangles: Vec<Triangle>,
        options: BuildOptions,
    ) -> Result<Self> {
        let id = id.into();
        let builder = MeshBuilder::new(options);
        let geometry = builder.build_named(&id, &points, &triangles)?;
        Ok(Self {
            id,
            points,
            triangles,
            location: None,
            appearance: Appearance::default(),
            builder,
            geometry,
        })
    }

    /// Build from a source description; `fallback_id` is used when the
    /// source does not name itself
    pub fn from_source(source: &MeshSource, fallback_id: &str, options: BuildOptions) -> Result<Self> {
        let triangles = triangles_from_runs(&source.triangles)?;
        let points = source.points.iter().copied().map(Point3::from).collect();
        let id = source.id.clone().unwrap_or_else(|| fallback_id.to_string());
        let mut mesh = Mesh::new(id, points, triangles, options)?;
        mesh.location = source.location;
        Ok(mesh)
    }

    pub fn with_location(mut self, location: GeoLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn set_location(&mut self, location: Option<GeoLocation>) {
        self.location = location;
    }

    pub fn descriptor(&self) -> &GeometryDescriptor {
        &self.geometry
    }

    pub fn bounding_volume(&self) -> &BoundingVolume {
        &self.geometry.bounding_volume
    }

    /// Replace the vertex list and rebuild. On error the mesh is unchanged.
    pub fn set_positions(&mut self, points: Vec<Point3>) -> Result<()> {
        self.geometry = self.builder.build_named(&self.id, &points, &self.triangles)?;
        self.points = points;
        Ok(())
    }

    /// Replace the triangle list and rebuild. On error the mesh is unchanged.
    pub fn set_triangles(&mut self, triangles: Vec<Triangle>) -> Result<()> {
        self.geometry = self.builder.build_named(&self.id, &self.points, &triangles)?;
        self.triangles = triangles;
        Ok(())
    }

    /// Rebuild derived geometry with different options
    pub fn rebuild(&mut self, options: BuildOptions) -> Result<()> {
        let builder = MeshBuilder::new(options);
        self.geometry = builder.build_named(&self.id, &self.points, &self.triangles)?;
        self.builder = builder;
        Ok(())
    }
}

impl ProvidesGeometry for Mesh {
    fn id(&self) -> &str {
        &self.id
    }

    fn geometry(&self) -> Option<&GeometryDescriptor> {
        Some(&self.geometry)
    }

    fn location(&self) -> Option<&GeoLocation> {
        self.location.as_ref()
    }

    fn appearance(&self) -> Appearance {
        self.appearance
    }
}
