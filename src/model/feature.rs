//! Feature entity: an optional footprint plus an optional 3D mesh

use serde::{Deserialize, Serialize};

use crate::config::BuildOptions;
use crate::error::{GeometryError, Result};
use crate::geometry::{GeoLocation, GeometryDescriptor};
use crate::render::{Appearance, PrimitiveHandle, RenderContext};

use super::{Mesh, MeshSource, Polygon, ProvidesGeometry};

/// Which child a feature draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Footprint,
    Mesh,
}

/// Construction arguments; absent parts are simply `None`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureArgs {
    pub vertices: Option<Vec<GeoLocation>>,
    pub holes: Vec<Vec<GeoLocation>>,
    pub elevation: f64,
    pub mesh: Option<MeshSource>,
    pub display_mode: DisplayMode,
}

#[derive(Debug, Clone)]
pub struct Feature {
    id: String,
    footprint: Option<Polygon>,
    mesh: Option<Mesh>,
    display_mode: DisplayMode,
}

impl Feature {
    pub fn new(id: impl Into<String>, args: FeatureArgs, options: BuildOptions) -> Result<Self> {
        let id = id.into();

        let footprint = match args.vertices {
            Some(vertices) => Some(Polygon::from_parts(
                format!("{}p", id),
                vertices,
                args.holes,
                args.elevation,
                options,
            )?),
            None => None,
        };

        let mesh = match &args.mesh {
            Some(source) => Some(Mesh::from_source(source, &format!("{}m", id), options)?),
            None => None,
        };

        log::debug!(
            "feature '{}': footprint={}, mesh={}",
            id,
            footprint.is_some(),
            mesh.is_some()
        );

        Ok(Self {
            id,
            footprint,
            mesh,
            display_mode: args.display_mode,
        })
    }

    pub fn footprint(&self) -> Option<&Polygon> {
        self.footprint.as_ref()
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    pub fn mesh_mut(&mut self) -> Option<&mut Mesh> {
        self.mesh.as_mut()
    }

    pub fn footprint_mut(&mut self) -> Option<&mut Polygon> {
        self.footprint.as_mut()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    /// The child that supplies geometry: the one selected by the display
    /// mode if it has any, otherwise the other one
    pub fn active(&self) -> Option<&dyn ProvidesGeometry> {
        let footprint = self.footprint.as_ref().map(|p| p as &dyn ProvidesGeometry);
        let mesh = self.mesh.as_ref().map(|m| m as &dyn ProvidesGeometry);
        let (preferred, fallback) = match self.display_mode {
            DisplayMode::Footprint => (footprint, mesh),
            DisplayMode::Mesh => (mesh, footprint),
        };
        let has_geometry = |c: &&dyn ProvidesGeometry| c.geometry().is_some_and(|g| !g.is_empty());
        preferred.filter(has_geometry).or_else(|| fallback.filter(has_geometry))
    }

    pub fn rebuild(&mut self, options: BuildOptions) -> Result<()> {
        if let Some(footprint) = self.footprint.as_mut() {
            footprint.rebuild(options)?;
        }
        if let Some(mesh) = self.mesh.as_mut() {
            mesh.rebuild(options)?;
        }
        Ok(())
    }

    /// (longitude, latitude) extent used for spatial lookup
    ///
    /// The footprint outline if present, otherwise the mesh anchor point.
    pub fn envelope(&self) -> Option<([f64; 2], [f64; 2])> {
        if let Some(envelope) = self.footprint.as_ref().and_then(Polygon::envelope) {
            return Some(envelope);
        }
        self.mesh
            .as_ref()
            .and_then(|m| m.location())
            .map(|l| ([l.longitude, l.latitude], [l.longitude, l.latitude]))
    }
}

impl ProvidesGeometry for Feature {
    fn id(&self) -> &str {
        &self.id
    }

    fn geometry(&self) -> Option<&GeometryDescriptor> {
        self.active().and_then(|c| c.geometry())
    }

    fn location(&self) -> Option<&GeoLocation> {
        self.active().and_then(|c| c.location())
    }

    fn appearance(&self) -> Appearance {
        self.active().map(|c| c.appearance()).unwrap_or_default()
    }

    fn create_primitive(&self, ctx: &mut RenderContext<'_>) -> Result<PrimitiveHandle> {
        match self.active() {
            Some(child) => child.create_primitive(ctx),
            None => Err(GeometryError::EmptyGeometry { id: self.id.clone() }),
        }
    }
}
