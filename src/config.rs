//! Build configuration
//!
//! Options can be loaded from a JSON file; every field is optional and falls
//! back to its default.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::geometry::PositionPrecision;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildOptions {
    /// Encoding of the position buffer
    pub precision: PositionPrecision,
    /// Douglas-Peucker tolerance for footprint rings, in degrees (0 = exact)
    pub footprint_tolerance: f64,
    /// Log a warning when a build produces no positions and no indices
    pub warn_on_empty: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            precision: PositionPrecision::Float64,
            footprint_tolerance: 0.0,
            warn_on_empty: true,
        }
    }
}

impl BuildOptions {
    pub fn with_precision(mut self, precision: PositionPrecision) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_footprint_tolerance(mut self, tolerance: f64) -> Self {
        self.footprint_tolerance = tolerance;
        self
    }

    pub fn with_warn_on_empty(mut self, warn: bool) -> Self {
        self.warn_on_empty = warn;
        self
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let options: BuildOptions =
            serde_json::from_str(json).context("invalid build options JSON")?;
        anyhow::ensure!(
            options.footprint_tolerance >= 0.0 && options.footprint_tolerance.is_finite(),
            "footprintTolerance must be a non-negative number, got {}",
            options.footprint_tolerance
        );
        Ok(options)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read build options from {}", path.display()))?;
        Self::from_json_str(&text)
    }
}
