//! Tessellation of footprint outlines
//!
//! # Submodules
//! - `simplify` - Douglas-Peucker ring simplification
//! - `polygon` - Outline + holes triangulation using earcut

mod simplify;
mod polygon;

pub use simplify::douglas_peucker;
pub use polygon::tessellate_footprint;
