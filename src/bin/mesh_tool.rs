//! CLI tool for building mesh geometry without a renderer
//!
//! Usage:
//!   cargo run --release --bin mesh_tool -- <mesh.json|mesh.msgpack> [options]
//!
//! Set RUST_LOG=debug for build statistics and ATLAS_MESH_DEBUG=<id> to dump
//! the triangles of a specific mesh.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;

use atlas_mesh::{BuildOptions, Mesh, MeshSource, PositionPrecision, ProvidesGeometry};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Precision {
    Float64,
    Float32,
    Uint16,
}

impl From<Precision> for PositionPrecision {
    fn from(p: Precision) -> Self {
        match p {
            Precision::Float64 => PositionPrecision::Float64,
            Precision::Float32 => PositionPrecision::Float32,
            Precision::Uint16 => PositionPrecision::Uint16,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "mesh_tool", version, about = "Pack a mesh description into renderer buffers")]
struct Args {
    /// Mesh source file (JSON, or MessagePack with .msgpack/.mpk extension)
    input: PathBuf,

    /// Build options JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Position encoding; overrides the config file
    #[arg(long, value_enum)]
    precision: Option<Precision>,

    /// Write the packed binary descriptor here
    #[arg(long)]
    binary_out: Option<PathBuf>,

    /// Write the descriptor as JSON (base64 buffers) here
    #[arg(long)]
    json_out: Option<PathBuf>,

    /// Write the descriptor as MessagePack here
    #[arg(long)]
    msgpack_out: Option<PathBuf>,

    /// Print every triangle with its vertex positions
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn is_msgpack(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("msgpack") | Some("mpk")
    )
}

fn load_source(path: &Path) -> anyhow::Result<MeshSource> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if is_msgpack(path) {
        rmp_serde::from_slice(&bytes).with_context(|| format!("invalid MessagePack mesh in {}", path.display()))
    } else {
        serde_json::from_slice(&bytes).with_context(|| format!("invalid JSON mesh in {}", path.display()))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut options = match &args.config {
        Some(path) => BuildOptions::from_json_file(path)?,
        None => BuildOptions::default(),
    };
    if let Some(precision) = args.precision {
        options.precision = precision.into();
    }

    let source = load_source(&args.input)?;
    let fallback_id = args
        .input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("mesh")
        .to_string();
    let start = std::time::Instant::now();
    let mesh = Mesh::from_source(&source, &fallback_id, options)
        .with_context(|| format!("failed to build mesh from {}", args.input.display()))?;
    let geometry = mesh.descriptor();
    info!(
        "built '{}' in {:.2}ms",
        mesh.id(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    println!("Mesh: {}", mesh.id());
    println!("  Precision: {:?}", geometry.positions.precision());
    println!("  Vertices:  {}", geometry.vertex_count());
    println!("  Triangles: {}", geometry.triangle_count());
    match geometry.bounding_volume.sphere() {
        Some(s) => println!(
            "  Bounds:    center ({:.4}, {:.4}, {:.4}), radius {:.4}",
            s.center.x, s.center.y, s.center.z, s.radius
        ),
        None => println!("  Bounds:    empty"),
    }
    if let Some(location) = mesh.location() {
        println!(
            "  Location:  lat {:.6}, lon {:.6}, elev {:.2}",
            location.latitude, location.longitude, location.elevation
        );
    }

    if args.verbose {
        for (t, tri) in geometry.indices.triangles().enumerate() {
            let corners: Vec<String> = tri
                .iter()
                .filter_map(|&i| geometry.positions.point(i as usize))
                .map(|p| format!("[{:.3}, {:.3}, {:.3}]", p.x, p.y, p.z))
                .collect();
            println!("  Triangle {}: {:?} {}", t, tri, corners.join(", "));
        }
    }

    if let Some(path) = &args.binary_out {
        let bytes = geometry.to_bytes();
        fs::write(path, &bytes).with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote {} bytes to {}", bytes.len(), path.display());
    }
    if let Some(path) = &args.json_out {
        let json = serde_json::to_vec_pretty(geometry)?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote JSON descriptor to {}", path.display());
    }
    if let Some(path) = &args.msgpack_out {
        let packed = rmp_serde::to_vec_named(geometry)?;
        fs::write(path, packed).with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote MessagePack descriptor to {}", path.display());
    }

    Ok(())
}
