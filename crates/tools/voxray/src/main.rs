//! voxray - raytrace voxel octree scenes to PNG images
//!
//! Builds a scene of voxel objects (from a JSON description or a built-in
//! demo), compacts everything onto one arena, traces every pixel through
//! the multi-object raytracer and writes the shaded result as a PNG.

mod render;
mod scene;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "voxray", about = "Raytrace voxel octree scenes to PNG images")]
struct Args {
    /// Output image path
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 512)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 384)]
    height: u32,

    /// JSON scene description; omit to render the built-in demo scene
    #[arg(short, long)]
    scene: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.scene {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading scene file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing scene file {}", path.display()))?
        }
        None => scene::demo_scene(),
    };

    let (arena, objects) = scene::build(&config)?;
    tracing::info!(
        objects = objects.len(),
        arena_bytes = arena.used(),
        "scene built and compacted"
    );

    let image = render::render(&arena, &objects, &config, args.width, args.height);
    image
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    tracing::info!(path = %args.output.display(), "image written");
    Ok(())
}
