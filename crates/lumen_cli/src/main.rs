//! Lumen CLI - render a scene to a bitmap
//!
//! Loads a JSON scene description (or the built-in demo scene), applies any
//! command-line overrides, renders it and writes a BMP.

use anyhow::{Context, Result};
use clap::Parser;
use lumen_core::SceneDescription;
use lumen_renderer::{Camera, RenderConfig, World};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(about = "Whitted-style ray tracer", long_about = None)]
struct Cli {
    /// JSON scene description (default: built-in demo scene)
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output bitmap path
    #[arg(short, long, default_value = "raytrace.bmp")]
    output: PathBuf,

    /// Override the image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Override the image height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Override samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Seed the sampler for a reproducible render
    #[arg(long)]
    seed: Option<u64>,

    /// Render on a single thread, row by row
    #[arg(long)]
    sequential: bool,

    /// Print the resolved scene as JSON and exit without rendering
    #[arg(long)]
    dump_scene: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded scene.
    fn apply_overrides(&self, desc: &mut SceneDescription) {
        if let Some(width) = self.width {
            desc.width = width;
        }
        if let Some(height) = self.height {
            desc.height = height;
        }
        if let Some(samples) = self.samples {
            desc.sampler.samples = samples;
        }
        if let Some(seed) = self.seed {
            desc.render.seed = Some(seed);
        }
        if self.sequential {
            desc.render.parallel = false;
        }
    }
}

fn load_scene(cli: &Cli) -> Result<SceneDescription> {
    let mut desc = match &cli.scene {
        Some(path) => SceneDescription::from_path(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, using the demo scene");
            SceneDescription::demo()
        }
    };
    cli.apply_overrides(&mut desc);
    Ok(desc)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let desc = load_scene(&cli)?;

    if cli.dump_scene {
        println!("{}", desc.to_json_pretty()?);
        return Ok(());
    }

    let start = Instant::now();
    let mut world = World::from_description(&desc).context("Failed to build world")?;
    let camera = Camera::from_description(&desc.camera);
    let config = RenderConfig::from(&desc.render);
    log::info!("Scene '{}' built in {:?}", desc.name, start.elapsed());

    camera.render_scene(&mut world, &config);

    lumen_core::save_bmp(&cli.output, world.width, world.height, &world.image)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["lumen"]).unwrap();
        assert!(cli.scene.is_none());
        assert_eq!(cli.output, PathBuf::from("raytrace.bmp"));
        assert!(!cli.sequential);
        assert!(!cli.dump_scene);

        let desc = load_scene(&cli).unwrap();
        assert_eq!(desc, SceneDescription::demo());
    }

    #[test]
    fn test_overrides_apply_to_scene() {
        let cli = Cli::try_parse_from([
            "lumen",
            "--width",
            "64",
            "--height",
            "32",
            "--samples",
            "9",
            "--seed",
            "7",
            "--sequential",
        ])
        .unwrap();

        let mut desc = SceneDescription::demo();
        cli.apply_overrides(&mut desc);

        assert_eq!((desc.width, desc.height), (64, 32));
        assert_eq!(desc.sampler.samples, 9);
        assert_eq!(desc.render.seed, Some(7));
        assert!(!desc.render.parallel);
        assert!(!RenderConfig::from(&desc.render).parallel);
    }

    #[test]
    fn test_missing_scene_file_is_an_error() {
        let cli = Cli::try_parse_from(["lumen", "--scene", "/nonexistent/scene.json"]).unwrap();
        assert!(load_scene(&cli).is_err());
    }

    #[test]
    fn test_rejects_non_numeric_width() {
        assert!(Cli::try_parse_from(["lumen", "--width", "wide"]).is_err());
    }
}
