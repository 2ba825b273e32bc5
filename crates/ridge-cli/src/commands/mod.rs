//! CLI command implementations

pub mod generate;
pub mod inspect;
pub mod sample;
pub mod walk;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ridge_core::{FractalConfig, RidgeConfig};
use ridge_terrain::Terrain;

/// Diamond-square settings; each flag overrides the `[fractal]` config
#[derive(Args, Debug, Clone, Default)]
pub struct FractalArgs {
    /// Grid side length (2^n + 1)
    #[arg(long)]
    pub size: Option<usize>,

    /// Vertices per patch edge
    #[arg(long)]
    pub patch_size: Option<usize>,

    /// Amplitude decay exponent (>= 0)
    #[arg(long, allow_hyphen_values = true)]
    pub roughness: Option<f32>,

    /// Lowest elevation after normalization
    #[arg(long, allow_hyphen_values = true)]
    pub min: Option<f32>,

    /// Highest elevation after normalization
    #[arg(long, allow_hyphen_values = true)]
    pub max: Option<f32>,

    /// Random seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

impl FractalArgs {
    pub fn apply(&self, config: &FractalConfig) -> FractalConfig {
        let mut config = config.clone();
        if let Some(size) = self.size {
            config.terrain_size = size;
        }
        if let Some(patch_size) = self.patch_size {
            config.patch_size = patch_size;
        }
        if let Some(roughness) = self.roughness {
            config.roughness = roughness;
        }
        if let Some(min) = self.min {
            config.min_height = min;
        }
        if let Some(max) = self.max {
            config.max_height = max;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

/// Where a command's terrain comes from: a heightmap image, or diamond-square
/// when no image is given.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Grayscale heightmap image; omit to synthesize a fractal terrain
    #[arg(long)]
    pub heightmap: Option<PathBuf>,

    /// Raster decimation step override
    #[arg(long)]
    pub step: Option<usize>,

    #[command(flatten)]
    pub fractal: FractalArgs,
}

pub fn load_terrain(source: &SourceArgs, config: &RidgeConfig) -> Result<Terrain> {
    match &source.heightmap {
        Some(path) => {
            let mut raster = config.raster.clone();
            if let Some(step) = source.step {
                raster.step = step;
            }
            Terrain::load_raster(path, &raster)
                .with_context(|| format!("Failed to load heightmap '{}'", path.display()))
        }
        None => {
            let fractal = source.fractal.apply(&config.fractal);
            Terrain::generate_fractal(&fractal).context("Failed to generate fractal terrain")
        }
    }
}
