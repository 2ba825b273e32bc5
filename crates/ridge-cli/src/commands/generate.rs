//! Fractal terrain generation command

use std::path::Path;

use anyhow::{Context, Result};
use image::{GrayImage, Luma};
use ridge_core::RidgeConfig;
use ridge_terrain::{fractal, HeightGrid};

use super::FractalArgs;

pub fn run(output: &Path, fractal_args: &FractalArgs, config: &RidgeConfig) -> Result<()> {
    let fractal_config = fractal_args.apply(&config.fractal);

    let grid = fractal::generate(&fractal_config).context("Failed to generate terrain")?;
    let img = to_grayscale(&grid);
    img.save(output)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    let (lo, hi) = grid.min_max();
    println!("Generated {0}x{0} terrain", grid.width());
    println!("Height range: {:.3} .. {:.3}", lo, hi);
    println!("Wrote {}", output.display());
    Ok(())
}

/// Map the grid's own min..max onto 0..255.
pub fn to_grayscale(grid: &HeightGrid) -> GrayImage {
    let (lo, hi) = grid.min_max();
    let range = hi - lo;
    GrayImage::from_fn(grid.width() as u32, grid.depth() as u32, |x, z| {
        let h = grid.get(x as usize, z as usize);
        let t = if range > 0.0 { (h - lo) / range } else { 0.0 };
        Luma([(t * 255.0).round() as u8])
    })
}
