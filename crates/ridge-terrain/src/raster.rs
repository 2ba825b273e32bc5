//! Heightmap loading from grayscale images

use std::path::Path;

use image::{DynamicImage, GrayImage};
use ridge_core::{RasterConfig, Result, RidgeError};

use crate::grid::HeightGrid;

/// Load a heightmap image from disk.
pub fn from_path(path: &Path, config: &RasterConfig) -> Result<HeightGrid> {
    let img = image::open(path)?;
    log::info!(
        "Loaded heightmap '{}' ({} x {})",
        path.display(),
        img.width(),
        img.height()
    );
    from_image(&img, config)
}

/// Decode an in-memory encoded image (PNG, JPEG, ...) into a height grid.
pub fn from_bytes(bytes: &[u8], config: &RasterConfig) -> Result<HeightGrid> {
    let img = image::load_from_memory(bytes)?;
    from_image(&img, config)
}

/// Convert a decoded image into a height grid.
///
/// Pixels are reduced to 8-bit luma first (grayscale passes through, color is
/// weighted by `to_luma8`), then scaled: `(luma / 255) * height_scale * amplification`.
/// Every `step`-th pixel along each axis becomes a cell; the grid's horizontal
/// scale is `config.horizontal_scale * step` so cells keep their pixel's world position.
pub fn from_image(img: &DynamicImage, config: &RasterConfig) -> Result<HeightGrid> {
    let gray: GrayImage = match img {
        DynamicImage::ImageLuma8(g) => g.clone(),
        other => other.to_luma8(),
    };
    from_luma(&gray, config)
}

fn from_luma(gray: &GrayImage, config: &RasterConfig) -> Result<HeightGrid> {
    let (w, h) = (gray.width() as usize, gray.height() as usize);
    if w == 0 || h == 0 {
        return Err(RidgeError::InvalidDimensions {
            width: w,
            depth: h,
            reason: "heightmap image is empty".to_string(),
        });
    }
    if config.step == 0 {
        return Err(RidgeError::InvalidConfig(
            "raster step must be at least 1".to_string(),
        ));
    }

    let step = config.step;
    let width = w / step;
    let depth = h / step;
    if width < 2 || depth < 2 {
        return Err(RidgeError::InvalidDimensions {
            width,
            depth,
            reason: format!("{}x{} image decimated by {} leaves too few samples", w, h, step),
        });
    }

    let vertical = config.height_scale * config.amplification;
    let mut heights = Vec::with_capacity(width * depth);
    for gz in 0..depth {
        for gx in 0..width {
            let sample = gray.get_pixel((gx * step) as u32, (gz * step) as u32).0[0];
            heights.push(sample as f32 / 255.0 * vertical);
        }
    }

    log::debug!(
        "Heightmap decimated {}x{} -> {}x{} (step {})",
        w,
        h,
        width,
        depth,
        step
    );

    HeightGrid::new(
        heights,
        width,
        depth,
        config.horizontal_scale * step as f32,
        config.height_scale,
    )
}
