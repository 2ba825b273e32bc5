//! Terrain orchestration: grid + mesh + patches

use std::path::Path;
use std::sync::Arc;

use image::DynamicImage;

use ridge_core::{FractalConfig, RasterConfig, Result};

use crate::fractal;
use crate::grid::HeightGrid;
use crate::mesh::{TerrainMesh, TerrainPatch};
use crate::raster;
use crate::sampler::{elevation_at, ElevationQuery};

/// A complete terrain: the shared height grid and the geometry built from it
pub struct Terrain {
    /// The source grid, shared with anything that needs elevation queries
    pub grid: Arc<HeightGrid>,
    /// Full-resolution mesh
    pub mesh: TerrainMesh,
    /// Vertices per patch edge
    pub patch_size: usize,
    /// Mesh split into patches
    pub patches: Vec<TerrainPatch>,
    /// World units per path-file unit
    path_scale: f32,
}

impl Terrain {
    /// Build the mesh and patches for an existing grid.
    pub fn from_grid(grid: HeightGrid, patch_size: usize) -> Self {
        let mesh = TerrainMesh::from_grid(&grid);
        let patches = mesh.patches(patch_size);

        log::info!(
            "Terrain mesh: {} vertices, {} triangles, {} patches",
            mesh.vertex_count(),
            mesh.triangle_count(),
            patches.len()
        );

        Self {
            path_scale: grid.horizontal_scale(),
            grid: Arc::new(grid),
            mesh,
            patch_size,
            patches,
        }
    }

    /// Load a heightmap image and build its terrain.
    pub fn load_raster(path: &Path, config: &RasterConfig) -> Result<Self> {
        let grid = raster::from_path(path, config)?;
        Ok(Self::from_raster_grid(grid, config))
    }

    /// Build a terrain from an already decoded heightmap image.
    pub fn from_raster_image(img: &DynamicImage, config: &RasterConfig) -> Result<Self> {
        let grid = raster::from_image(img, config)?;
        Ok(Self::from_raster_grid(grid, config))
    }

    // Path files address source pixels, not decimated cells
    fn from_raster_grid(grid: HeightGrid, config: &RasterConfig) -> Self {
        Self {
            path_scale: config.horizontal_scale,
            ..Self::from_grid(grid, config.patch_size)
        }
    }

    /// Synthesize a terrain by diamond-square.
    pub fn generate_fractal(config: &FractalConfig) -> Result<Self> {
        let grid = fractal::generate(config)?;
        Ok(Self::from_grid(grid, config.patch_size))
    }

    /// Sample world-space height at (x, z); `0.0` off the terrain.
    pub fn sample_height(&self, x: f32, z: f32) -> f32 {
        elevation_at(&self.grid, x, z)
    }

    pub fn horizontal_scale(&self) -> f32 {
        self.grid.horizontal_scale()
    }

    /// Multiplier from path-file x/z to world x/z.
    ///
    /// For rasters this is the per-pixel spacing, so a path point `(8, 8)`
    /// names source pixel (8, 8) whatever the decimation step. For other
    /// grids it is the cell spacing.
    pub fn path_scale(&self) -> f32 {
        self.path_scale
    }
}

impl ElevationQuery for Terrain {
    fn elevation_at(&self, x: f32, z: f32) -> f32 {
        self.sample_height(x, z)
    }
}
