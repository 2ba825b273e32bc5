//! Terrain statistics command

use anyhow::Result;
use ridge_core::RidgeConfig;

use super::{load_terrain, SourceArgs};

pub fn run(source: &SourceArgs, config: &RidgeConfig) -> Result<()> {
    let terrain = load_terrain(source, config)?;
    let grid = &terrain.grid;
    let (lo, hi) = grid.min_max();
    let (extent_x, extent_z) = grid.world_extent();
    let (cols, rows) = terrain.mesh.patch_grid(terrain.patch_size);

    println!("Grid: {} x {}", grid.width(), grid.depth());
    println!(
        "Scale: horizontal {:.3}, height {:.3}",
        grid.horizontal_scale(),
        grid.height_scale()
    );
    println!("World extent: {:.2} x {:.2}", extent_x, extent_z);
    println!("Elevation: {:.3} .. {:.3}", lo, hi);
    println!(
        "Mesh: {} vertices, {} triangles",
        terrain.mesh.vertex_count(),
        terrain.mesh.triangle_count()
    );
    println!(
        "Patches: {} ({} x {}, {} vertices per edge)",
        terrain.patches.len(),
        cols,
        rows,
        terrain.patch_size
    );
    Ok(())
}
