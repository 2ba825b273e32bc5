//! Elevation query command

use anyhow::Result;
use ridge_core::RidgeConfig;

use super::{load_terrain, SourceArgs};

pub fn run(source: &SourceArgs, points: &[[f32; 2]], config: &RidgeConfig) -> Result<()> {
    let terrain = load_terrain(source, config)?;
    let (extent_x, extent_z) = terrain.grid.world_extent();

    for &[x, z] in points {
        let h = terrain.sample_height(x, z);
        let inside = (0.0..extent_x).contains(&x) && (0.0..extent_z).contains(&z);
        if inside {
            println!("({:.3}, {:.3}) -> {:.4}", x, z, h);
        } else {
            println!("({:.3}, {:.3}) -> {:.4} (off terrain)", x, z, h);
        }
    }
    Ok(())
}
