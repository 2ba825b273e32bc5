//! Continuous elevation queries over a height grid

use crate::grid::HeightGrid;

/// Anything that can answer "how high is the ground at world (x, z)?".
///
/// Implementations must be total: coordinates outside the surface return `0.0`
/// rather than failing.
pub trait ElevationQuery {
    fn elevation_at(&self, x: f32, z: f32) -> f32;
}

impl ElevationQuery for HeightGrid {
    fn elevation_at(&self, x: f32, z: f32) -> f32 {
        elevation_at(self, x, z)
    }
}

impl<T: ElevationQuery + ?Sized> ElevationQuery for &T {
    fn elevation_at(&self, x: f32, z: f32) -> f32 {
        (**self).elevation_at(x, z)
    }
}

/// Bilinearly interpolated elevation at world coordinates `(x, z)`.
///
/// Returns `0.0` for anything outside `[0, (width-1)*h) x [0, (depth-1)*h)`,
/// including NaN and infinite inputs.
pub fn elevation_at(grid: &HeightGrid, x: f32, z: f32) -> f32 {
    let scale = grid.horizontal_scale();
    let (max_x, max_z) = grid.world_extent();

    if !x.is_finite() || !z.is_finite() {
        return 0.0;
    }
    if x < 0.0 || z < 0.0 || x >= max_x || z >= max_z {
        return 0.0;
    }

    let gx = x / scale;
    let gz = z / scale;

    // Division can round up onto the last sample; keep a full cell to the right
    let ix = (gx as usize).min(grid.width() - 2);
    let iz = (gz as usize).min(grid.depth() - 2);

    let fx = gx - ix as f32;
    let fz = gz - iz as f32;

    let h00 = grid.get(ix, iz);
    let h01 = grid.get(ix + 1, iz);
    let h10 = grid.get(ix, iz + 1);
    let h11 = grid.get(ix + 1, iz + 1);

    let h0 = lerp(h00, h01, fx);
    let h1 = lerp(h10, h11, fx);

    lerp(h0, h1, fz)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}
