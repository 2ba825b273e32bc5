//! Immutable height grid

use ridge_core::{Result, RidgeError};

/// A rectangular field of elevations with its grid-to-world scale.
///
/// Cell `(ix, iz)` sits at world position `(ix * horizontal_scale, h, iz * horizontal_scale)`.
/// Once built the grid is never mutated, so it can be shared across threads freely.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    /// Row-major elevations, `depth` rows of `width` cells
    heights: Vec<f32>,
    width: usize,
    depth: usize,
    horizontal_scale: f32,
    height_scale: f32,
}

impl HeightGrid {
    /// Build a grid from row-major elevations.
    ///
    /// Fails unless both dimensions are at least 2, the sample count matches,
    /// and every elevation is finite.
    pub fn new(
        heights: Vec<f32>,
        width: usize,
        depth: usize,
        horizontal_scale: f32,
        height_scale: f32,
    ) -> Result<Self> {
        if width < 2 || depth < 2 {
            return Err(RidgeError::InvalidDimensions {
                width,
                depth,
                reason: "a height grid needs at least 2x2 samples".to_string(),
            });
        }
        if heights.len() != width * depth {
            return Err(RidgeError::InvalidDimensions {
                width,
                depth,
                reason: format!("expected {} samples, got {}", width * depth, heights.len()),
            });
        }
        if !(horizontal_scale.is_finite() && horizontal_scale > 0.0) {
            return Err(RidgeError::InvalidConfig(format!(
                "horizontal_scale must be positive, got {}",
                horizontal_scale
            )));
        }
        if let Some(i) = heights.iter().position(|h| !h.is_finite()) {
            return Err(RidgeError::NonFiniteHeight {
                x: i % width,
                z: i / width,
            });
        }

        Ok(Self {
            heights,
            width,
            depth,
            horizontal_scale,
            height_scale,
        })
    }

    /// Build a grid by evaluating `f(ix, iz)` at every cell.
    pub fn from_fn<F>(width: usize, depth: usize, horizontal_scale: f32, f: F) -> Result<Self>
    where
        F: Fn(usize, usize) -> f32,
    {
        let mut heights = Vec::with_capacity(width * depth);
        for iz in 0..depth {
            for ix in 0..width {
                heights.push(f(ix, iz));
            }
        }
        Self::new(heights, width, depth, horizontal_scale, 1.0)
    }

    /// Number of samples along X
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of samples along Z (rows)
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn horizontal_scale(&self) -> f32 {
        self.horizontal_scale
    }

    /// Vertical scale the elevations were produced with
    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Elevation at cell `(ix, iz)`. Panics when out of range.
    pub fn get(&self, ix: usize, iz: usize) -> f32 {
        assert!(
            ix < self.width && iz < self.depth,
            "cell ({ix}, {iz}) outside {}x{} grid",
            self.width,
            self.depth
        );
        self.heights[iz * self.width + ix]
    }

    /// World-space X/Z extent covered by the grid
    pub fn world_extent(&self) -> (f32, f32) {
        (
            (self.width - 1) as f32 * self.horizontal_scale,
            (self.depth - 1) as f32 * self.horizontal_scale,
        )
    }

    /// Lowest and highest elevation in the grid
    pub fn min_max(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_dimensions() {
        let err = HeightGrid::new(vec![0.0; 3], 3, 1, 1.0, 1.0).unwrap_err();
        assert!(matches!(err, RidgeError::InvalidDimensions { .. }));
    }

    #[test]
    fn rejects_sample_count_mismatch() {
        let err = HeightGrid::new(vec![0.0; 5], 2, 2, 1.0, 1.0).unwrap_err();
        assert!(matches!(err, RidgeError::InvalidDimensions { .. }));
    }

    #[test]
    fn rejects_non_finite_heights() {
        let err = HeightGrid::new(vec![0.0, 1.0, f32::NAN, 0.0], 2, 2, 1.0, 1.0).unwrap_err();
        assert!(matches!(err, RidgeError::NonFiniteHeight { x: 0, z: 1 }));
    }

    #[test]
    fn row_major_addressing() {
        let grid = HeightGrid::from_fn(3, 2, 2.0, |ix, iz| (iz * 10 + ix) as f32).unwrap();
        assert_eq!(grid.get(2, 0), 2.0);
        assert_eq!(grid.get(0, 1), 10.0);
        assert_eq!(grid.get(2, 1), 12.0);
        assert_eq!(grid.world_extent(), (4.0, 2.0));
        assert_eq!(grid.min_max(), (0.0, 12.0));
    }
}
