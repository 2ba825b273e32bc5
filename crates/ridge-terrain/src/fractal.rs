//! Diamond-square midpoint displacement
//!
//! Synthesizes a square height field of side `2^n + 1` with no input raster.
//! Each refinement level averages existing samples and perturbs the result by
//! a random offset whose range shrinks by `2^-roughness` per level, then the
//! whole field is remapped into `[min_height, max_height]`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ridge_core::{FractalConfig, Result, RidgeError};

use crate::grid::HeightGrid;

/// Square grid under construction, with toroidal addressing.
///
/// Holds exclusive mutable access for the duration of the diamond-square pass;
/// [`FractalGrid::finish`] hands back an immutable [`HeightGrid`].
#[derive(Debug, Clone)]
pub struct FractalGrid {
    heights: Vec<f32>,
    size: usize,
    min_height: f32,
    max_height: f32,
}

impl FractalGrid {
    /// Zero-filled `size x size` grid targeting `[min_height, max_height]`
    pub fn new(size: usize, min_height: f32, max_height: f32) -> Self {
        Self {
            heights: vec![0.0; size * size],
            size,
            min_height,
            max_height,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn min_height(&self) -> f32 {
        self.min_height
    }

    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Height at `(x, y)`, wrapping both coordinates modulo the grid size.
    pub fn get(&self, x: i32, y: i32) -> f32 {
        self.heights[self.index(x, y)]
    }

    /// Set the height at `(x, y)`, wrapping both coordinates modulo the grid size.
    pub fn set(&mut self, x: i32, y: i32, value: f32) {
        let i = self.index(x, y);
        self.heights[i] = value;
    }

    fn index(&self, x: i32, y: i32) -> usize {
        let n = self.size as i32;
        let x = x.rem_euclid(n) as usize;
        let y = y.rem_euclid(n) as usize;
        y * self.size + x
    }

    /// Seed the four corners, in order (0,0), (N-1,0), (0,N-1), (N-1,N-1).
    pub fn seed_corners<R: Rng>(&mut self, rng: &mut R) {
        let last = self.size as i32 - 1;
        for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
            let value = rng.random_range(self.min_height..=self.max_height);
            self.set(x, y, value);
        }
    }

    /// Run the diamond and square passes at every level down to single cells.
    ///
    /// `amplitude` is the offset range of the first level.
    pub fn displace<R: Rng>(&mut self, rng: &mut R, roughness: f32, amplitude: f32) {
        let decay = 2.0_f32.powf(-roughness);
        let mut rect = self.size - 1;
        let mut cur = amplitude;

        while rect > 1 {
            self.diamond_step(rng, rect, cur);
            self.square_step(rng, rect, cur);
            cur *= decay;
            rect /= 2;
        }
    }

    fn diamond_step<R: Rng>(&mut self, rng: &mut R, rect: usize, cur: f32) {
        let half = (rect / 2) as i32;
        let r = rect as i32;

        for y in (0..self.size - 1).step_by(rect) {
            for x in (0..self.size - 1).step_by(rect) {
                let (x, y) = (x as i32, y as i32);
                let avg = (self.get(x, y)
                    + self.get(x + r, y)
                    + self.get(x, y + r)
                    + self.get(x + r, y + r))
                    / 4.0;
                let offset = rng.random_range(-cur..=cur);
                self.set(x + half, y + half, avg + offset);
            }
        }
    }

    fn square_step<R: Rng>(&mut self, rng: &mut R, rect: usize, cur: f32) {
        let half = rect / 2;
        let n = self.size;

        for y in (0..n).step_by(half) {
            for x in ((y + half) % rect..n).step_by(rect) {
                let mut sum = 0.0;
                let mut count = 0;

                // Edge cells have fewer than four neighbours; average what exists
                if x >= half {
                    sum += self.get((x - half) as i32, y as i32);
                    count += 1;
                }
                if x + half < n {
                    sum += self.get((x + half) as i32, y as i32);
                    count += 1;
                }
                if y >= half {
                    sum += self.get(x as i32, (y - half) as i32);
                    count += 1;
                }
                if y + half < n {
                    sum += self.get(x as i32, (y + half) as i32);
                    count += 1;
                }

                let offset = rng.random_range(-cur..=cur);
                self.set(x as i32, y as i32, sum / count as f32 + offset);
            }
        }
    }

    /// Affinely remap all heights onto `[min_height, max_height]`.
    ///
    /// A flat grid has no range to stretch and is set to `min_height`.
    pub fn normalize(&mut self) {
        let (lo, hi) = self
            .heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            });
        let range = hi - lo;
        let target = self.max_height - self.min_height;

        if range > 0.0 {
            for h in &mut self.heights {
                *h = (*h - lo) / range * target + self.min_height;
            }
        } else {
            self.heights.fill(self.min_height);
        }
    }

    /// Freeze into an immutable height grid.
    pub fn finish(self, horizontal_scale: f32) -> Result<HeightGrid> {
        HeightGrid::new(self.heights, self.size, self.size, horizontal_scale, 1.0)
    }
}

/// Offset range of the first refinement level for a grid of `size` samples.
pub fn initial_amplitude(size: usize) -> f32 {
    (size - 1) as f32 / 2.0
}

/// Check the config and report the first problem as a recoverable error.
pub fn validate(config: &FractalConfig) -> Result<()> {
    if !(config.roughness.is_finite() && config.roughness >= 0.0) {
        return Err(RidgeError::InvalidRoughness(config.roughness));
    }
    if config.terrain_size < 2 {
        return Err(RidgeError::InvalidConfig(format!(
            "terrain_size must be at least 2, got {}",
            config.terrain_size
        )));
    }
    if config.patch_size < 2 {
        return Err(RidgeError::InvalidConfig(format!(
            "patch_size must be at least 2, got {}",
            config.patch_size
        )));
    }
    if !(config.min_height.is_finite() && config.max_height.is_finite())
        || config.min_height > config.max_height
    {
        return Err(RidgeError::InvalidConfig(format!(
            "height range [{}, {}] is not a valid interval",
            config.min_height, config.max_height
        )));
    }
    // Corner draws and normalization both work on max - min
    if !(config.max_height - config.min_height).is_finite() {
        return Err(RidgeError::InvalidConfig(format!(
            "height range [{}, {}] is too wide to represent",
            config.min_height, config.max_height
        )));
    }
    Ok(())
}

/// Generate a normalized height grid by diamond-square.
///
/// Sizes that are not `2^n + 1` are accepted with a warning; some cells
/// are then never refined and keep their zero initial value. A patch size
/// that does not tile the grid is also only a warning.
pub fn generate(config: &FractalConfig) -> Result<HeightGrid> {
    validate(config)?;

    if !(config.terrain_size - 1).is_power_of_two() {
        log::warn!(
            "terrain_size {} is not 2^n + 1; the fractal will not cover every cell",
            config.terrain_size
        );
    }
    if (config.terrain_size - 1) % (config.patch_size - 1) != 0 {
        log::warn!(
            "terrain_size - 1 ({}) is not a multiple of patch_size - 1 ({}); edge patches will be smaller",
            config.terrain_size - 1,
            config.patch_size - 1
        );
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    log::debug!(
        "Generating {0}x{0} fractal terrain (roughness {1}, seed {2:?})",
        config.terrain_size,
        config.roughness,
        config.seed
    );

    let mut grid = FractalGrid::new(config.terrain_size, config.min_height, config.max_height);
    grid.seed_corners(&mut rng);
    grid.displace(
        &mut rng,
        config.roughness,
        initial_amplitude(config.terrain_size),
    );
    grid.normalize();
    grid.finish(config.horizontal_scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: usize, roughness: f32, seed: u64) -> FractalConfig {
        FractalConfig {
            terrain_size: size,
            patch_size: 5,
            roughness,
            min_height: 0.0,
            max_height: 100.0,
            seed: Some(seed),
            horizontal_scale: 1.0,
        }
    }

    /// Straight-line replay of the draw sequence for a 5x5 grid, written out
    /// cell by cell so it does not share any loop logic with `displace`.
    fn replay_5x5(seed: u64, roughness: f32, lo: f32, hi: f32) -> [[f32; 5]; 5] {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut g = [[0.0_f32; 5]; 5];

        g[0][0] = rng.random_range(lo..=hi);
        g[0][4] = rng.random_range(lo..=hi);
        g[4][0] = rng.random_range(lo..=hi);
        g[4][4] = rng.random_range(lo..=hi);

        // Level 1: rect 4, half 2, amplitude 2
        let mut cur = 2.0_f32;
        g[2][2] = (g[0][0] + g[0][4] + g[4][0] + g[4][4]) / 4.0 + rng.random_range(-cur..=cur);
        g[0][2] = (g[0][0] + g[0][4] + g[2][2]) / 3.0 + rng.random_range(-cur..=cur);
        g[2][0] = (g[2][2] + g[0][0] + g[4][0]) / 3.0 + rng.random_range(-cur..=cur);
        g[2][4] = (g[2][2] + g[0][4] + g[4][4]) / 3.0 + rng.random_range(-cur..=cur);
        g[4][2] = (g[4][0] + g[4][4] + g[2][2]) / 3.0 + rng.random_range(-cur..=cur);
        cur *= 2.0_f32.powf(-roughness);

        // Level 2: rect 2, half 1
        for (y, x) in [(1, 1), (1, 3), (3, 1), (3, 3)] {
            g[y][x] = (g[y - 1][x - 1] + g[y - 1][x + 1] + g[y + 1][x - 1] + g[y + 1][x + 1])
                / 4.0
                + rng.random_range(-cur..=cur);
        }
        for y in 0..5_usize {
            let start = (y + 1) % 2;
            for x in (start..5).step_by(2) {
                let mut sum = 0.0;
                let mut count = 0.0;
                if x >= 1 {
                    sum += g[y][x - 1];
                    count += 1.0;
                }
                if x + 1 < 5 {
                    sum += g[y][x + 1];
                    count += 1.0;
                }
                if y >= 1 {
                    sum += g[y - 1][x];
                    count += 1.0;
                }
                if y + 1 < 5 {
                    sum += g[y + 1][x];
                    count += 1.0;
                }
                g[y][x] = sum / count + rng.random_range(-cur..=cur);
            }
        }

        let lo_v = g.iter().flatten().copied().fold(f32::INFINITY, f32::min);
        let hi_v = g.iter().flatten().copied().fold(f32::NEG_INFINITY, f32::max);
        for row in g.iter_mut() {
            for h in row.iter_mut() {
                *h = (*h - lo_v) / (hi_v - lo_v) * (hi - lo) + lo;
            }
        }
        g
    }

    #[test]
    fn seeded_5x5_matches_reference_replay() {
        let grid = generate(&config(5, 1.0, 42)).unwrap();
        let expected = replay_5x5(42, 1.0, 0.0, 100.0);

        for (z, row) in expected.iter().enumerate() {
            for (x, &h) in row.iter().enumerate() {
                assert!(
                    (grid.get(x, z) - h).abs() < 1e-3,
                    "cell ({x}, {z}): expected {h}, got {}",
                    grid.get(x, z)
                );
            }
        }
    }

    #[test]
    fn seeded_5x5_matches_recorded_grid() {
        const RECORDED: [[f32; 5]; 5] = [
            [0.000, 30.394, 53.236, 72.856, 96.050],
            [24.550, 34.465, 55.943, 73.888, 82.950],
            [34.067, 43.661, 59.657, 71.300, 84.316],
            [37.940, 46.858, 64.801, 77.048, 87.604],
            [28.176, 47.440, 67.194, 83.205, 100.000],
        ];
        let grid = generate(&config(5, 1.0, 42)).unwrap();

        for (z, row) in RECORDED.iter().enumerate() {
            for (x, &h) in row.iter().enumerate() {
                assert!(
                    (grid.get(x, z) - h).abs() < 1e-2,
                    "cell ({x}, {z}): recorded {h}, got {}",
                    grid.get(x, z)
                );
            }
        }
    }

    #[test]
    fn same_seed_same_grid() {
        let a = generate(&config(33, 0.8, 7)).unwrap();
        let b = generate(&config(33, 0.8, 7)).unwrap();
        let c = generate(&config(33, 0.8, 8)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn output_spans_exact_target_range() {
        for &roughness in &[0.0, 0.5, 1.0, 2.0, 6.0] {
            for seed in 0..4 {
                let mut cfg = config(17, roughness, seed);
                cfg.min_height = -20.0;
                cfg.max_height = 45.0;
                let grid = generate(&cfg).unwrap();
                let (lo, hi) = grid.min_max();
                assert!((lo + 20.0).abs() < 1e-3, "roughness {roughness}: min {lo}");
                assert!((hi - 45.0).abs() < 1e-3, "roughness {roughness}: max {hi}");
            }
        }
    }

    #[test]
    fn corners_are_normalized_seed_draws() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut grid = FractalGrid::new(9, 0.0, 10.0);
        grid.seed_corners(&mut rng);

        let mut replay = StdRng::seed_from_u64(11);
        let draws: Vec<f32> = (0..4).map(|_| replay.random_range(0.0..=10.0)).collect();
        assert_eq!(grid.get(0, 0), draws[0]);
        assert_eq!(grid.get(8, 0), draws[1]);
        assert_eq!(grid.get(0, 8), draws[2]);
        assert_eq!(grid.get(8, 8), draws[3]);

        grid.displace(&mut rng, 1.0, initial_amplitude(9));
        // Refinement never writes to corners
        assert_eq!(grid.get(0, 0), draws[0]);
        assert_eq!(grid.get(8, 8), draws[3]);

        let lo = grid.heights().iter().copied().fold(f32::INFINITY, f32::min);
        let hi = grid.heights().iter().copied().fold(f32::NEG_INFINITY, f32::max);
        grid.normalize();

        let remap = |v: f32| (v - lo) / (hi - lo) * 10.0;
        for (i, &(x, y)) in [(0, 0), (8, 0), (0, 8), (8, 8)].iter().enumerate() {
            assert!((grid.get(x, y) - remap(draws[i])).abs() < 1e-4);
        }
    }

    #[test]
    fn wraparound_addressing() {
        let mut grid = FractalGrid::new(5, 0.0, 1.0);
        for y in 0..5 {
            for x in 0..5 {
                grid.set(x, y, (y * 5 + x) as f32);
            }
        }
        for y in 0..5 {
            assert_eq!(grid.get(-1, y), grid.get(4, y));
            assert_eq!(grid.get(5, y), grid.get(0, y));
            assert_eq!(grid.get(y, -1), grid.get(y, 4));
        }
        grid.set(-1, -1, 99.0);
        assert_eq!(grid.get(4, 4), 99.0);
    }

    #[test]
    fn flat_grid_normalizes_to_min_height() {
        let mut grid = FractalGrid::new(3, 5.0, 9.0);
        grid.normalize();
        assert!(grid.heights().iter().all(|&h| h == 5.0));
    }

    #[test]
    fn equal_bounds_produce_flat_grid() {
        let mut cfg = config(9, 1.0, 3);
        cfg.patch_size = 9;
        cfg.min_height = 12.0;
        cfg.max_height = 12.0;
        let grid = generate(&cfg).unwrap();
        assert!(grid.heights().iter().all(|&h| (h - 12.0).abs() < 1e-5));
    }

    #[test]
    fn negative_roughness_is_config_error() {
        let err = generate(&config(5, -0.1, 1)).unwrap_err();
        assert!(matches!(err, RidgeError::InvalidRoughness(r) if r == -0.1));

        let err = generate(&config(5, f32::NAN, 1)).unwrap_err();
        assert!(matches!(err, RidgeError::InvalidRoughness(_)));
    }

    #[test]
    fn default_patch_size_accepts_small_grids() {
        for size in [5, 9, 17] {
            let cfg = FractalConfig {
                terrain_size: size,
                roughness: 1.0,
                min_height: 0.0,
                max_height: 100.0,
                seed: Some(42),
                ..FractalConfig::default()
            };
            assert_eq!(cfg.patch_size, 33);
            let grid = generate(&cfg).unwrap();
            assert_eq!(grid.width(), size);
        }
    }

    #[test]
    fn untiled_patch_size_still_generates() {
        let mut cfg = config(17, 1.0, 1);
        cfg.patch_size = 6;
        assert!(generate(&cfg).is_ok());
    }

    #[test]
    fn overflowing_height_range_is_rejected() {
        let mut cfg = config(5, 1.0, 1);
        cfg.min_height = -3.0e38;
        cfg.max_height = 3.0e38;
        assert!(matches!(generate(&cfg), Err(RidgeError::InvalidConfig(_))));

        cfg.min_height = -5.0e37;
        cfg.max_height = 5.0e37;
        assert!(generate(&cfg).is_ok());
    }

    #[test]
    fn inverted_height_range_is_rejected() {
        let mut cfg = config(5, 1.0, 1);
        cfg.min_height = 10.0;
        cfg.max_height = 0.0;
        assert!(matches!(generate(&cfg), Err(RidgeError::InvalidConfig(_))));
    }

    #[test]
    fn unseeded_generation_still_normalizes() {
        let mut cfg = config(9, 1.0, 0);
        cfg.seed = None;
        let grid = generate(&cfg).unwrap();
        let (lo, hi) = grid.min_max();
        assert!(lo.abs() < 1e-3 && (hi - 100.0).abs() < 1e-3);
    }
}
