//! Agent that walks a trail at constant speed, glued to the terrain

use glam::Vec3;
use ridge_core::WalkerConfig;
use ridge_terrain::ElevationQuery;

use crate::path::TrailPath;

/// Walks the segments of a [`TrailPath`] in order, looping back to the start
#[derive(Debug, Clone)]
pub struct PathWalker {
    points: Vec<Vec3>,
    /// Index of the segment's start point
    segment: usize,
    /// Fraction of the current segment covered, in [0, 1]
    progress: f32,
    /// World units per second
    speed: f32,
    position: Vec3,
}

impl PathWalker {
    pub fn new(trail: &TrailPath, speed: f32) -> Self {
        let points = trail.points().to_vec();
        let position = points.first().copied().unwrap_or(Vec3::ZERO);
        Self {
            points,
            segment: 0,
            progress: 0.0,
            speed,
            position,
        }
    }

    pub fn from_config(trail: &TrailPath, config: &WalkerConfig) -> Self {
        Self::new(trail, config.speed)
    }

    /// Advance by `dt` seconds and re-sample the ground height.
    ///
    /// Crossing the end of a segment restarts at the beginning of the next
    /// one; after the last segment the walker returns to the first. A
    /// single-point trail never moves.
    pub fn update<Q: ElevationQuery>(&mut self, dt: f32, surface: &Q) {
        if self.points.len() < 2 {
            return;
        }

        let start = self.points[self.segment];
        let end = self.points[self.segment + 1];
        let length = start.distance(end);

        if length > f32::EPSILON {
            self.progress += self.speed * dt / length;
        } else {
            // Zero-length segment: nothing to walk
            self.progress = f32::INFINITY;
        }

        if self.progress > 1.0 {
            self.progress = 0.0;
            self.segment += 1;
            if self.segment >= self.points.len() - 1 {
                self.segment = 0;
            }
        }

        let start = self.points[self.segment];
        let end = self.points[self.segment + 1];
        let mut next = start.lerp(end, self.progress);
        next.y = surface.elevation_at(next.x, next.z);

        self.position = next;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn segment(&self) -> usize {
        self.segment
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridge_core::PathConfig;
    use ridge_terrain::HeightGrid;

    fn ramp() -> HeightGrid {
        // Elevation equals world x
        HeightGrid::from_fn(21, 21, 1.0, |ix, _| ix as f32).unwrap()
    }

    fn trail(points: &[[f32; 3]], grid: &HeightGrid) -> TrailPath {
        let pts = points.iter().map(|p| Vec3::from_array(*p)).collect();
        TrailPath::from_points(pts, grid, &PathConfig::default()).unwrap()
    }

    #[test]
    fn starts_at_first_point() {
        let grid = ramp();
        let t = trail(&[[2.0, 0.0, 2.0], [8.0, 0.0, 2.0]], &grid);
        let walker = PathWalker::new(&t, 1.0);
        assert_eq!(walker.position(), t.points()[0]);
    }

    #[test]
    fn moves_at_constant_speed_on_surface() {
        let grid = HeightGrid::from_fn(21, 21, 1.0, |_, _| 3.0).unwrap();
        let t = trail(&[[2.0, 0.0, 2.0], [12.0, 0.0, 2.0]], &grid);
        let mut walker = PathWalker::new(&t, 2.0);

        walker.update(1.0, &grid);
        let p = walker.position();
        assert!((p.x - 4.0).abs() < 1e-4);
        assert!((p.z - 2.0).abs() < 1e-4);
        // Walker sits exactly on the surface, no path offset
        assert!((p.y - 3.0).abs() < 1e-4);
        assert!((walker.progress() - 0.2).abs() < 1e-5);
    }

    #[test]
    fn advances_segments_and_loops() {
        let grid = ramp();
        let t = trail(
            &[[1.0, 0.0, 1.0], [3.0, 0.0, 1.0], [3.0, 0.0, 3.0]],
            &grid,
        );
        let mut walker = PathWalker::from_config(&t, &WalkerConfig { speed: 1.0 });

        // First segment climbs the ramp, about 2.83 units: the third step overshoots
        walker.update(1.0, &grid);
        walker.update(1.0, &grid);
        assert_eq!(walker.segment(), 0);
        walker.update(1.0, &grid);
        assert_eq!(walker.segment(), 1);
        assert_eq!(walker.progress(), 0.0);
        assert!((walker.position().x - 3.0).abs() < 1e-5);

        walker.update(1.0, &grid);
        walker.update(1.0, &grid);
        walker.update(1.0, &grid);
        assert_eq!(walker.segment(), 0);
        assert!((walker.position().x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn stays_glued_over_many_steps() {
        let grid = HeightGrid::from_fn(17, 17, 2.0, |ix, iz| {
            ((ix as f32 * 0.5).sin() + (iz as f32 * 0.3).cos()) * 4.0
        })
        .unwrap();
        let t = trail(
            &[[2.0, 0.0, 2.0], [25.0, 0.0, 6.0], [10.0, 0.0, 28.0]],
            &grid,
        );
        let mut walker = PathWalker::new(&t, 7.5);

        for _ in 0..200 {
            walker.update(0.05, &grid);
            let p = walker.position();
            assert!((p.y - grid.elevation_at(p.x, p.z)).abs() < 1e-6);
        }
    }

    #[test]
    fn single_point_trail_never_moves() {
        let grid = ramp();
        let t = trail(&[[5.0, 0.0, 5.0]], &grid);
        let mut walker = PathWalker::new(&t, 10.0);
        walker.update(3.0, &grid);
        assert_eq!(walker.position(), t.points()[0]);
    }

    #[test]
    fn zero_length_segment_is_skipped() {
        let grid = ramp();
        let t = trail(
            &[[4.0, 0.0, 4.0], [4.0, 0.0, 4.0], [9.0, 0.0, 4.0]],
            &grid,
        );
        let mut walker = PathWalker::new(&t, 1.0);
        walker.update(0.1, &grid);
        assert_eq!(walker.segment(), 1);
        assert!(walker.position().is_finite());
    }
}
