//! Path loading and surface alignment

use std::path::Path;

use glam::Vec3;
use ridge_core::{PathConfig, Result, RidgeError};
use ridge_terrain::ElevationQuery;

/// An ordered polyline resting on a terrain surface
#[derive(Debug, Clone, PartialEq)]
pub struct TrailPath {
    points: Vec<Vec3>,
}

impl TrailPath {
    /// Load a path file of whitespace-separated `x y z` triples.
    ///
    /// `x` and `z` are multiplied by `horizontal_scale` (for raster terrains,
    /// the per-pixel spacing from `Terrain::path_scale`);
    /// `y` is discarded and replaced by the surface elevation plus the
    /// configured offset.
    pub fn load<Q: ElevationQuery>(
        path: &Path,
        surface: &Q,
        horizontal_scale: f32,
        config: &PathConfig,
    ) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let raw = parse_points(&content)?;
        if raw.is_empty() {
            return Err(RidgeError::EmptyPath(path.display().to_string()));
        }

        let scaled: Vec<Vec3> = raw
            .into_iter()
            .map(|p| Vec3::new(p.x * horizontal_scale, p.y, p.z * horizontal_scale))
            .collect();

        let trail = Self::from_points(scaled, surface, config)?;
        log::info!(
            "Loaded {} path points from '{}'",
            trail.len(),
            path.display()
        );
        Ok(trail)
    }

    /// Align world-space points to the surface.
    pub fn from_points<Q: ElevationQuery>(
        points: Vec<Vec3>,
        surface: &Q,
        config: &PathConfig,
    ) -> Result<Self> {
        if points.is_empty() {
            return Err(RidgeError::EmptyPath("no points given".to_string()));
        }

        let points = points
            .into_iter()
            .map(|p| Vec3::new(p.x, surface.elevation_at(p.x, p.z) + config.surface_offset, p.z))
            .collect();

        Ok(Self { points })
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of segment lengths
    pub fn length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

/// Parse whitespace-separated float triples.
fn parse_points(content: &str) -> Result<Vec<Vec3>> {
    let values = content
        .split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            token.parse::<f32>().map_err(|e| {
                RidgeError::Parse(format!("path token {} ('{}'): {}", i, token, e))
            })
        })
        .collect::<Result<Vec<f32>>>()?;

    if values.len() % 3 != 0 {
        return Err(RidgeError::Parse(format!(
            "path has {} values, which is not a whole number of x y z triples",
            values.len()
        )));
    }

    Ok(values
        .chunks_exact(3)
        .map(|c| Vec3::new(c[0], c[1], c[2]))
        .collect())
}
