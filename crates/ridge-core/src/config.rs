//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `RIDGE_SEED`, `RIDGE_ROUGHNESS`,
//!    `RIDGE_HEIGHT_SCALE`, `RIDGE_AMPLIFICATION`
//! 2. Project-local: `ridge.toml`
//! 3. Global: `~/.ridge/config.toml`
//!
//! Every field has a default, so any table or key may be omitted.

use crate::{Result, RidgeError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Multiplier applied to raster samples to emphasize relief.
pub const DEFAULT_AMPLIFICATION: f32 = 3.0;
/// Vertical lift applied to aligned path points so they don't z-fight the mesh.
pub const DEFAULT_SURFACE_OFFSET: f32 = 0.1;
/// Walker speed in world units per second.
pub const DEFAULT_WALK_SPEED: f32 = 10.0;

/// Raster heightmap loading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    /// Keep every `step`-th pixel along each axis
    pub step: usize,
    /// World units between adjacent source pixels
    pub horizontal_scale: f32,
    /// Elevation of a full-white pixel before amplification
    pub height_scale: f32,
    pub amplification: f32,
    /// Vertices per patch edge when the mesh is split up
    pub patch_size: usize,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            step: 4,
            horizontal_scale: 5.0,
            height_scale: 200.0,
            amplification: DEFAULT_AMPLIFICATION,
            patch_size: 33,
        }
    }
}

/// Diamond-square synthesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalConfig {
    /// Side length of the square grid, ideally `2^n + 1`
    pub terrain_size: usize,
    /// Vertices per patch edge; `terrain_size - 1` must be a multiple of `patch_size - 1`
    pub patch_size: usize,
    /// Amplitude decay exponent: each level scales the offset range by `2^-roughness`
    pub roughness: f32,
    pub min_height: f32,
    pub max_height: f32,
    /// Fixed seed for reproducible output; `None` seeds from the OS
    pub seed: Option<u64>,
    /// World units between adjacent grid cells
    pub horizontal_scale: f32,
}

impl Default for FractalConfig {
    fn default() -> Self {
        Self {
            terrain_size: 257,
            patch_size: 33,
            roughness: 1.0,
            min_height: 0.0,
            max_height: 300.0,
            seed: None,
            horizontal_scale: 5.0,
        }
    }
}

/// Path alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub surface_offset: f32,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            surface_offset: DEFAULT_SURFACE_OFFSET,
        }
    }
}

/// Path walker movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerConfig {
    pub speed: f32,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_WALK_SPEED,
        }
    }
}

/// Resolved configuration with all layers applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RidgeConfig {
    pub raster: RasterConfig,
    pub fractal: FractalConfig,
    pub path: PathConfig,
    pub walker: WalkerConfig,
}

impl RidgeConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut merged = toml::Table::new();

        // Layer 1: Global config (~/.ridge/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                Self::merge_into(&mut merged, Self::load_file(&global_path)?);
            }
        }

        // Layer 2: Project-local config (ridge.toml)
        let local_path = PathBuf::from("ridge.toml");
        if local_path.exists() {
            Self::merge_into(&mut merged, Self::load_file(&local_path)?);
        }

        let mut config: RidgeConfig = toml::Value::Table(merged).try_into()?;

        // Layer 3: Environment variable overrides
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load config from a specific file path only, then apply env overrides
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let table = Self::load_file(path)?;
        let mut config: RidgeConfig = toml::Value::Table(table).try_into()?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse config from TOML text without touching the environment
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".ridge").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<toml::Table> {
        let content = std::fs::read_to_string(path)?;
        content.parse::<toml::Table>().map_err(|e| {
            RidgeError::TomlParse(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    /// Deep-merge `overlay` into `base`; nested tables merge key by key.
    fn merge_into(base: &mut toml::Table, overlay: toml::Table) {
        for (key, value) in overlay {
            match (base.get_mut(&key), value) {
                (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                    Self::merge_into(existing, incoming);
                }
                (_, value) => {
                    base.insert(key, value);
                }
            }
        }
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup("RIDGE_SEED") {
            self.fractal.seed = Some(parse_env("RIDGE_SEED", &seed)?);
        }
        if let Some(roughness) = lookup("RIDGE_ROUGHNESS") {
            self.fractal.roughness = parse_env("RIDGE_ROUGHNESS", &roughness)?;
        }
        if let Some(scale) = lookup("RIDGE_HEIGHT_SCALE") {
            self.raster.height_scale = parse_env("RIDGE_HEIGHT_SCALE", &scale)?;
        }
        if let Some(amp) = lookup("RIDGE_AMPLIFICATION") {
            self.raster.amplification = parse_env("RIDGE_AMPLIFICATION", &amp)?;
        }
        Ok(())
    }
}

fn parse_env<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| RidgeError::InvalidConfig(format!("{}='{}': {}", key, raw, e)))
}
