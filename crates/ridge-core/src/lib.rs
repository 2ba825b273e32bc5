//! Ridgeline Core - Shared types for the Ridgeline terrain crates
//!
//! This crate provides what every other Ridgeline crate depends on:
//! - `RidgeError` and the `Result` alias
//! - `RidgeConfig` - layered TOML configuration with the named defaults
//!   for raster loading, fractal synthesis, path alignment and walking

pub mod config;
mod error;

pub use config::{FractalConfig, PathConfig, RasterConfig, RidgeConfig, WalkerConfig};
pub use error::{Result, RidgeError};
