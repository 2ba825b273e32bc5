//! Ridgeline Path - Scripted walks across a terrain
//!
//! Loads a path description, rests every point on the terrain surface, and
//! moves a walker along the resulting polyline while keeping it on the ground.

pub mod path;
pub mod walker;

pub use path::TrailPath;
pub use walker::PathWalker;
