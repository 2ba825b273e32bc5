//! Ridgeline Terrain - Height-field terrain subsystem
//!
//! Turns raster heightmaps or diamond-square synthesis into an immutable
//! [`HeightGrid`], answers continuous elevation queries with bilinear
//! interpolation, and emits mesh data (positions, normals, UVs, indices,
//! patches) for a renderer to consume. Does not depend on any graphics API.

pub mod fractal;
pub mod grid;
pub mod mesh;
pub mod normals;
pub mod raster;
pub mod sampler;
pub mod terrain;

pub use fractal::FractalGrid;
pub use grid::HeightGrid;
pub use mesh::{TerrainMesh, TerrainPatch};
pub use normals::compute_vertex_normals;
pub use sampler::{elevation_at, ElevationQuery};
pub use terrain::Terrain;
