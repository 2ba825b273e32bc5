//! Terrain mesh and patch generation

use glam::Vec3;

use crate::grid::HeightGrid;
use crate::normals::{compute_vertex_normals, grid_indices};

/// Renderable geometry for a whole height grid
#[derive(Debug, Clone)]
pub struct TerrainMesh {
    /// Vertices along X
    pub width: usize,
    /// Vertices along Z
    pub depth: usize,
    /// Vertex positions in world space, row-major like the grid
    pub positions: Vec<[f32; 3]>,
    /// Smooth vertex normals
    pub normals: Vec<[f32; 3]>,
    /// UV coordinates normalized over the entire terrain
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices
    pub indices: Vec<u32>,
    pub aabb_min: [f32; 3],
    pub aabb_max: [f32; 3],
}

/// A square section of a [`TerrainMesh`]
#[derive(Debug, Clone)]
pub struct TerrainPatch {
    /// Grid position (column, row) in the patch grid
    pub grid_pos: (usize, usize),
    /// Vertices along X and Z in this patch
    pub size: (usize, usize),
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    /// Indices into this patch's own vertex arrays
    pub indices: Vec<u32>,
    pub aabb_min: [f32; 3],
    pub aabb_max: [f32; 3],
}

impl TerrainMesh {
    /// Triangulate every cell of the grid and derive vertex normals.
    pub fn from_grid(grid: &HeightGrid) -> Self {
        let (width, depth) = (grid.width(), grid.depth());
        let scale = grid.horizontal_scale();

        let mut points = Vec::with_capacity(width * depth);
        let mut uvs = Vec::with_capacity(width * depth);

        for iz in 0..depth {
            for ix in 0..width {
                points.push(Vec3::new(
                    ix as f32 * scale,
                    grid.get(ix, iz),
                    iz as f32 * scale,
                ));
                uvs.push([
                    ix as f32 / (width - 1) as f32,
                    iz as f32 / (depth - 1) as f32,
                ]);
            }
        }

        let indices = grid_indices(width, depth);
        let normals = compute_vertex_normals(&points, &indices);
        let positions: Vec<[f32; 3]> = points.iter().map(|p| p.to_array()).collect();
        let (aabb_min, aabb_max) = bounds(&positions);

        Self {
            width,
            depth,
            positions,
            normals: normals.iter().map(|n| n.to_array()).collect(),
            uvs,
            indices,
            aabb_min,
            aabb_max,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of patches along X and Z for `patch_size` vertices per edge
    pub fn patch_grid(&self, patch_size: usize) -> (usize, usize) {
        let stride = patch_size.max(2) - 1;
        (
            (self.width - 1).div_ceil(stride),
            (self.depth - 1).div_ceil(stride),
        )
    }

    /// Split into patches of `patch_size` vertices per edge.
    ///
    /// Neighbouring patches share their boundary vertices, and normals are
    /// copied from the full mesh so seams shade identically. When the grid
    /// does not divide evenly the last row/column of patches is smaller.
    pub fn patches(&self, patch_size: usize) -> Vec<TerrainPatch> {
        let stride = patch_size.max(2) - 1;
        let (cols, rows) = self.patch_grid(patch_size);
        let mut patches = Vec::with_capacity(cols * rows);

        for row in 0..rows {
            for col in 0..cols {
                let x0 = col * stride;
                let z0 = row * stride;
                let x1 = (x0 + stride).min(self.width - 1);
                let z1 = (z0 + stride).min(self.depth - 1);
                patches.push(self.extract_patch((col, row), x0..=x1, z0..=z1));
            }
        }

        patches
    }

    fn extract_patch(
        &self,
        grid_pos: (usize, usize),
        xs: std::ops::RangeInclusive<usize>,
        zs: std::ops::RangeInclusive<usize>,
    ) -> TerrainPatch {
        let pw = xs.end() - xs.start() + 1;
        let pd = zs.end() - zs.start() + 1;

        let mut positions = Vec::with_capacity(pw * pd);
        let mut normals = Vec::with_capacity(pw * pd);
        let mut uvs = Vec::with_capacity(pw * pd);

        for z in zs {
            for x in xs.clone() {
                let i = z * self.width + x;
                positions.push(self.positions[i]);
                normals.push(self.normals[i]);
                uvs.push(self.uvs[i]);
            }
        }

        let (aabb_min, aabb_max) = bounds(&positions);

        TerrainPatch {
            grid_pos,
            size: (pw, pd),
            positions,
            normals,
            uvs,
            indices: grid_indices(pw, pd),
            aabb_min,
            aabb_max,
        }
    }
}

fn bounds(positions: &[[f32; 3]]) -> ([f32; 3], [f32; 3]) {
    let mut aabb_min = [f32::MAX; 3];
    let mut aabb_max = [f32::MIN; 3];
    for pos in positions {
        for i in 0..3 {
            aabb_min[i] = aabb_min[i].min(pos[i]);
            aabb_max[i] = aabb_max[i].max(pos[i]);
        }
    }
    (aabb_min, aabb_max)
}
