//! Smooth vertex normals from triangle adjacency

use glam::Vec3;

/// Accumulate unit face normals into each triangle's vertices, then renormalize.
///
/// Every triangle is summed before any vertex is normalized. Degenerate
/// (zero-area) faces contribute nothing; a vertex with no usable faces gets `+Y`.
pub fn compute_vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let v0 = positions[i0];
        let v1 = positions[i1];
        let v2 = positions[i2];

        let face = (v1 - v0).cross(v2 - v0).normalize_or_zero();

        normals[i0] += face;
        normals[i1] += face;
        normals[i2] += face;
    }

    for n in &mut normals {
        *n = n.normalize_or(Vec3::Y);
    }

    normals
}

/// Index buffer for a `width x depth` vertex lattice, two triangles per quad.
///
/// Each quad emits `(tl, bl, tr)` then `(tr, bl, br)`, which faces `+Y` for
/// a lattice laid out along `+X` / `+Z`.
pub fn grid_indices(width: usize, depth: usize) -> Vec<u32> {
    let quads = width.saturating_sub(1) * depth.saturating_sub(1);
    let mut indices = Vec::with_capacity(quads * 6);

    for z in 0..depth.saturating_sub(1) {
        for x in 0..width.saturating_sub(1) {
            let tl = (z * width + x) as u32;
            let tr = tl + 1;
            let bl = ((z + 1) * width + x) as u32;
            let br = bl + 1;

            indices.extend_from_slice(&[tl, bl, tr, tr, bl, br]);
        }
    }

    indices
}
