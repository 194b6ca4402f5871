//! Subdivided plane geometry in the xy plane, facing +z.

use std::collections::HashSet;

use crate::config::PlaneSpec;

/// CPU-side vertex and index data ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneGeometry {
    pub spec: PlaneSpec,
    /// xyz per vertex.
    pub positions: Vec<f32>,
    /// xyz per vertex.
    pub normals: Vec<f32>,
    /// uv per vertex, v = 1 at the top edge.
    pub uvs: Vec<f32>,
    /// Triangle list.
    pub indices: Vec<u32>,
    /// Line list of unique triangle edges.
    pub wire_indices: Vec<u32>,
}

impl PlaneGeometry {
    pub fn new(spec: PlaneSpec) -> Self {
        let grid_x = spec.width_segments.max(1);
        let grid_y = spec.height_segments.max(1);
        let grid_x1 = grid_x + 1;
        let grid_y1 = grid_y + 1;

        let half_w = spec.width / 2.0;
        let half_h = spec.height / 2.0;
        let seg_w = spec.width / grid_x as f32;
        let seg_h = spec.height / grid_y as f32;

        let count = (grid_x1 * grid_y1) as usize;
        let mut positions = Vec::with_capacity(count * 3);
        let mut normals = Vec::with_capacity(count * 3);
        let mut uvs = Vec::with_capacity(count * 2);

        for iy in 0..grid_y1 {
            let y = iy as f32 * seg_h - half_h;
            for ix in 0..grid_x1 {
                let x = ix as f32 * seg_w - half_w;
                positions.extend_from_slice(&[x, -y, 0.0]);
                normals.extend_from_slice(&[0.0, 0.0, 1.0]);
                uvs.extend_from_slice(&[
                    ix as f32 / grid_x as f32,
                    1.0 - iy as f32 / grid_y as f32,
                ]);
            }
        }

        let mut indices = Vec::with_capacity((grid_x * grid_y * 6) as usize);
        for iy in 0..grid_y {
            for ix in 0..grid_x {
                let a = ix + grid_x1 * iy;
                let b = ix + grid_x1 * (iy + 1);
                let c = (ix + 1) + grid_x1 * (iy + 1);
                let d = (ix + 1) + grid_x1 * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        let wire_indices = unique_edges(&indices);

        Self {
            spec,
            positions,
            normals,
            uvs,
            indices,
            wire_indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

fn unique_edges(triangles: &[u32]) -> Vec<u32> {
    let mut seen = HashSet::with_capacity(triangles.len());
    let mut lines = Vec::with_capacity(triangles.len() * 2);
    for tri in triangles.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let key = (a.min(b), a.max(b));
            if seen.insert(key) {
                lines.extend_from_slice(&[a, b]);
            }
        }
    }
    lines
}
