//! Subdivided icosahedron ("icosphere") for the hero mesh.
//!
//! Each of the 20 base faces is split into a triangular grid of
//! `detail + 1` segments per edge and every grid vertex is pushed onto the
//! sphere. Faces do not share vertices, so the vertex count is
//! `20 * (detail + 2) * (detail + 3) / 2`. Normals are the normalized positions.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Radius of the hero sphere.
pub const HERO_RADIUS: f32 = 1.6;
/// Subdivision level of the hero sphere.
pub const HERO_DETAIL: u32 = 90;

const PHI: f32 = 1.618_034;

#[rustfmt::skip]
const BASE_VERTICES: [[f32; 3]; 12] = [
    [-1.0,  PHI, 0.0], [ 1.0,  PHI, 0.0], [-1.0, -PHI, 0.0], [ 1.0, -PHI, 0.0],
    [ 0.0, -1.0, PHI], [ 0.0,  1.0, PHI], [ 0.0, -1.0, -PHI], [ 0.0,  1.0, -PHI],
    [ PHI,  0.0, -1.0], [ PHI,  0.0, 1.0], [-PHI,  0.0, -1.0], [-PHI,  0.0, 1.0],
];

#[rustfmt::skip]
const BASE_FACES: [[usize; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// Vertex layout shared with `shaders/hero.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // normal
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// CPU-side icosphere: vertices plus a `LineList` index buffer covering every
/// triangle edge once per face.
#[derive(Debug, Clone)]
pub struct IcosphereMesh {
    pub vertices: Vec<MeshVertex>,
    pub line_indices: Vec<u32>,
    pub radius: f32,
    pub detail: u32,
}

impl IcosphereMesh {
    /// The sphere the hero draws.
    pub fn hero() -> Self {
        Self::build(HERO_RADIUS, HERO_DETAIL)
    }

    pub fn build(radius: f32, detail: u32) -> Self {
        let cols = detail as usize + 1;
        let per_face = vertices_per_face(detail);
        let mut vertices = Vec::with_capacity(per_face * BASE_FACES.len());
        let mut line_indices = Vec::with_capacity(2 * edges_per_face(detail) * BASE_FACES.len());

        for face in BASE_FACES {
            let [a, b, c] = face.map(|i| Vec3::from_array(BASE_VERTICES[i]));
            let base = vertices.len() as u32;

            for i in 0..=cols {
                let fi = i as f32 / cols as f32;
                let aj = a.lerp(c, fi);
                let bj = b.lerp(c, fi);
                let rows = cols - i;
                for j in 0..=rows {
                    // The apex row has a single vertex; j / rows would be 0 / 0.
                    let p = if rows == 0 { aj } else { aj.lerp(bj, j as f32 / rows as f32) };
                    let n = p.normalize();
                    vertices.push(MeshVertex {
                        position: (n * radius).to_array(),
                        normal: n.to_array(),
                    });
                }
            }

            let at = |i: usize, j: usize| base + grid_index(cols, i, j) as u32;
            for i in 0..=cols {
                let rows = cols - i;
                for j in 0..=rows {
                    if j < rows {
                        line_indices.extend([at(i, j), at(i, j + 1)]);
                    }
                    if i < cols && j < rows {
                        line_indices.extend([at(i, j), at(i + 1, j)]);
                    }
                    if i < cols && j >= 1 {
                        line_indices.extend([at(i, j), at(i + 1, j - 1)]);
                    }
                }
            }
        }

        Self { vertices, line_indices, radius, detail }
    }

    pub fn line_count(&self) -> usize {
        self.line_indices.len() / 2
    }
}

/// `(detail + 2)(detail + 3) / 2`: rows of `detail + 2` down to 1 vertices.
pub fn vertices_per_face(detail: u32) -> usize {
    let d = detail as usize;
    (d + 2) * (d + 3) / 2
}

/// Distinct triangle edges inside one subdivided face.
pub fn edges_per_face(detail: u32) -> usize {
    let cols = detail as usize + 1;
    3 * cols * (cols + 1) / 2
}

/// Offset of grid vertex `(i, j)` inside one face; row `i` holds `cols - i + 1` vertices.
fn grid_index(cols: usize, i: usize, j: usize) -> usize {
    // sum_{k < i} (cols - k + 1)
    i * (cols + 1) - i * (i.saturating_sub(1)) / 2 + j
}
