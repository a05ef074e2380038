//! CPU-side mesh data
//!
//! Vertex layout and procedural primitives. Geometry is uploaded through
//! [`GraphicsApi::create_vertex_array`](super::GraphicsApi::create_vertex_array)
//! and referenced afterwards only by handle.

use bytemuck::{Pod, Zeroable};

/// Interleaved vertex: position, normal, texture coordinates
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Object-space position
    pub position: [f32; 3],
    /// Object-space normal
    pub normal: [f32; 3],
    /// Texture coordinates
    pub uv: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// CPU-side mesh: vertices plus a 32-bit triangle-list index buffer
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex data
    pub vertices: Vec<Vertex>,
    /// Triangle-list indices into `vertices`
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of indices in the mesh
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Build a flat grid on the XZ plane centered at the origin
    ///
    /// `half_extent` is half the side length; `subdivisions` is the number
    /// of cells along each side. Normals point up, texture coordinates span
    /// the full [0, 1] range across the grid.
    pub fn plane(half_extent: f32, subdivisions: u32) -> Self {
        let cells = subdivisions.max(1);
        let side = cells + 1;
        let step = (half_extent * 2.0) / cells as f32;

        let mut vertices = Vec::with_capacity((side * side) as usize);
        for row in 0..side {
            for col in 0..side {
                let x = -half_extent + col as f32 * step;
                let z = -half_extent + row as f32 * step;
                vertices.push(Vertex::new(
                    [x, 0.0, z],
                    [0.0, 1.0, 0.0],
                    [col as f32 / cells as f32, row as f32 / cells as f32],
                ));
            }
        }

        let mut indices = Vec::with_capacity((cells * cells * 6) as usize);
        for row in 0..cells {
            for col in 0..cells {
                let top_left = row * side + col;
                let top_right = top_left + 1;
                let bottom_left = top_left + side;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[top_left, bottom_left, top_right]);
                indices.extend_from_slice(&[top_right, bottom_left, bottom_right]);
            }
        }

        Self { vertices, indices }
    }

    /// Build an axis-aligned cube centered at the origin
    ///
    /// Each face carries its own four vertices so normals stay flat.
    pub fn cube(half_extent: f32) -> Self {
        let e = half_extent;

        // (normal, four corners counter-clockwise seen from outside)
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            ([0.0, 0.0, 1.0], [[-e, -e, e], [e, -e, e], [e, e, e], [-e, e, e]]),
            ([0.0, 0.0, -1.0], [[e, -e, -e], [-e, -e, -e], [-e, e, -e], [e, e, -e]]),
            ([1.0, 0.0, 0.0], [[e, -e, e], [e, -e, -e], [e, e, -e], [e, e, e]]),
            ([-1.0, 0.0, 0.0], [[-e, -e, -e], [-e, -e, e], [-e, e, e], [-e, e, -e]]),
            ([0.0, 1.0, 0.0], [[-e, e, e], [e, e, e], [e, e, -e], [-e, e, -e]]),
            ([0.0, -1.0, 0.0], [[-e, -e, -e], [e, -e, -e], [e, -e, e], [-e, -e, e]]),
        ];

        let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, corners) in &faces {
            let base = vertices.len() as u32;
            for (corner, uv) in corners.iter().zip(uvs.iter()) {
                vertices.push(Vertex::new(*corner, *normal, *uv));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }
}
