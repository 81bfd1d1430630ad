//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Textured 2D vertex: world position plus atlas UV
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl TexturedVertex {
    /// Byte stride of one vertex in an upload buffer
    pub const STRIDE: usize = std::mem::size_of::<TexturedVertex>();
    /// Byte offset of `uv` within a vertex
    pub const UV_OFFSET: usize = std::mem::size_of::<[f32; 2]>();

    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
        }
    }
}

/// View a vertex slice as raw bytes for upload
pub fn as_bytes(vertices: &[TexturedVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Clear color for the background
pub const BACKGROUND: [f32; 4] = [0.1922, 0.549, 0.9059, 1.0];
