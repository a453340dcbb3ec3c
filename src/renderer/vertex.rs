//! Vertex types for textured sprite quads

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// 2D vertex with position and texture coordinate
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
        }
    }

    /// Two triangles covering `min..max`, textured with `uv_min..uv_max`
    ///
    /// Texture rows run top-down, so the top edge of the quad samples
    /// `uv_min.y`.
    pub fn quad(min: Vec2, max: Vec2, uv_min: Vec2, uv_max: Vec2) -> [Vertex; 6] {
        let bottom_left = Vertex::new(min.x, min.y, uv_min.x, uv_max.y);
        let bottom_right = Vertex::new(max.x, min.y, uv_max.x, uv_max.y);
        let top_right = Vertex::new(max.x, max.y, uv_max.x, uv_min.y);
        let top_left = Vertex::new(min.x, max.y, uv_min.x, uv_min.y);
        [
            bottom_left,
            bottom_right,
            top_right,
            bottom_left,
            top_right,
            top_left,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 16);
        let vertices = [Vertex::new(1.0, 2.0, 0.5, 0.25); 2];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 32);
    }

    #[test]
    fn test_quad_flips_v() {
        let quad = Vertex::quad(Vec2::ZERO, Vec2::ONE, Vec2::ZERO, Vec2::ONE);
        assert_eq!(quad[0], Vertex::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(quad[5], Vertex::new(0.0, 1.0, 0.0, 0.0));
    }
}
