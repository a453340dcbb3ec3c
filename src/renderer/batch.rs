//! Sprite batching
//!
//! Collects one textured quad per rendered entity into a flat vertex list
//! plus per-texture draw ranges, ready for upload to a GPU backend.

use glam::Vec2;

use super::Renderer;
use super::vertex::Vertex;
use crate::assets::TextureHandle;
use crate::sim::Entity;

/// A contiguous range of vertices drawn with one texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub texture: TextureHandle,
    pub first_vertex: u32,
    pub vertex_count: u32,
}

/// One frame's worth of sprite geometry
#[derive(Debug, Default)]
pub struct SpriteBatch {
    vertices: Vec<Vertex>,
    draws: Vec<DrawCall>,
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame, keeping allocations
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.draws.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    /// Vertex data as raw bytes for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

impl Renderer for SpriteBatch {
    fn render(&mut self, entity: &Entity) {
        if !entity.active {
            return;
        }

        let center = entity.position.truncate();
        let half = entity.scale.truncate().abs() * 0.5;
        let (uv_min, uv_max) = match &entity.animation {
            Some(animation) => animation.atlas_cell(),
            None => (Vec2::ZERO, Vec2::ONE),
        };

        let first_vertex = self.vertices.len() as u32;
        self.vertices
            .extend_from_slice(&Vertex::quad(center - half, center + half, uv_min, uv_max));

        // Consecutive sprites sharing a texture extend the same draw
        match self.draws.last_mut() {
            Some(last) if last.texture == entity.texture => last.vertex_count += 6,
            _ => self.draws.push(DrawCall {
                texture: entity.texture,
                first_vertex,
                vertex_count: 6,
            }),
        }
    }
}
