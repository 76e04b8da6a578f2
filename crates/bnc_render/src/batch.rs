//! CPU-side quad mesh rebuilt every frame.
//!
//! Quads are appended in draw order. Consecutive quads that share a texture
//! key collapse into one draw call, so N sprites drawn from the same texture
//! cost a single `draw_indexed` plus one more for the overlay.

use crate::vertex::{QuadVertex, QUAD_INDICES};

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall<K> {
    pub key: K,
    pub index_start: u32,
    pub index_count: u32,
}

#[derive(Debug)]
pub struct SpriteBatch<K> {
    vertices: Vec<QuadVertex>,
    indices: Vec<u32>,
    draw_calls: Vec<DrawCall<K>>,
}

impl<K: PartialEq> SpriteBatch<K> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            draw_calls: Vec::new(),
        }
    }

    /// Drop the previous frame's mesh, keeping the allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.draw_calls.clear();
    }

    pub fn push_quad(&mut self, key: K, x: f32, y: f32, w: f32, h: f32) {
        let base_index = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&QuadVertex::quad(x, y, w, h));

        let draw_start = self.indices.len() as u32;
        self.indices
            .extend(QUAD_INDICES.iter().map(|i| base_index + i));

        if let Some(last) = self.draw_calls.last_mut() {
            let contiguous = last.index_start + last.index_count == draw_start;
            if last.key == key && contiguous {
                last.index_count += QUAD_INDICES.len() as u32;
                return;
            }
        }
        self.draw_calls.push(DrawCall {
            key,
            index_start: draw_start,
            index_count: QUAD_INDICES.len() as u32,
        });
    }

    pub fn vertices(&self) -> &[QuadVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn draw_calls(&self) -> &[DrawCall<K>] {
        &self.draw_calls
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl<K: PartialEq> Default for SpriteBatch<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_texture_merges_into_one_call() {
        let mut batch = SpriteBatch::new();
        for i in 0..100 {
            batch.push_quad("sprite", i as f32, 0.0, 32.0, 32.0);
        }
        assert_eq!(batch.quad_count(), 100);
        assert_eq!(batch.indices().len(), 600);
        assert_eq!(
            batch.draw_calls(),
            &[DrawCall {
                key: "sprite",
                index_start: 0,
                index_count: 600,
            }]
        );
    }

    #[test]
    fn texture_switch_starts_new_call() {
        let mut batch = SpriteBatch::new();
        batch.push_quad(1u32, 0.0, 0.0, 8.0, 8.0);
        batch.push_quad(1u32, 8.0, 0.0, 8.0, 8.0);
        batch.push_quad(2u32, 700.0, 10.0, 90.0, 20.0);
        batch.push_quad(1u32, 16.0, 0.0, 8.0, 8.0);

        let calls = batch.draw_calls();
        assert_eq!(calls.len(), 3);
        assert_eq!((calls[0].index_start, calls[0].index_count), (0, 12));
        assert_eq!((calls[1].key, calls[1].index_start), (2, 12));
        assert_eq!((calls[2].key, calls[2].index_start), (1, 18));
    }

    #[test]
    fn indices_reference_own_quad() {
        let mut batch = SpriteBatch::new();
        batch.push_quad('a', 0.0, 0.0, 1.0, 1.0);
        batch.push_quad('a', 0.0, 0.0, 1.0, 1.0);
        assert_eq!(&batch.indices()[6..], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn clear_resets_mesh() {
        let mut batch = SpriteBatch::new();
        batch.push_quad(0u8, 0.0, 0.0, 1.0, 1.0);
        batch.clear();
        assert!(batch.is_empty());
        assert!(batch.draw_calls().is_empty());
        assert!(batch.indices().is_empty());
    }
}
