//! CPU-side sprite batcher.
//!
//! Collects the cached vertex buffers of drawn sprites into one contiguous
//! buffer per texture and vertex layout. Within one `draw` call sprites are
//! grouped by that key in first-seen order; separate `draw` calls never share
//! a batch, so callers keep painter's order across calls. A GPU backend
//! uploads [`BatchRenderer::batches`] after `end()`.

use std::cell::RefCell;

use crate::api::error::{EngineError, Result};
use crate::api::game::GameConfig;
use crate::components::sprite::{Sprite, VertexLayout};
use crate::math::Color;
use crate::renderer::camera::{Camera, CameraUniform};
use crate::renderer::texture::TextureId;
use crate::renderer::traits::{FramePhase, Renderer};

/// Sprites of one `draw` call sharing a texture binding.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch {
    pub texture: TextureId,
    pub layout: VertexLayout,
    /// Interleaved vertices, `sprite_count * layout.floats_per_sprite()` floats.
    pub vertices: Vec<f32>,
}

impl DrawBatch {
    pub fn sprite_count(&self) -> usize {
        self.vertices.len() / self.layout.floats_per_sprite()
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

#[derive(Debug, Clone)]
pub struct BatchRenderer {
    phase: FramePhase,
    clear_color: Color,
    capacity: usize,
    view: CameraUniform,
    pending: Vec<DrawBatch>,
    batches: Vec<DrawBatch>,
    frames: u64,
}

impl BatchRenderer {
    /// `capacity` is a hint for how many sprites a frame usually holds.
    pub fn new(clear_color: Color, capacity: usize) -> Self {
        Self {
            phase: FramePhase::Idle,
            clear_color,
            capacity,
            view: Camera::default().uniform(),
            pending: Vec::new(),
            batches: Vec::new(),
            frames: 0,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.clear_color, config.batch_capacity)
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// Batches of the last completed frame.
    pub fn batches(&self) -> &[DrawBatch] {
        &self.batches
    }

    /// View matrix of the last `begin`.
    pub fn view(&self) -> CameraUniform {
        self.view
    }

    /// Completed frames.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn sprite_count(&self) -> usize {
        self.batches.iter().map(DrawBatch::sprite_count).sum()
    }

    fn fail(&mut self, reason: &'static str) -> EngineError {
        log::warn!("frame aborted: {}", reason);
        self.abort();
        EngineError::Frame(reason)
    }

    /// Appends to the batch for the sprite's key among those opened since `first`.
    fn push(&mut self, first: usize, sprite: &Sprite) {
        let texture = sprite.texture();
        let layout = sprite.layout();
        let group = self.pending[first..]
            .iter_mut()
            .find(|batch| batch.texture == texture && batch.layout == layout);
        match group {
            Some(batch) => {
                batch.vertices.extend_from_slice(sprite.vertices());
            }
            None => {
                let mut vertices = Vec::with_capacity(self.capacity.max(1) * layout.floats_per_sprite());
                vertices.extend_from_slice(sprite.vertices());
                self.pending.push(DrawBatch { texture, layout, vertices });
            }
        }
    }
}

impl Default for BatchRenderer {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl Renderer for BatchRenderer {
    fn backend(&self) -> &'static str {
        "batch"
    }

    fn begin(&mut self, camera: &Camera) -> Result<()> {
        if self.phase == FramePhase::Drawing {
            return Err(self.fail("begin called twice without end"));
        }
        self.view = camera.uniform();
        self.pending.clear();
        self.phase = FramePhase::Drawing;
        Ok(())
    }

    fn draw(&mut self, sprites: &[&Sprite]) -> Result<()> {
        if self.phase != FramePhase::Drawing {
            return Err(self.fail("draw called outside begin/end"));
        }
        let first = self.pending.len();
        for sprite in sprites {
            self.push(first, sprite);
        }
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        if self.phase != FramePhase::Drawing {
            return Err(self.fail("end called without begin"));
        }
        self.batches = std::mem::take(&mut self.pending);
        self.phase = FramePhase::Idle;
        self.frames += 1;
        Ok(())
    }

    fn abort(&mut self) {
        self.pending.clear();
        self.phase = FramePhase::Idle;
    }
}

/// The renderer as handed out by [`Content`](crate::assets::Content): shared
/// between the game and the host, borrowed mutably for one frame at a time.
pub type SharedRenderer = RefCell<BatchRenderer>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::texture::{FilterMode, Texture, TextureData};
    use glam::Vec2;

    fn texture(id: u32) -> Texture {
        let data = TextureData {
            pixels: vec![0; 8 * 8 * 4],
            width: 8,
            height: 8,
        };
        Texture::new(TextureId(id), "bundle://t.png", data, FilterMode::Nearest).unwrap()
    }

    #[test]
    fn one_draw_groups_interleaved_textures() {
        let (a, b) = (texture(1), texture(2));
        let s1 = a.create_sprite();
        let s2 = b.create_sprite();
        let s3 = a.create_sprite().with_position(Vec2::new(20.0, 0.0));

        let mut renderer = BatchRenderer::default();
        renderer.begin(&Camera::default()).unwrap();
        renderer.draw(&[&s1, &s2, &s3]).unwrap();
        renderer.end().unwrap();

        let batches = renderer.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].texture, TextureId(1));
        assert_eq!(batches[0].sprite_count(), 2);
        assert_eq!(&batches[0].vertices[..48], s1.vertices());
        assert_eq!(&batches[0].vertices[48..], s3.vertices());
        assert_eq!(batches[1].texture, TextureId(2));
        assert_eq!(batches[1].sprite_count(), 1);
    }

    #[test]
    fn separate_draws_keep_their_own_batches() {
        let (a, b) = (texture(1), texture(2));
        let s1 = a.create_sprite();
        let s2 = a.create_sprite().with_position(Vec2::new(10.0, 0.0));
        let s3 = b.create_sprite();
        let s4 = a.create_sprite();

        let mut renderer = BatchRenderer::default();
        renderer.begin(&Camera::new(64.0, 64.0)).unwrap();
        renderer.draw(&[&s1, &s2, &s3]).unwrap();
        renderer.draw(&[&s4]).unwrap();
        renderer.end().unwrap();

        let batches = renderer.batches();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].texture, TextureId(1));
        assert_eq!(batches[0].sprite_count(), 2);
        assert_eq!(&batches[0].vertices[..48], s1.vertices());
        assert_eq!(&batches[0].vertices[48..], s2.vertices());
        assert_eq!(batches[1].texture, TextureId(2));
        assert_eq!(batches[2].texture, TextureId(1));
        assert_eq!(renderer.sprite_count(), 4);
        assert_eq!(renderer.frame_count(), 1);
    }

    #[test]
    fn layout_change_splits_a_batch() {
        let a = texture(1);
        let tinted = a.create_sprite();
        let plain = Sprite::with_layout(&a, VertexLayout::PositionUv);

        let mut renderer = BatchRenderer::default();
        renderer.begin(&Camera::default()).unwrap();
        renderer.draw(&[&tinted, &plain]).unwrap();
        renderer.end().unwrap();

        assert_eq!(renderer.batches().len(), 2);
        assert_eq!(renderer.batches()[1].vertices.len(), 24);
        assert_eq!(renderer.batches()[1].vertex_bytes().len(), 96);
    }

    #[test]
    fn begin_captures_the_camera() {
        let mut camera = Camera::new(100.0, 100.0);
        camera.position = Vec2::new(5.0, 5.0);
        let mut renderer = BatchRenderer::default();
        renderer.begin(&camera).unwrap();
        renderer.end().unwrap();
        assert_eq!(renderer.view().view, camera.uniform().view);
        assert!(renderer.batches().is_empty());
    }

    #[test]
    fn draw_outside_frame_discards_partial_work() {
        let a = texture(1);
        let sprite = a.create_sprite();
        let mut renderer = BatchRenderer::default();

        renderer.begin(&Camera::default()).unwrap();
        renderer.draw(&[&sprite]).unwrap();
        renderer.end().unwrap();

        renderer.begin(&Camera::default()).unwrap();
        renderer.draw(&[&sprite, &sprite]).unwrap();
        assert!(matches!(renderer.begin(&Camera::default()), Err(EngineError::Frame(_))));
        assert_eq!(renderer.phase(), FramePhase::Idle);

        assert!(matches!(renderer.draw(&[&sprite]), Err(EngineError::Frame(_))));
        assert!(matches!(renderer.end(), Err(EngineError::Frame(_))));
        // Previous frame's batches are untouched.
        assert_eq!(renderer.sprite_count(), 1);
        assert_eq!(renderer.frame_count(), 1);
    }
}
