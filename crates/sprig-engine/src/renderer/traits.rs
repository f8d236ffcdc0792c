//! Renderer contract consumed by games.
//!
//! The engine core never talks to a GPU. A renderer receives sprites whose
//! vertex buffers are already built, and a GPU backend uploads whatever the
//! renderer collected.

use crate::api::error::Result;
use crate::components::sprite::Sprite;
use crate::renderer::camera::Camera;

/// Frame lifecycle: `begin`, any number of `draw` calls, `end`.
///
/// # Example Implementation
///
/// ```ignore
/// struct CountingRenderer { sprites: usize }
///
/// impl Renderer for CountingRenderer {
///     fn backend(&self) -> &'static str { "counting" }
///     fn begin(&mut self, _camera: &Camera) -> Result<()> { self.sprites = 0; Ok(()) }
///     fn draw(&mut self, sprites: &[&Sprite]) -> Result<()> { self.sprites += sprites.len(); Ok(()) }
///     fn end(&mut self) -> Result<()> { Ok(()) }
/// }
/// ```
pub trait Renderer {
    /// Backend identifier (e.g. "batch", "wgpu", "gl").
    fn backend(&self) -> &'static str;

    /// Start a frame viewed through `camera`.
    fn begin(&mut self, camera: &Camera) -> Result<()>;

    /// Queue sprites in painter's order. An error aborts the frame.
    fn draw(&mut self, sprites: &[&Sprite]) -> Result<()>;

    /// Finish the frame.
    fn end(&mut self) -> Result<()>;

    /// Throw away the frame in progress, if any.
    fn abort(&mut self) {}
}

/// Lifecycle phase, shared by renderer implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FramePhase {
    #[default]
    Idle,
    Drawing,
}
