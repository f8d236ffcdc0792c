use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::{EngineError, Result};
use crate::components::sprite::Sprite;
use crate::math::Rect;

/// Stable identity of a loaded texture. Sprites and draw batches refer to
/// textures by id; the content provider owns the pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TextureId(pub u32);

/// Sampling filter the GPU backend should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Crisp pixels.
    #[default]
    Nearest,
    /// Smooth bilinear sampling.
    Linear,
}

/// Decoded image as handed over by a [`Device`](crate::assets::device::Device).
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    /// RGBA8, row-major, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// GPU-visible image: pixels plus the metadata sprites need.
#[derive(Debug, Clone)]
pub struct Texture {
    id: TextureId,
    path: String,
    filter: FilterMode,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Texture {
    /// Validate decoded data and wrap it. Empty images and pixel buffers that
    /// don't match the dimensions are load errors.
    pub fn new(id: TextureId, path: impl Into<String>, data: TextureData, filter: FilterMode) -> Result<Self> {
        let path = path.into();
        if data.width == 0 || data.height == 0 {
            return Err(EngineError::TextureLoad {
                path,
                reason: format!("empty image ({}x{})", data.width, data.height),
            });
        }
        let expected = data.width as usize * data.height as usize * 4;
        if data.pixels.len() != expected {
            return Err(EngineError::TextureLoad {
                path,
                reason: format!("expected {} RGBA bytes, got {}", expected, data.pixels.len()),
            });
        }
        Ok(Self {
            id,
            path,
            filter,
            width: data.width,
            height: data.height,
            pixels: data.pixels,
        })
    }

    pub(crate) fn with_id(mut self, id: TextureId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    /// The resource path this texture was loaded from.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// The whole texture as a source region.
    pub fn bounds(&self) -> Rect {
        Rect::from_parts(Vec2::ZERO, self.size())
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// A sprite showing the whole texture at the origin.
    pub fn create_sprite(&self) -> Sprite {
        Sprite::new(self)
    }
}
