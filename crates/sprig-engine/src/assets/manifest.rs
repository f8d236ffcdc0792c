use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::extensions::Repeat;
use crate::math::{Color, Rect};
use crate::renderer::texture::FilterMode;

/// Asset manifest describing the textures, named sprites and frame
/// animations of a game. Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Textures by name.
    #[serde(default)]
    pub textures: HashMap<String, TextureDescriptor>,
    /// Named sprite lookup: name → texture + source region.
    #[serde(default)]
    pub sprites: HashMap<String, SpriteDescriptor>,
    /// Named frame animations, each bound to a sprite.
    #[serde(default)]
    pub animations: HashMap<String, AnimationDescriptor>,
}

/// Describes a single texture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Resource path (e.g., "bundle://tiles.png").
    pub path: String,
    /// Sampling filter. Falls back to the game's default filter.
    #[serde(default)]
    pub filter: Option<FilterMode>,
}

/// Describes a named sprite within a texture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    /// Key into `textures`.
    pub texture: String,
    /// Source region in pixels (default: the whole texture).
    #[serde(default)]
    pub region: Option<Rect>,
    /// Pivot relative to the quad's top-left (default: quad center).
    #[serde(default)]
    pub origin: Option<[f32; 2]>,
    #[serde(default)]
    pub color: Option<Color>,
}

/// Describes a frame animation. Frames are either listed explicitly or laid
/// out on a grid from `start` by whole-frame `offsets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationDescriptor {
    /// Key into `sprites`.
    pub sprite: String,
    /// Seconds per frame.
    pub interval: f64,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    pub frames: Vec<Rect>,
    #[serde(default)]
    pub start: Option<Rect>,
    #[serde(default)]
    pub offsets: Vec<[f32; 2]>,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
