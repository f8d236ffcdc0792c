use serde::{Deserialize, Serialize};

use crate::api::error::Result;
use crate::assets::content::Content;
use crate::components::sprite::VertexLayout;
use crate::math::Color;
use crate::renderer::camera::Camera;
use crate::renderer::texture::FilterMode;
use crate::renderer::traits::Renderer;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Color the backend clears to before drawing (default: black).
    pub clear_color: Color,
    /// Filter for textures loaded without an explicit one (default: nearest).
    pub default_filter: FilterMode,
    /// Vertex layout for sprites built from the manifest (default: tinted).
    pub vertex_layout: VertexLayout,
    /// Expected sprites per draw batch (default: 256).
    pub batch_capacity: usize,
    /// Camera zoom when the game starts (default: 1.0).
    pub initial_zoom: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::BLACK,
            default_filter: FilterMode::Nearest,
            vertex_layout: VertexLayout::PositionUvColor,
            batch_capacity: 256,
            initial_zoom: 1.0,
        }
    }
}

impl GameConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before load.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Fetch textures and build sprites. Called exactly once.
    fn load(&mut self, content: &mut Content) -> Result<()>;

    /// Advance the simulation by `delta` seconds. Move the camera here.
    fn update(&mut self, camera: &mut Camera, delta: f64) -> Result<()>;

    /// Submit sprites. The host wraps this in `begin`/`end`.
    fn draw(&mut self, renderer: &mut dyn Renderer) -> Result<()>;
}
