pub mod api;
pub mod assets;
pub mod bridge;
pub mod components;
pub mod extensions;
pub mod math;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::error::{EngineError, Result};
pub use api::game::{Game, GameConfig};
pub use api::host::GameHost;
pub use assets::content::{Content, Resource, ResourceKind};
pub use assets::device::{Device, HeadlessDevice, ResourcePath};
#[cfg(feature = "image-loader")]
pub use assets::device::FsDevice;
pub use assets::manifest::AssetManifest;
pub use assets::registry::SpriteRegistry;
pub use components::animation::{AnimationSet, AnimationState, SpriteAnimation};
pub use components::sprite::{GeometryMode, Sprite, VertexLayout};
pub use math::{bezier, bezier_nodes, BezierNode, Color, Lerp, Point, Rect};
pub use renderer::batch::{BatchRenderer, DrawBatch, SharedRenderer};
pub use renderer::camera::Camera;
pub use renderer::shader::ShaderProgram;
pub use renderer::texture::{FilterMode, Texture, TextureId};
pub use renderer::traits::Renderer;

// Script bridge: value marshalling and tween handles
pub use bridge::{ScriptValue, TweenHandle, TweenHandles, TypeTable};

// Extensions: time-driven value animation
pub use extensions::{
    Easing, lerp, lerp_vec2, ease, ease_vec2,
    Repeat, Interpolation, Tween,
};
