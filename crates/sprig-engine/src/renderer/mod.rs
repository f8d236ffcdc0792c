pub mod batch;
pub mod camera;
pub mod shader;
pub mod texture;
pub mod traits;

// Re-export key types for convenient access
pub use batch::{BatchRenderer, DrawBatch, SharedRenderer};
pub use camera::{Camera, CameraUniform};
pub use shader::{ShaderProgram, VertexAttribute};
pub use texture::{FilterMode, Texture, TextureData, TextureId};
pub use traits::{FramePhase, Renderer};
