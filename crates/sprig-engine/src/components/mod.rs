pub mod animation;
pub mod sprite;

pub use animation::{AnimationSet, AnimationState, SpriteAnimation};
pub use sprite::{ColoredVertex, GeometryMode, Sprite, Vertex, VertexLayout, VERTICES_PER_SPRITE};
