//! 2D value types shared by tweens, sprites and the camera.

pub mod color;
pub mod curves;
pub mod lerp;
pub mod rect;

pub use color::Color;
pub use curves::{bezier, bezier_nodes, BezierNode};
pub use lerp::{Lerp, rotate};
pub use rect::Rect;

/// A 2D point or vector. Sprites, tweens and the camera all speak `glam::Vec2`.
pub type Point = glam::Vec2;
