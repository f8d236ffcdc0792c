use glam::Vec2;

use super::{Color, Rect};

/// Values a tween can interpolate: `start + (end - start) * t`.
pub trait Lerp: Copy {
    fn lerp(start: Self, end: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(start: f32, end: f32, t: f32) -> f32 {
        start + (end - start) * t
    }
}

impl Lerp for Vec2 {
    #[inline]
    fn lerp(start: Vec2, end: Vec2, t: f32) -> Vec2 {
        start + (end - start) * t
    }
}

impl Lerp for Rect {
    /// Location and size interpolate independently.
    #[inline]
    fn lerp(start: Rect, end: Rect, t: f32) -> Rect {
        Rect::from_parts(
            Vec2::lerp(start.location(), end.location(), t),
            Vec2::lerp(start.size(), end.size(), t),
        )
    }
}

impl Lerp for Color {
    #[inline]
    fn lerp(start: Color, end: Color, t: f32) -> Color {
        start + (end - start) * t
    }
}

/// Rotate `v` counter-clockwise (in a y-up frame) by `angle` radians.
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}
