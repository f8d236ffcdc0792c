//! Cubic Bezier curves over 2D points.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An on-curve point together with its control handle.
///
/// `direction` is the absolute position of the handle, not an offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BezierNode {
    pub point: Vec2,
    pub direction: Vec2,
}

impl BezierNode {
    pub fn new(point: Vec2, direction: Vec2) -> Self {
        Self { point, direction }
    }
}

/// Cubic Bezier through `p0` and `p3` with control points `p1` and `p2`.
/// `t` is not clamped.
pub fn bezier(t: f32, p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Vec2 {
    let u = 1.0 - t;
    let (tt, uu) = (t * t, u * u);
    p0 * (uu * u) + p1 * (3.0 * uu * t) + p2 * (3.0 * u * tt) + p3 * (tt * t)
}

/// Curve leaving `start.point` toward `start.direction` and arriving at
/// `end.point` from `end.direction`.
pub fn bezier_nodes(t: f32, start: BezierNode, end: BezierNode) -> Vec2 {
    bezier(t, start.point, start.direction, end.direction, end.point)
}
