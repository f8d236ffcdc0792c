// extensions/easing.rs
//
// Pure easing curves for animation interpolation.
// No dependencies on sprites or tweens, just math.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::math::Lerp;

/// Progress-remapping curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Slow start.
    EaseIn,
    /// Slow end.
    EaseOut,
    /// Slow start and end.
    EaseBoth,
}

impl Easing {
    pub const ALL: [Easing; 4] = [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseBoth];

    /// Remap a normalized time `t` to progress.
    /// `t` is clamped to [0, 1] first; every curve maps 0 → 0 and 1 → 1.
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => -t * (t - 2.0),
            Easing::EaseBoth => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let t = 2.0 * t - 1.0;
                    -0.5 * (t * (t - 2.0) - 1.0)
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "Linear",
            Easing::EaseIn => "EaseIn",
            Easing::EaseOut => "EaseOut",
            Easing::EaseBoth => "EaseBoth",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| format!("unknown easing \"{s}\""))
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    <f32 as Lerp>::lerp(a, b, t)
}

/// Linearly interpolate between two Vec2 values.
#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    <Vec2 as Lerp>::lerp(a, b, t)
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f64, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t) as f32)
}

/// Interpolate Vec2 with easing.
#[inline]
pub fn ease_vec2(a: Vec2, b: Vec2, t: f64, easing: Easing) -> Vec2 {
    lerp_vec2(a, b, easing.apply(t) as f32)
}
