// extensions/mod.rs
//
// Time-driven value animation.
// These are decoupled from sprites. Games own tweens and copy their values
// into whatever they animate.

pub mod easing;
pub mod repeat;
pub mod tween;

pub use easing::{Easing, lerp, lerp_vec2, ease, ease_vec2};
pub use repeat::Repeat;
pub use tween::{Interpolation, Tween};
