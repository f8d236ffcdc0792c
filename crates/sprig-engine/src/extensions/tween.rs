// extensions/tween.rs
//
// Generic tween: a time accumulator that turns elapsed seconds into a value.
// Completely decoupled from sprites: the owner reads `value()` and writes it
// wherever it likes.
//
// Usage:
//   let mut slide = Tween::move_to(from, to, 0.5, Easing::EaseOut, Repeat::Once)?;
//   slide.advance(dt);
//   sprite.set_position(slide.value());

use glam::Vec2;

use super::easing::Easing;
use super::repeat::Repeat;
use crate::api::error::{EngineError, Result};
use crate::math::{Color, Lerp, Rect};

/// Maps eased progress and the two endpoints to a value.
pub type Interpolation<T> = fn(f64, T, T) -> T;

fn lerp_progress<T: Lerp>(progress: f64, start: T, end: T) -> T {
    T::lerp(start, end, progress as f32)
}

/// A single animated transition between two values.
#[derive(Debug, Clone)]
pub struct Tween<T> {
    start: T,
    end: T,
    duration: f64,
    easing: Easing,
    repeat: Repeat,
    time: f64,
    value: T,
    finished: bool,
    interpolate: Interpolation<T>,
}

impl<T: Copy> Tween<T> {
    /// Create a tween with an explicit interpolation function.
    ///
    /// Fails when `duration` is not a positive, finite number of seconds.
    /// The value reads as `start` until the first [`advance`](Self::advance).
    pub fn with_interpolation(
        start: T,
        end: T,
        duration: f64,
        easing: Easing,
        repeat: Repeat,
        interpolate: Interpolation<T>,
    ) -> Result<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(EngineError::InvalidDuration(duration));
        }
        Ok(Self {
            start,
            end,
            duration,
            easing,
            repeat,
            time: 0.0,
            value: start,
            finished: false,
            interpolate,
        })
    }

    /// Advance by `delta` seconds and recompute the value.
    /// Does nothing once finished. Negative or non-finite deltas count as zero.
    pub fn advance(&mut self, delta: f64) {
        if self.finished {
            return;
        }

        if delta.is_finite() && delta > 0.0 {
            self.time += delta;
        }

        let ratio = self.time / self.duration;
        self.finished = self.repeat.is_finished(ratio);
        let progress = self.easing.apply(self.repeat.apply(ratio));
        self.value = (self.interpolate)(progress, self.start, self.end);
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn end(&self) -> T {
        self.end
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Accumulated time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    /// Raw progress `time / duration`, before the repeat policy folds it.
    pub fn ratio(&self) -> f64 {
        self.time / self.duration
    }
}

impl<T: Lerp> Tween<T> {
    /// Create a tween that interpolates with `start + (end - start) * progress`.
    pub fn new(start: T, end: T, duration: f64, easing: Easing, repeat: Repeat) -> Result<Self> {
        Self::with_interpolation(start, end, duration, easing, repeat, lerp_progress::<T>)
    }
}

impl Tween<Vec2> {
    /// Move a point (a sprite position, a camera target).
    pub fn move_to(from: Vec2, to: Vec2, duration: f64, easing: Easing, repeat: Repeat) -> Result<Self> {
        Self::new(from, to, duration, easing, repeat)
    }
}

impl Tween<Rect> {
    /// Move and resize a rectangle; location and size interpolate independently.
    pub fn move_rect(from: Rect, to: Rect, duration: f64, easing: Easing, repeat: Repeat) -> Result<Self> {
        Self::new(from, to, duration, easing, repeat)
    }
}

impl Tween<f32> {
    /// Rotate between two angles in radians.
    pub fn rotate(from: f32, to: f32, duration: f64, easing: Easing, repeat: Repeat) -> Result<Self> {
        Self::new(from, to, duration, easing, repeat)
    }

    /// Uniform scale factor.
    pub fn scale(from: f32, to: f32, duration: f64, easing: Easing, repeat: Repeat) -> Result<Self> {
        Self::new(from, to, duration, easing, repeat)
    }

    /// Alpha fade.
    pub fn fade(from: f32, to: f32, duration: f64, easing: Easing, repeat: Repeat) -> Result<Self> {
        Self::new(from, to, duration, easing, repeat)
    }

    /// Fade in from transparent.
    pub fn fade_in(duration: f64, easing: Easing) -> Result<Self> {
        Self::fade(0.0, 1.0, duration, easing, Repeat::Once)
    }

    /// Fade out to transparent.
    pub fn fade_out(duration: f64, easing: Easing) -> Result<Self> {
        Self::fade(1.0, 0.0, duration, easing, Repeat::Once)
    }
}

impl Tween<Color> {
    /// Blend a tint color.
    pub fn tint(from: Color, to: Color, duration: f64, easing: Easing, repeat: Repeat) -> Result<Self> {
        Self::new(from, to, duration, easing, repeat)
    }
}
