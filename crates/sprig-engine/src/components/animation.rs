//! Frame-sequence animation for sprites.
//!
//! A [`SpriteAnimation`] cycles a sprite's source region through an ordered
//! list of frames, folding elapsed time with a [`Repeat`] policy.

use std::collections::HashMap;

use crate::api::error::{EngineError, Result};
use crate::components::sprite::Sprite;
use crate::extensions::Repeat;
use crate::math::Rect;

/// Playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Stopped,
    Running,
}

/// An ordered list of source regions shown `interval` seconds each.
#[derive(Debug, Clone)]
pub struct SpriteAnimation {
    frames: Vec<Rect>,
    interval: f64,
    time: f64,
    repeat: Repeat,
    state: AnimationState,
    frame_index: usize,
}

impl SpriteAnimation {
    /// Usually created through [`Sprite::create_animation`], which also checks
    /// the sprite supports frame sequencing.
    pub fn new(interval: f64, frames: Vec<Rect>) -> Result<Self> {
        if frames.is_empty() {
            return Err(EngineError::InvalidAnimation("an animation needs at least one frame"));
        }
        if !interval.is_finite() || interval <= 0.0 {
            return Err(EngineError::InvalidAnimation("frame interval must be positive"));
        }
        Ok(Self {
            frames,
            interval,
            time: 0.0,
            repeat: Repeat::Once,
            state: AnimationState::Stopped,
            frame_index: 0,
        })
    }

    pub fn frames(&self) -> &[Rect] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Seconds per frame.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Seconds for one pass over every frame.
    pub fn total_duration(&self) -> f64 {
        self.interval * self.frames.len() as f64
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }

    /// Index of the frame last written to the sprite.
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn current_frame(&self) -> Rect {
        self.frames[self.frame_index]
    }

    /// Restart from the first frame and run with `repeat`.
    pub fn start(&mut self, repeat: Repeat) {
        self.time = 0.0;
        self.repeat = repeat;
        self.state = AnimationState::Running;
    }

    /// Stop where we are; elapsed time is kept.
    pub fn stop(&mut self) {
        self.state = AnimationState::Stopped;
    }

    /// Advance by `delta` seconds and write the current frame into `sprite`.
    /// Does nothing while stopped.
    pub fn update(&mut self, delta: f64, sprite: &mut Sprite) -> Result<()> {
        if self.state != AnimationState::Running {
            return Ok(());
        }
        sprite.ensure_sequencable()?;

        if delta.is_finite() && delta > 0.0 {
            self.time += delta;
        }
        let ratio = self.apply_frame(sprite);

        if self.repeat.is_finished(ratio) {
            self.stop();
        }
        Ok(())
    }

    /// Rewind to frame 0 with `Repeat::Once` and show it right away,
    /// whether or not the animation is running.
    pub fn reset(&mut self, sprite: &mut Sprite) -> Result<()> {
        sprite.ensure_sequencable()?;
        self.time = 0.0;
        self.repeat = Repeat::Once;
        self.apply_frame(sprite);
        Ok(())
    }

    /// Select the frame for the current time, write it, return the raw ratio.
    fn apply_frame(&mut self, sprite: &mut Sprite) -> f64 {
        let count = self.frames.len();
        let ratio = snap(snap(self.time / self.interval) / count as f64);
        let wrapped = self.repeat.apply(ratio);
        self.frame_index = (snap(wrapped * count as f64).floor() as usize).min(count - 1);
        sprite.set_source(self.frames[self.frame_index]);
        ratio
    }
}

/// Round values sitting on a frame boundary up to a rounding error onto it,
/// so `0.1 * 3` seconds of a 0.1s interval lands exactly on frame 3.
fn snap(x: f64) -> f64 {
    let nearest = x.round();
    if (x - nearest).abs() < 1e-9 * nearest.abs().max(1.0) {
        nearest
    } else {
        x
    }
}

/// Named animations for one sprite, at most one playing at a time.
#[derive(Debug, Clone, Default)]
pub struct AnimationSet {
    animations: HashMap<String, SpriteAnimation>,
    current: Option<String>,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a single animation.
    pub fn single(name: impl Into<String>, animation: SpriteAnimation) -> Self {
        let mut set = Self::new();
        set.add(name, animation);
        set
    }

    /// Add (or replace) an animation.
    pub fn add(&mut self, name: impl Into<String>, animation: SpriteAnimation) {
        self.animations.insert(name.into(), animation);
    }

    pub fn get(&self, name: &str) -> Option<&SpriteAnimation> {
        self.animations.get(name)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current(&self) -> Option<&SpriteAnimation> {
        self.current.as_deref().and_then(|name| self.animations.get(name))
    }

    /// Stop whatever is playing and start `name` from its first frame.
    /// Returns false if there is no such animation.
    pub fn play(&mut self, name: &str, repeat: Repeat) -> bool {
        if !self.animations.contains_key(name) {
            return false;
        }
        self.stop();
        if let Some(animation) = self.animations.get_mut(name) {
            animation.start(repeat);
        }
        self.current = Some(name.to_string());
        true
    }

    /// Play only if it's different from the current animation.
    pub fn play_if_different(&mut self, name: &str, repeat: Repeat) -> bool {
        if self.current.as_deref() == Some(name) {
            return true;
        }
        self.play(name, repeat)
    }

    pub fn stop(&mut self) {
        if let Some(animation) = self.current.as_deref().and_then(|name| self.animations.get_mut(name)) {
            animation.stop();
        }
    }

    /// Advance the current animation.
    pub fn update(&mut self, delta: f64, sprite: &mut Sprite) -> Result<()> {
        match self.current.as_deref().and_then(|name| self.animations.get_mut(name)) {
            Some(animation) => animation.update(delta, sprite),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::texture::{FilterMode, Texture, TextureData, TextureId};
    use glam::Vec2;

    fn sprite() -> Sprite {
        let data = TextureData {
            pixels: vec![0; 64 * 16 * 4],
            width: 64,
            height: 16,
        };
        Texture::new(TextureId(1), "bundle://strip.png", data, FilterMode::Nearest)
            .unwrap()
            .create_sprite()
    }

    fn strip(sprite: &Sprite) -> SpriteAnimation {
        let offsets = [Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(3.0, 0.0)];
        sprite
            .create_grid_animation(0.1, Rect::new(0.0, 0.0, 16.0, 16.0), &offsets)
            .unwrap()
    }

    #[test]
    fn rejects_bad_construction() {
        assert!(matches!(SpriteAnimation::new(0.1, vec![]), Err(EngineError::InvalidAnimation(_))));
        assert!(matches!(
            SpriteAnimation::new(0.0, vec![Rect::default()]),
            Err(EngineError::InvalidAnimation(_))
        ));
    }

    #[test]
    fn update_while_stopped_is_a_no_op() {
        let mut sprite = sprite();
        let mut anim = strip(&sprite);
        let revision = sprite.revision();
        anim.update(0.25, &mut sprite).unwrap();
        assert_eq!(anim.time(), 0.0);
        assert_eq!(sprite.revision(), revision);
    }

    #[test]
    fn ticks_through_frames() {
        let mut sprite = sprite();
        let mut anim = strip(&sprite);
        anim.start(Repeat::Loop);

        anim.update(0.15, &mut sprite).unwrap();
        assert_eq!(anim.frame_index(), 1);
        assert_eq!(sprite.source(), Rect::new(16.0, 0.0, 16.0, 16.0));

        anim.update(0.1, &mut sprite).unwrap();
        assert_eq!(anim.frame_index(), 2);

        // 0.45s into a 0.4s loop wraps to frame 0.
        anim.update(0.2, &mut sprite).unwrap();
        assert_eq!(anim.frame_index(), 0);
        assert!(anim.is_running());
    }

    #[test]
    fn once_stops_exactly_at_the_end() {
        let mut sprite = sprite();
        let frames = vec![Rect::new(0.0, 0.0, 16.0, 16.0), Rect::new(16.0, 0.0, 16.0, 16.0), Rect::new(32.0, 0.0, 16.0, 16.0)];
        let mut anim = sprite.create_animation(0.1, frames).unwrap();
        anim.start(Repeat::Once);

        anim.update(0.2, &mut sprite).unwrap();
        assert_eq!(anim.frame_index(), 2);
        assert!(anim.is_running());

        anim.update(0.1, &mut sprite).unwrap();
        assert_eq!(anim.frame_index(), 2);
        assert_eq!(anim.state(), AnimationState::Stopped);

        let mut single_step = sprite.create_animation(0.1, vec![Rect::default(); 3]).unwrap();
        single_step.start(Repeat::Once);
        single_step.update(0.3, &mut sprite).unwrap();
        assert_eq!(single_step.state(), AnimationState::Stopped);
    }

    #[test]
    fn once_stops_on_last_frame() {
        let mut sprite = sprite();
        let mut anim = strip(&sprite);
        anim.start(Repeat::Once);

        anim.update(0.5, &mut sprite).unwrap();
        assert_eq!(anim.frame_index(), 3);
        assert_eq!(sprite.source(), Rect::new(48.0, 0.0, 16.0, 16.0));
        assert_eq!(anim.state(), AnimationState::Stopped);

        // Further updates do nothing.
        anim.update(0.5, &mut sprite).unwrap();
        assert_eq!(anim.time(), 0.5);
    }

    #[test]
    fn reverse_walks_back() {
        let mut sprite = sprite();
        let mut anim = strip(&sprite);
        anim.start(Repeat::LoopWithReverse);

        anim.update(0.45, &mut sprite).unwrap();
        // ratio 1.125 -> wrapped 0.875 -> frame 3
        assert_eq!(anim.frame_index(), 3);
        anim.update(0.2, &mut sprite).unwrap();
        // ratio 1.625 -> wrapped 0.375 -> frame 1
        assert_eq!(anim.frame_index(), 1);
    }

    #[test]
    fn stop_keeps_time_and_start_resets_it() {
        let mut sprite = sprite();
        let mut anim = strip(&sprite);
        anim.start(Repeat::Loop);
        anim.update(0.25, &mut sprite).unwrap();
        anim.stop();
        assert_eq!(anim.time(), 0.25);
        anim.start(Repeat::Loop);
        assert_eq!(anim.time(), 0.0);
    }

    #[test]
    fn reset_shows_first_frame_without_running() {
        let mut sprite = sprite();
        let mut anim = strip(&sprite);
        anim.start(Repeat::Loop);
        anim.update(0.25, &mut sprite).unwrap();
        anim.stop();

        anim.reset(&mut sprite).unwrap();
        assert_eq!(anim.time(), 0.0);
        assert_eq!(anim.repeat(), Repeat::Once);
        assert_eq!(anim.frame_index(), 0);
        assert_eq!(sprite.source(), Rect::new(0.0, 0.0, 16.0, 16.0));
        assert!(!anim.is_running());
    }

    #[test]
    fn stretched_sprite_fails_loudly() {
        let mut sprite = sprite();
        let mut anim = strip(&sprite);
        sprite.set_destination(Rect::new(0.0, 0.0, 100.0, 100.0));
        anim.start(Repeat::Loop);
        let err = anim.update(0.1, &mut sprite);
        assert!(matches!(err, Err(EngineError::NotSupported { .. })));
    }

    #[test]
    fn set_plays_by_name() {
        let mut sprite = sprite();
        let mut set = AnimationSet::new();
        set.add("idle", sprite.create_animation(0.5, vec![Rect::new(0.0, 0.0, 16.0, 16.0)]).unwrap());
        set.add("walk", strip(&sprite));

        assert!(!set.play("run", Repeat::Loop));
        assert!(set.play("walk", Repeat::Loop));
        set.update(0.15, &mut sprite).unwrap();
        assert_eq!(set.current().map(|a| a.frame_index()), Some(1));

        // Same animation - should NOT restart
        set.play_if_different("walk", Repeat::Loop);
        assert_eq!(set.current().map(|a| a.time()), Some(0.15));

        // Different animation - should switch and stop the old one
        set.play_if_different("idle", Repeat::Loop);
        assert_eq!(set.current_name(), Some("idle"));
        assert!(!set.get("walk").unwrap().is_running());
    }
}
