use std::collections::BTreeMap;

use glam::Vec2;

use crate::api::error::{EngineError, Result};
use crate::bridge::values::{ScriptValue, TweenHandle};
use crate::extensions::{Easing, Repeat, Tween};
use crate::math::{Color, Rect};

/// A tween over one of the scriptable value kinds.
#[derive(Debug, Clone)]
pub enum AnyTween {
    Scalar(Tween<f32>),
    Point(Tween<Vec2>),
    Rect(Tween<Rect>),
    Color(Tween<Color>),
}

impl AnyTween {
    /// Pick the tween kind from the start and end values, which must match.
    pub fn new(start: &ScriptValue, end: &ScriptValue, duration: f64, easing: Easing, repeat: Repeat) -> Result<Self> {
        Ok(match (start, end) {
            (ScriptValue::Number(a), ScriptValue::Number(b)) => {
                AnyTween::Scalar(Tween::new(*a as f32, *b as f32, duration, easing, repeat)?)
            }
            (ScriptValue::Point(a), ScriptValue::Point(b)) => AnyTween::Point(Tween::new(*a, *b, duration, easing, repeat)?),
            (ScriptValue::Rect(a), ScriptValue::Rect(b)) => AnyTween::Rect(Tween::new(*a, *b, duration, easing, repeat)?),
            (ScriptValue::Color(a), ScriptValue::Color(b)) => AnyTween::Color(Tween::new(*a, *b, duration, easing, repeat)?),
            (a, b) => {
                return Err(EngineError::ScriptArgument {
                    type_name: "Tween",
                    message: format!("can't tween from {} to {}", a.type_name(), b.type_name()),
                })
            }
        })
    }

    pub fn advance(&mut self, delta: f64) {
        match self {
            AnyTween::Scalar(t) => t.advance(delta),
            AnyTween::Point(t) => t.advance(delta),
            AnyTween::Rect(t) => t.advance(delta),
            AnyTween::Color(t) => t.advance(delta),
        }
    }

    pub fn value(&self) -> ScriptValue {
        match self {
            AnyTween::Scalar(t) => t.value().into(),
            AnyTween::Point(t) => t.value().into(),
            AnyTween::Rect(t) => t.value().into(),
            AnyTween::Color(t) => t.value().into(),
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            AnyTween::Scalar(t) => t.is_finished(),
            AnyTween::Point(t) => t.is_finished(),
            AnyTween::Rect(t) => t.is_finished(),
            AnyTween::Color(t) => t.is_finished(),
        }
    }
}

/// Tween store addressed by opaque handles, for scripts that can't hold
/// Rust values directly.
///
/// Usage:
///   let mut tweens = TweenHandles::new();
///   let h = tweens.create(&0.0f32.into(), &10.0f32.into(), 1.0, Easing::EaseIn, Repeat::Once)?;
///   tweens.advance_all(dt);
///   let x = tweens.value(h)?;
#[derive(Debug, Clone)]
pub struct TweenHandles {
    tweens: BTreeMap<TweenHandle, AnyTween>,
    next_id: u32,
}

impl TweenHandles {
    pub fn new() -> Self {
        Self {
            tweens: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Create a tween and return its handle.
    pub fn create(
        &mut self,
        start: &ScriptValue,
        end: &ScriptValue,
        duration: f64,
        easing: Easing,
        repeat: Repeat,
    ) -> Result<TweenHandle> {
        let tween = AnyTween::new(start, end, duration, easing, repeat)?;
        let handle = TweenHandle(self.next_id);
        self.next_id += 1;
        self.tweens.insert(handle, tween);
        Ok(handle)
    }

    /// Script-facing constructor: `(start, end, duration[, easing[, repeat]])`.
    /// Easing and repeat may be given as values or by name.
    pub fn create_from_args(&mut self, args: &[ScriptValue]) -> Result<ScriptValue> {
        let bad = |message: &str| EngineError::ScriptArgument {
            type_name: "Tween",
            message: message.to_string(),
        };
        let (start, end, duration, rest) = match args {
            [start, end, duration, rest @ ..] if rest.len() <= 2 => (start, end, duration, rest),
            _ => return Err(bad("expected (start, end, duration[, easing[, repeat]])")),
        };
        let duration = duration.as_number().ok_or_else(|| bad("duration must be a number"))?;
        let easing = match rest.first() {
            None | Some(ScriptValue::Nil) => Easing::default(),
            Some(v) => v.as_easing().ok_or_else(|| bad("unknown easing"))?,
        };
        let repeat = match rest.get(1) {
            None | Some(ScriptValue::Nil) => Repeat::default(),
            Some(v) => v.as_repeat().ok_or_else(|| bad("unknown repeat mode"))?,
        };
        self.create(start, end, duration, easing, repeat).map(ScriptValue::Handle)
    }

    pub fn get(&self, handle: TweenHandle) -> Option<&AnyTween> {
        self.tweens.get(&handle)
    }

    fn get_or_err(&self, handle: TweenHandle) -> Result<&AnyTween> {
        self.tweens.get(&handle).ok_or(EngineError::InvalidHandle(handle.0))
    }

    /// Advance one tween.
    pub fn advance(&mut self, handle: TweenHandle, delta: f64) -> Result<()> {
        self.tweens
            .get_mut(&handle)
            .ok_or(EngineError::InvalidHandle(handle.0))?
            .advance(delta);
        Ok(())
    }

    /// Advance every tween by the same delta. Returns how many are finished.
    pub fn advance_all(&mut self, delta: f64) -> usize {
        let mut finished = 0;
        for tween in self.tweens.values_mut() {
            tween.advance(delta);
            if tween.is_finished() {
                finished += 1;
            }
        }
        finished
    }

    pub fn value(&self, handle: TweenHandle) -> Result<ScriptValue> {
        Ok(self.get_or_err(handle)?.value())
    }

    pub fn is_finished(&self, handle: TweenHandle) -> Result<bool> {
        Ok(self.get_or_err(handle)?.is_finished())
    }

    /// Returns false if the handle was already gone.
    pub fn remove(&mut self, handle: TweenHandle) -> bool {
        self.tweens.remove(&handle).is_some()
    }

    /// Drop finished tweens and return their handles.
    pub fn remove_finished(&mut self) -> Vec<TweenHandle> {
        let done: Vec<TweenHandle> = self
            .tweens
            .iter()
            .filter(|(_, tween)| tween.is_finished())
            .map(|(handle, _)| *handle)
            .collect();
        for handle in &done {
            self.tweens.remove(handle);
        }
        done
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

impl Default for TweenHandles {
    fn default() -> Self {
        Self::new()
    }
}
