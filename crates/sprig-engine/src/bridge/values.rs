use glam::Vec2;

use crate::extensions::{Easing, Repeat};
use crate::math::{Color, Rect};

/// Opaque reference to a tween living in [`TweenHandles`](super::TweenHandles).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenHandle(pub u32);

/// Everything that crosses the script boundary. Math types travel by value,
/// tweens by handle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScriptValue {
    #[default]
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
    Point(Vec2),
    Rect(Rect),
    Color(Color),
    Easing(Easing),
    Repeat(Repeat),
    Handle(TweenHandle),
}

impl ScriptValue {
    /// The name scripts know this value's type by.
    pub fn type_name(&self) -> &'static str {
        match self {
            ScriptValue::Nil => "Nil",
            ScriptValue::Bool(_) => "Boolean",
            ScriptValue::Number(_) => "Number",
            ScriptValue::Str(_) => "String",
            ScriptValue::Point(_) => "Point",
            ScriptValue::Rect(_) => "Rectangle",
            ScriptValue::Color(_) => "Color",
            ScriptValue::Easing(_) => "Easing",
            ScriptValue::Repeat(_) => "Repeat",
            ScriptValue::Handle(_) => "Tween",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, ScriptValue::Nil)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ScriptValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScriptValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Vec2> {
        match self {
            ScriptValue::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_rect(&self) -> Option<Rect> {
        match self {
            ScriptValue::Rect(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            ScriptValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Easing given either as a value or by name.
    pub fn as_easing(&self) -> Option<Easing> {
        match self {
            ScriptValue::Easing(e) => Some(*e),
            ScriptValue::Str(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Repeat mode given either as a value or by name.
    pub fn as_repeat(&self) -> Option<Repeat> {
        match self {
            ScriptValue::Repeat(r) => Some(*r),
            ScriptValue::Str(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn as_handle(&self) -> Option<TweenHandle> {
        match self {
            ScriptValue::Handle(h) => Some(*h),
            _ => None,
        }
    }
}

impl From<bool> for ScriptValue {
    fn from(value: bool) -> Self {
        ScriptValue::Bool(value)
    }
}

impl From<f64> for ScriptValue {
    fn from(value: f64) -> Self {
        ScriptValue::Number(value)
    }
}

impl From<f32> for ScriptValue {
    fn from(value: f32) -> Self {
        ScriptValue::Number(value as f64)
    }
}

impl From<&str> for ScriptValue {
    fn from(value: &str) -> Self {
        ScriptValue::Str(value.to_string())
    }
}

impl From<Vec2> for ScriptValue {
    fn from(value: Vec2) -> Self {
        ScriptValue::Point(value)
    }
}

impl From<Rect> for ScriptValue {
    fn from(value: Rect) -> Self {
        ScriptValue::Rect(value)
    }
}

impl From<Color> for ScriptValue {
    fn from(value: Color) -> Self {
        ScriptValue::Color(value)
    }
}

impl From<Easing> for ScriptValue {
    fn from(value: Easing) -> Self {
        ScriptValue::Easing(value)
    }
}

impl From<Repeat> for ScriptValue {
    fn from(value: Repeat) -> Self {
        ScriptValue::Repeat(value)
    }
}

impl From<TweenHandle> for ScriptValue {
    fn from(value: TweenHandle) -> Self {
        ScriptValue::Handle(value)
    }
}
