//! Adapter table exposing engine value types to an embedded interpreter.
//!
//! Each registered type has a constructor and a fixed set of field getters.
//! The interpreter glue calls [`TypeTable::construct`] for `Point(1, 2)` and
//! [`TypeTable::field`] for `p.x`; nothing is discovered at runtime.

use std::collections::HashMap;

use glam::Vec2;

use crate::api::error::{EngineError, Result};
use crate::bridge::values::ScriptValue;
use crate::extensions::{Easing, Repeat};
use crate::math::{Color, Rect};

pub type Constructor = fn(&[ScriptValue]) -> Result<ScriptValue>;
pub type Getter = fn(&ScriptValue) -> Option<ScriptValue>;

/// One scriptable type.
#[derive(Debug, Clone)]
pub struct ScriptType {
    pub name: &'static str,
    pub constructor: Constructor,
    pub fields: Vec<(&'static str, Getter)>,
}

impl ScriptType {
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    types: HashMap<&'static str, ScriptType>,
}

impl TypeTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// `Point`, `Rectangle`, `Color`, `Easing` and `Repeat`.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        table.register(point_type());
        table.register(rect_type());
        table.register(color_type());
        table.register(easing_type());
        table.register(repeat_type());
        table
    }

    /// Add or replace a type.
    pub fn register(&mut self, ty: ScriptType) {
        self.types.insert(ty.name, ty);
    }

    pub fn get(&self, name: &str) -> Option<&ScriptType> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.types.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn construct(&self, type_name: &str, args: &[ScriptValue]) -> Result<ScriptValue> {
        let ty = self
            .types
            .get(type_name)
            .ok_or_else(|| EngineError::UnknownType(type_name.to_string()))?;
        (ty.constructor)(args)
    }

    /// Read `field` from `value`, dispatching on the value's type.
    pub fn field(&self, value: &ScriptValue, field: &str) -> Result<ScriptValue> {
        let type_name = value.type_name();
        let ty = self
            .types
            .get(type_name)
            .ok_or_else(|| EngineError::UnknownType(type_name.to_string()))?;
        let unknown = || EngineError::UnknownField {
            type_name: type_name.to_string(),
            field: field.to_string(),
        };
        let (_, getter) = ty.fields.iter().find(|(name, _)| *name == field).ok_or_else(unknown)?;
        getter(value).ok_or_else(unknown)
    }
}

/// Pins the closure to [`Getter`] so field lists type-check.
fn field(name: &'static str, getter: Getter) -> (&'static str, Getter) {
    (name, getter)
}

fn bad_args(type_name: &'static str, message: impl Into<String>) -> EngineError {
    EngineError::ScriptArgument {
        type_name,
        message: message.into(),
    }
}

fn numbers<const N: usize>(type_name: &'static str, args: &[ScriptValue]) -> Result<[f32; N]> {
    let mut out = [0.0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg
            .as_number()
            .ok_or_else(|| bad_args(type_name, format!("expected a number, got {}", arg.type_name())))?
            as f32;
    }
    Ok(out)
}

fn point_type() -> ScriptType {
    fn construct(args: &[ScriptValue]) -> Result<ScriptValue> {
        match args.len() {
            0 => Ok(Vec2::ZERO.into()),
            2 => {
                let [x, y] = numbers::<2>("Point", args)?;
                Ok(Vec2::new(x, y).into())
            }
            n => Err(bad_args("Point", format!("takes 0 or 2 arguments, got {n}"))),
        }
    }
    ScriptType {
        name: "Point",
        constructor: construct,
        fields: vec![
            field("x", |v| v.as_point().map(|p| p.x.into())),
            field("y", |v| v.as_point().map(|p| p.y.into())),
            field("length", |v| v.as_point().map(|p| p.length().into())),
        ],
    }
}

fn rect_type() -> ScriptType {
    fn construct(args: &[ScriptValue]) -> Result<ScriptValue> {
        match args {
            [] => Ok(Rect::default().into()),
            [ScriptValue::Point(location), ScriptValue::Point(size)] => Ok(Rect::from_parts(*location, *size).into()),
            _ if args.len() == 4 => {
                let [x, y, width, height] = numbers::<4>("Rectangle", args)?;
                Ok(Rect::new(x, y, width, height).into())
            }
            _ => Err(bad_args("Rectangle", "expected (x, y, width, height) or (location, size)")),
        }
    }
    ScriptType {
        name: "Rectangle",
        constructor: construct,
        fields: vec![
            field("x", |v| v.as_rect().map(|r| r.x.into())),
            field("y", |v| v.as_rect().map(|r| r.y.into())),
            field("width", |v| v.as_rect().map(|r| r.width.into())),
            field("height", |v| v.as_rect().map(|r| r.height.into())),
            field("right", |v| v.as_rect().map(|r| r.right().into())),
            field("bottom", |v| v.as_rect().map(|r| r.bottom().into())),
            field("location", |v| v.as_rect().map(|r| r.location().into())),
            field("size", |v| v.as_rect().map(|r| r.size().into())),
            field("center", |v| v.as_rect().map(|r| r.center().into())),
        ],
    }
}

fn color_type() -> ScriptType {
    fn construct(args: &[ScriptValue]) -> Result<ScriptValue> {
        match args.len() {
            1 => {
                let hex = args[0]
                    .as_number()
                    .filter(|n| *n >= 0.0 && *n <= u32::MAX as f64)
                    .ok_or_else(|| bad_args("Color", "expected a 0xAARRGGBB number"))?;
                Ok(Color::from_argb(hex as u32).into())
            }
            3 => {
                let [r, g, b] = numbers::<3>("Color", args)?;
                Ok(Color::new(r, g, b, 1.0).into())
            }
            4 => {
                let [r, g, b, a] = numbers::<4>("Color", args)?;
                Ok(Color::new(r, g, b, a).into())
            }
            n => Err(bad_args("Color", format!("takes 1, 3 or 4 arguments, got {n}"))),
        }
    }
    ScriptType {
        name: "Color",
        constructor: construct,
        fields: vec![
            field("r", |v| v.as_color().map(|c| c.r.into())),
            field("g", |v| v.as_color().map(|c| c.g.into())),
            field("b", |v| v.as_color().map(|c| c.b.into())),
            field("a", |v| v.as_color().map(|c| c.a.into())),
        ],
    }
}

fn easing_type() -> ScriptType {
    fn construct(args: &[ScriptValue]) -> Result<ScriptValue> {
        match args {
            [] => Ok(Easing::default().into()),
            [name] => name
                .as_easing()
                .map(ScriptValue::from)
                .ok_or_else(|| bad_args("Easing", format!("unknown easing {:?}", name))),
            _ => Err(bad_args("Easing", "takes at most one argument")),
        }
    }
    ScriptType {
        name: "Easing",
        constructor: construct,
        fields: vec![field("name", |v| match v {
            ScriptValue::Easing(e) => Some(e.name().into()),
            _ => None,
        })],
    }
}

fn repeat_type() -> ScriptType {
    fn construct(args: &[ScriptValue]) -> Result<ScriptValue> {
        match args {
            [] => Ok(Repeat::default().into()),
            [name] => name
                .as_repeat()
                .map(ScriptValue::from)
                .ok_or_else(|| bad_args("Repeat", format!("unknown repeat mode {:?}", name))),
            _ => Err(bad_args("Repeat", "takes at most one argument")),
        }
    }
    ScriptType {
        name: "Repeat",
        constructor: construct,
        fields: vec![field("name", |v| match v {
            ScriptValue::Repeat(r) => Some(r.name().into()),
            _ => None,
        })],
    }
}
