// bridge/mod.rs
//
// Marshalling layer for an embedded script interpreter. Math and mode values
// cross by value through a fixed type table; tweens cross as opaque handles.

pub mod handles;
pub mod registry;
pub mod values;

pub use handles::{AnyTween, TweenHandles};
pub use registry::{Constructor, Getter, ScriptType, TypeTable};
pub use values::{ScriptValue, TweenHandle};
