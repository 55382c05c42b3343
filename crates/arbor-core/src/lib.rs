//! Core types and traits for the arbor retained-mode UI engine.

// Let the derive macro's `arbor_core::` paths resolve inside this crate.
extern crate self as arbor_core;

// Re-export derive macros
pub use arbor_derive::Stateful;

pub mod backend;
mod context;
pub mod error;
pub mod focus;
mod runtime;
pub mod state;
pub mod tutils;
pub mod widget;

pub use geom;

// Public exports
pub use backend::{
    CachedImageProvider, Color, GamepadAxis, GamepadButton, ImageCache, ImageHandle, ImageProvider,
    InputBackend, MAX_GAMEPADS, MemoryImageProvider, MouseButton, PaintBackend,
};
pub use context::Context;
pub use error::{Error, Result};
pub use focus::{FocusManager, FocusNode};
pub use runtime::Runtime;
// The trait and the derive macro share a name, as they live in different
// namespaces.
pub use state::Stateful as StatefulTrait;
pub use state::{Stateful, WidgetState};
pub use widget::{PositionSpec, Widget, WidgetRc, WidgetWeak, init_child, init_root, place, shared};

// Export commonly used geometry types at the root
pub use geom::{Alignment, Axis, BoxConstraints, Direction, EdgeInsets, Expanse, Point, Rect};
