//! Arbor: a retained-mode UI runtime.
//!
//! Arbor drives a tree of widgets through a fixed per-frame lifecycle:
//! `update` with the elapsed time, then `draw`, which resolves layout under
//! box constraints and paints through a host-supplied backend. Input, paint
//! and image decoding are all collaborator traits, so the engine itself
//! never touches the OS.
//!
//! The main entry points are:
//! - [`Runtime`] - owns the tree and drives the lifecycle
//! - [`Widget`] - the trait implemented by all widgets
//! - [`widgets`] - the built-in widget set
//!
//! # Module Organization
//!
//! - [`geom`] - geometry primitives (Rect, Point, Expanse, BoxConstraints)
//! - [`widgets`] - built-in widget implementations

// Re-export core application types
pub use arbor_core::{
    CachedImageProvider, Color, Context, Error, FocusManager, FocusNode, GamepadAxis,
    GamepadButton, ImageCache, ImageHandle, ImageProvider, InputBackend, MAX_GAMEPADS,
    MemoryImageProvider, MouseButton, PaintBackend, PositionSpec, Result, Runtime, Widget,
    WidgetRc, WidgetState, WidgetWeak, init_child, init_root, place, shared, tutils,
};

// Re-export the derive macro and the trait it implements
pub use arbor_core::{Stateful, StatefulTrait};

/// Geometry primitives.
pub use geom;

// Export commonly used geometry types at the root
pub use geom::{Alignment, Axis, BoxConstraints, Direction, EdgeInsets, Expanse, Point, Rect};

/// Built-in widget implementations.
pub mod widgets {
    pub use arbor_widgets::{
        BoxFit, Composite, Container, CrossAlign, Flex, Flexible, FocusDecorator, GestureDetector,
        Image, MainAlign, Positioned, Scrollable, Stack, StackFit, Text, Wrap,
    };
}
