use std::sync::atomic::{AtomicU64, Ordering};

use geom::{Expanse, Point, Rect};

use crate::{
    Result, error,
    widget::{WidgetRc, WidgetWeak},
};

/// Monotonic widget id source.
static CURRENT_ID: AtomicU64 = AtomicU64::new(0);

/// Per-widget bookkeeping. Each widget keeps a `WidgetState` and offers it up
/// through the `Stateful` trait (usually via `#[derive(Stateful)]`).
#[derive(Debug)]
pub struct WidgetState {
    /// Unique widget id.
    pub id: u64,

    /// Local bounds: the size resolved by this widget's own layout, at the
    /// position decided by the parent. Positions only become meaningful
    /// combined with ancestors' positions during the paint traversal.
    pub bounds: Rect,

    /// Non-owning link to the parent widget. Set when the widget is mounted;
    /// never implies ownership.
    pub parent: Option<WidgetWeak>,

    /// Weak handle to this widget's own cell, set when the widget is
    /// mounted. Used for identity checks and focus bindings.
    pub self_ref: Option<WidgetWeak>,

    /// Has `init` run for this widget?
    pub initialized: bool,
}

impl WidgetState {
    /// Construct a fresh state with a new unique id.
    pub fn new() -> Self {
        Self {
            id: CURRENT_ID.fetch_add(1, Ordering::Relaxed),
            bounds: Rect::zero(),
            parent: None,
            self_ref: None,
            initialized: false,
        }
    }
}

impl Default for WidgetState {
    fn default() -> Self {
        Self::new()
    }
}

/// The interface implemented by all widgets that track state.
pub trait Stateful {
    /// Get a reference to the widget's state object.
    fn state(&self) -> &WidgetState;

    /// Get a mutable reference to the widget's state object.
    fn state_mut(&mut self) -> &mut WidgetState;

    /// A unique id for this widget.
    fn id(&self) -> u64 {
        self.state().id
    }

    /// The widget's local bounds.
    fn bounds(&self) -> Rect {
        self.state().bounds
    }

    /// Replace the local bounds wholesale.
    fn set_bounds(&mut self, r: Rect) {
        self.state_mut().bounds = r;
    }

    /// Set the resolved size, keeping the parent-assigned position. Layout
    /// implementations should use this rather than `set_bounds` - position is
    /// the parent's to decide.
    fn set_size(&mut self, size: Expanse) {
        let b = &mut self.state_mut().bounds;
        b.w = size.w;
        b.h = size.h;
    }

    /// Set the local position. Only the parent should call this.
    fn set_position(&mut self, p: Point) {
        let b = &mut self.state_mut().bounds;
        b.x = p.x;
        b.y = p.y;
    }

    /// Upgrade the parent link, if the parent is still alive.
    fn parent(&self) -> Option<WidgetRc> {
        self.state().parent.as_ref().and_then(|w| w.upgrade())
    }

    /// The weak handle to this widget's own cell. Errors if the widget has
    /// not been mounted into a tree yet.
    fn self_ref(&self) -> Result<WidgetWeak> {
        self.state()
            .self_ref
            .clone()
            .ok_or_else(|| error::Error::Lifecycle("widget used before mount".into()))
    }

    /// Has `init` completed for this widget?
    fn is_initialized(&self) -> bool {
        self.state().initialized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = WidgetState::new();
        let b = WidgetState::new();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn set_size_keeps_position() {
        struct S {
            state: WidgetState,
        }
        impl Stateful for S {
            fn state(&self) -> &WidgetState {
                &self.state
            }
            fn state_mut(&mut self) -> &mut WidgetState {
                &mut self.state
            }
        }
        let mut s = S {
            state: WidgetState::new(),
        };
        s.set_position(Point::new(3.0, 4.0));
        s.set_size(Expanse::new(10.0, 20.0));
        assert_eq!(s.bounds(), Rect::new(3.0, 4.0, 10.0, 20.0));
    }
}
