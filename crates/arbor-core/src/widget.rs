use std::cell::RefCell;
use std::rc::{Rc, Weak};

use geom::{BoxConstraints, Expanse, Point, Rect};

use crate::{Context, Result, Stateful, error};

/// A shared handle to a widget. By convention the parent holds the only
/// strong handle to each of its children, so dropping a widget drops its
/// subtree; every other reference to a widget (parent links, focus bindings)
/// is a [`WidgetWeak`].
pub type WidgetRc = Rc<RefCell<dyn Widget>>;

/// A non-owning handle to a widget.
pub type WidgetWeak = Weak<RefCell<dyn Widget>>;

/// Positioning directives for a child of a stack. All fields are optional;
/// the combination chosen determines whether the child is stretched, pinned,
/// loose-anchored or falls back to the stack's alignment. See the stack
/// widget for the resolution rules.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionSpec {
    /// Offset from the container's left edge.
    pub left: Option<f32>,
    /// Offset from the container's top edge.
    pub top: Option<f32>,
    /// Offset from the container's right edge.
    pub right: Option<f32>,
    /// Offset from the container's bottom edge.
    pub bottom: Option<f32>,
    /// Explicit width.
    pub width: Option<f32>,
    /// Explicit height.
    pub height: Option<f32>,
}

/// Widgets are the basic building blocks of an arbor UI, composed in a tree
/// structure with each widget exclusively owning its children.
///
/// Lifecycle: a widget is mounted and `init`-ed exactly once before its first
/// layout, laid out and painted every frame while mounted, and `dispose`-d
/// exactly once when removed. Each composite method must recurse into the
/// widget's children: constraints and absolute positions flow down, resolved
/// sizes flow back up.
#[allow(unused_variables)]
pub trait Widget: Stateful {
    /// Acquire resources and initialize children. Called exactly once, after
    /// the widget has been mounted (so `self_ref` is available). Composites
    /// must initialize their children here, bottom-up, via [`init_child`].
    fn init(&mut self, ctx: &Context) -> Result<()> {
        Ok(())
    }

    /// Resolve this widget's size within `c` and lay out children. Must be
    /// callable repeatedly with different constraints and always produce a
    /// size satisfying `c`. Implementations set their own size with
    /// `set_size` and child positions with [`place`]; they never set their
    /// own position.
    fn layout(&mut self, ctx: &Context, c: BoxConstraints) -> Result<()> {
        self.set_size(c.constrain(Expanse::default()));
        Ok(())
    }

    /// Per-frame mutation pass. Runs before layout and paint; any absolute
    /// rectangle consulted here is the one captured during the previous
    /// frame's paint traversal.
    fn update(&mut self, ctx: &Context, delta: f32) -> Result<()> {
        Ok(())
    }

    /// Paint at the absolute position `(x, y)` supplied by the parent, and
    /// recurse into children at their own absolute positions.
    fn draw(&mut self, ctx: &Context, x: f32, y: f32) -> Result<()> {
        Ok(())
    }

    /// Release resources acquired in `init`, recursing into children. After
    /// this the widget is inert and must not be touched again.
    fn dispose(&mut self, ctx: &Context) -> Result<()> {
        Ok(())
    }

    /// If this widget claims a share of free space in a flex container,
    /// its flex weight. Queried by flex layout instead of downcasting.
    fn flex_factor(&self) -> Option<f32> {
        None
    }

    /// If this widget carries stack positioning directives, those
    /// directives. Queried by stack layout instead of downcasting.
    fn position_spec(&self) -> Option<&PositionSpec> {
        None
    }

    /// The rectangle focus navigation should use for this widget. Interactive
    /// widgets override this with the absolute rectangle captured during the
    /// previous paint traversal; the default is the local bounds.
    fn focus_rect(&self) -> Rect {
        self.bounds()
    }
}

/// Wrap a widget into the shared handle the tree is built from.
pub fn shared(w: impl Widget + 'static) -> WidgetRc {
    Rc::new(RefCell::new(w))
}

/// Mount and initialize a child: attach the parent link and self handle,
/// then run the child's `init`. Initializing a child twice is a lifecycle
/// error.
pub fn init_child(ctx: &Context, child: &WidgetRc, parent: WidgetWeak) -> Result<()> {
    mount(ctx, child, Some(parent))
}

/// Mount and initialize the root of a tree, which has no parent.
pub fn init_root(ctx: &Context, root: &WidgetRc) -> Result<()> {
    mount(ctx, root, None)
}

fn mount(ctx: &Context, child: &WidgetRc, parent: Option<WidgetWeak>) -> Result<()> {
    {
        let mut c = child.borrow_mut();
        if c.is_initialized() {
            return Err(error::Error::Lifecycle(
                "widget initialized more than once".into(),
            ));
        }
        let state = c.state_mut();
        state.self_ref = Some(Rc::downgrade(child));
        state.parent = parent;
    }
    child.borrow_mut().init(ctx)?;
    child.borrow_mut().state_mut().initialized = true;
    Ok(())
}

/// Place a laid-out child at a local position within its parent.
pub fn place(child: &WidgetRc, p: Point) {
    child.borrow_mut().set_position(p);
}
