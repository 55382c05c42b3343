//! Widget composition.
//!
//! A [`Composite`] owns a builder closure instead of a fixed child: the
//! closure produces the subtree when the composite is initialized, and again
//! whenever the composite is marked dirty. This is the seam for writing
//! widgets as functions over state rather than as hand-rolled trees.

use arbor_core::{
    BoxConstraints, Context, Point, Result, Stateful, Widget, WidgetRc, WidgetState, error,
    init_child, place, shared,
};
use tracing::debug;

/// A widget whose subtree is produced by a closure.
#[derive(Stateful)]
pub struct Composite {
    state: WidgetState,
    build: Box<dyn FnMut(&Context) -> Result<WidgetRc>>,
    child: Option<WidgetRc>,
    dirty: bool,
}

impl Composite {
    /// A composite over a builder closure.
    pub fn new<W: Widget + 'static>(mut build: impl FnMut(&Context) -> W + 'static) -> Self {
        Self {
            state: WidgetState::new(),
            build: Box::new(move |ctx| Ok(shared(build(ctx)))),
            child: None,
            dirty: false,
        }
    }

    /// A composite over a builder that may fail.
    pub fn try_new(build: impl FnMut(&Context) -> Result<WidgetRc> + 'static) -> Self {
        Self {
            state: WidgetState::new(),
            build: Box::new(build),
            child: None,
            dirty: false,
        }
    }

    /// Request a rebuild: the old subtree is disposed and the builder runs
    /// again at the start of the next update.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn rebuild(&mut self, ctx: &Context) -> Result<()> {
        if let Some(old) = self.child.take() {
            old.borrow_mut().dispose(ctx)?;
        }
        let child = (self.build)(ctx)?;
        init_child(ctx, &child, self.self_ref()?)?;
        self.child = Some(child);
        self.dirty = false;
        debug!(id = self.id(), "composite: rebuilt");
        Ok(())
    }

    fn child(&self) -> Result<&WidgetRc> {
        self.child
            .as_ref()
            .ok_or_else(|| error::Error::Config("composite produced no child".into()))
    }
}

impl Widget for Composite {
    fn init(&mut self, ctx: &Context) -> Result<()> {
        self.rebuild(ctx)
    }

    fn layout(&mut self, ctx: &Context, c: BoxConstraints) -> Result<()> {
        let child = self.child()?.clone();
        child.borrow_mut().layout(ctx, c)?;
        place(&child, Point::zero());
        let size = child.borrow().bounds().size();
        self.set_size(size);
        Ok(())
    }

    fn update(&mut self, ctx: &Context, delta: f32) -> Result<()> {
        if self.dirty {
            self.rebuild(ctx)?;
        }
        self.child()?.borrow_mut().update(ctx, delta)
    }

    fn draw(&mut self, ctx: &Context, x: f32, y: f32) -> Result<()> {
        self.child()?.borrow_mut().draw(ctx, x, y)
    }

    fn dispose(&mut self, ctx: &Context) -> Result<()> {
        if let Some(child) = self.child.take() {
            child.borrow_mut().dispose(ctx)?;
        }
        Ok(())
    }
}
