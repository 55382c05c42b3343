//! Overlay layout.
//!
//! A [`Stack`] paints its children on top of each other in insertion order.
//! Children wrapped in [`Positioned`] are placed by edge offsets and may be
//! stretched between opposite edges; the rest are aligned within the stack.

use arbor_core::{
    Alignment, BoxConstraints, Context, Expanse, Point, PositionSpec, Result, Stateful, Widget,
    WidgetRc, WidgetState, init_child, place, shared,
};

/// How non-positioned children are constrained within the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackFit {
    /// Children may be any size up to the stack's.
    #[default]
    Loose,
    /// Children are forced to the stack's full size.
    Expand,
    /// Children receive the stack's incoming constraints unchanged.
    Passthrough,
}

/// A child wrapper carrying edge offsets for use inside a [`Stack`].
#[derive(Stateful)]
pub struct Positioned {
    state: WidgetState,
    child: WidgetRc,
    spec: PositionSpec,
}

impl Positioned {
    /// Wrap a child with an empty spec.
    pub fn new(child: impl Widget + 'static) -> Self {
        Self {
            state: WidgetState::new(),
            child: shared(child),
            spec: PositionSpec::default(),
        }
    }

    /// Offset from the stack's left edge.
    pub fn left(mut self, v: f32) -> Self {
        self.spec.left = Some(v);
        self
    }

    /// Offset from the stack's top edge.
    pub fn top(mut self, v: f32) -> Self {
        self.spec.top = Some(v);
        self
    }

    /// Offset from the stack's right edge.
    pub fn right(mut self, v: f32) -> Self {
        self.spec.right = Some(v);
        self
    }

    /// Offset from the stack's bottom edge.
    pub fn bottom(mut self, v: f32) -> Self {
        self.spec.bottom = Some(v);
        self
    }

    /// Explicit width.
    pub fn width(mut self, v: f32) -> Self {
        self.spec.width = Some(v);
        self
    }

    /// Explicit height.
    pub fn height(mut self, v: f32) -> Self {
        self.spec.height = Some(v);
        self
    }
}

impl Widget for Positioned {
    fn init(&mut self, ctx: &Context) -> Result<()> {
        init_child(ctx, &self.child, self.self_ref()?)
    }

    fn layout(&mut self, ctx: &Context, c: BoxConstraints) -> Result<()> {
        self.child.borrow_mut().layout(ctx, c)?;
        place(&self.child, Point::zero());
        let size = self.child.borrow().bounds().size();
        self.set_size(size);
        Ok(())
    }

    fn update(&mut self, ctx: &Context, delta: f32) -> Result<()> {
        self.child.borrow_mut().update(ctx, delta)
    }

    fn draw(&mut self, ctx: &Context, x: f32, y: f32) -> Result<()> {
        self.child.borrow_mut().draw(ctx, x, y)
    }

    fn dispose(&mut self, ctx: &Context) -> Result<()> {
        self.child.borrow_mut().dispose(ctx)
    }

    fn position_spec(&self) -> Option<&PositionSpec> {
        Some(&self.spec)
    }
}

/// An overlay container. Paint order is insertion order, first child at the
/// bottom.
#[derive(Stateful)]
pub struct Stack {
    state: WidgetState,
    children: Vec<WidgetRc>,
    fit: StackFit,
    alignment: Alignment,
}

impl Stack {
    /// An empty stack.
    pub fn new() -> Self {
        Self {
            state: WidgetState::new(),
            children: Vec::new(),
            fit: StackFit::default(),
            alignment: Alignment::TOP_LEFT,
        }
    }

    /// Append a child.
    pub fn with_child(mut self, child: impl Widget + 'static) -> Self {
        self.children.push(shared(child));
        self
    }

    /// Set how non-positioned children are constrained.
    pub fn with_fit(mut self, fit: StackFit) -> Self {
        self.fit = fit;
        self
    }

    /// Set the alignment applied to children without explicit offsets.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

/// The constraint range for one axis of a positioned child. Placement is
/// finished in `axis_place` once the child's resolved extent is known.
fn axis_plan(extent: f32, start: Option<f32>, end: Option<f32>, length: Option<f32>) -> (f32, f32) {
    match (start, end, length) {
        (Some(s), Some(e), _) => {
            let len = (extent - s - e).max(0.0);
            (len, len)
        }
        // An explicit length is honored even when it overflows the stack.
        (_, _, Some(len)) => (len, len),
        (Some(s), None, None) => (0.0, (extent - s).max(0.0)),
        (None, Some(e), None) => (0.0, (extent - e).max(0.0)),
        (None, None, None) => (0.0, extent.max(0.0)),
    }
}

fn axis_place(extent: f32, child: f32, start: Option<f32>, end: Option<f32>, align: f32) -> f32 {
    match (start, end) {
        (Some(s), _) => s,
        (None, Some(e)) => extent - e - child,
        (None, None) => (extent - child) * align,
    }
}

impl Widget for Stack {
    fn init(&mut self, ctx: &Context) -> Result<()> {
        for child in &self.children {
            init_child(ctx, child, self.self_ref()?)?;
        }
        Ok(())
    }

    fn layout(&mut self, ctx: &Context, c: BoxConstraints) -> Result<()> {
        // Non-positioned children first; the stack wraps the largest of them
        // unless the incoming constraints dictate a size.
        let inner = match self.fit {
            StackFit::Loose => c.loosen(),
            StackFit::Expand => BoxConstraints::tight(c.constrain(Expanse::new(
                if c.has_bounded_width() { c.max_w } else { 0.0 },
                if c.has_bounded_height() { c.max_h } else { 0.0 },
            ))),
            StackFit::Passthrough => c,
        };
        let mut wrapped = Expanse::default();
        for child in &self.children {
            if child.borrow().position_spec().is_some() {
                continue;
            }
            child.borrow_mut().layout(ctx, inner)?;
            let cs = child.borrow().bounds().size();
            wrapped = Expanse::new(wrapped.w.max(cs.w), wrapped.h.max(cs.h));
        }
        // Tight axes fill; loose ones shrink-wrap the largest child.
        let size = c.constrain(wrapped);
        self.set_size(size);

        // Positioned children resolve against the final stack size.
        for child in &self.children {
            let spec = child.borrow().position_spec().copied();
            let Some(spec) = spec else {
                let cs = child.borrow().bounds().size();
                place(child, self.alignment.position(size, cs));
                continue;
            };
            let (min_w, max_w) = axis_plan(size.w, spec.left, spec.right, spec.width);
            let (min_h, max_h) = axis_plan(size.h, spec.top, spec.bottom, spec.height);
            child
                .borrow_mut()
                .layout(ctx, BoxConstraints::new(min_w, max_w, min_h, max_h)?)?;
            let cs = child.borrow().bounds().size();
            place(
                child,
                Point::new(
                    axis_place(size.w, cs.w, spec.left, spec.right, self.alignment.x),
                    axis_place(size.h, cs.h, spec.top, spec.bottom, self.alignment.y),
                ),
            );
        }
        Ok(())
    }

    fn update(&mut self, ctx: &Context, delta: f32) -> Result<()> {
        for child in &self.children {
            child.borrow_mut().update(ctx, delta)?;
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &Context, x: f32, y: f32) -> Result<()> {
        for child in &self.children {
            let cb = child.borrow().bounds();
            child.borrow_mut().draw(ctx, x + cb.x, y + cb.y)?;
        }
        Ok(())
    }

    fn dispose(&mut self, ctx: &Context) -> Result<()> {
        for child in &self.children {
            child.borrow_mut().dispose(ctx)?;
        }
        Ok(())
    }
}
