//! A scrolling viewport over a single oversized child.
//!
//! The scroll position is split in two: a `target` offset that input moves
//! instantly, and a `displayed` offset that eases toward the target every
//! update. Wheel input applies while the pointer is over the rectangle this
//! widget occupied during the previous paint traversal, and a newly focused
//! descendant is scrolled into view with a small margin.

use arbor_core::{
    Axis, BoxConstraints, Context, Point, Result, Stateful, Widget, WidgetRc, WidgetState,
    WidgetWeak, init_child, place, shared,
};
use geom::Rect;
use tracing::trace;

/// Wheel units to scroll offset units.
const SCROLL_SPEED: f32 = 50.0;
/// Exponential easing rate for the displayed offset, per second.
const SMOOTH_RATE: f32 = 15.0;
/// Gap kept between a followed focus rectangle and the viewport edge.
const FOCUS_MARGIN: f32 = 20.0;
/// Viewport extent used when the incoming constraints leave an axis
/// unbounded.
const FALLBACK_EXTENT: f32 = 300.0;

/// Viewport extent for one axis: the bounded maximum, else the minimum,
/// else the fallback.
fn resolve_extent(min: f32, max: f32) -> f32 {
    if max.is_finite() {
        max
    } else if min > 0.0 {
        min
    } else {
        FALLBACK_EXTENT
    }
}
/// Distance under which the displayed offset snaps to the target.
const SNAP_EPSILON: f32 = 0.05;

/// A viewport scrolling its child along one axis.
#[derive(Stateful)]
pub struct Scrollable {
    state: WidgetState,
    child: WidgetRc,
    axis: Axis,
    target: f32,
    displayed: f32,
    content_extent: f32,
    abs_rect: Rect,
    followed_focus: Option<u64>,
}

impl Scrollable {
    /// A vertical viewport over the given child.
    pub fn vertical(child: impl Widget + 'static) -> Self {
        Self::new(Axis::Vertical, child)
    }

    /// A horizontal viewport over the given child.
    pub fn horizontal(child: impl Widget + 'static) -> Self {
        Self::new(Axis::Horizontal, child)
    }

    fn new(axis: Axis, child: impl Widget + 'static) -> Self {
        Self {
            state: WidgetState::new(),
            child: shared(child),
            axis,
            target: 0.0,
            displayed: 0.0,
            content_extent: 0.0,
            abs_rect: Rect::zero(),
            followed_focus: None,
        }
    }

    /// The largest valid scroll offset given the last layout.
    pub fn max_scroll_offset(&self) -> f32 {
        (self.content_extent - self.axis.main_of(self.bounds().size())).max(0.0)
    }

    /// Where the viewport is headed.
    pub fn target_offset(&self) -> f32 {
        self.target
    }

    /// Where the viewport currently is.
    pub fn displayed_offset(&self) -> f32 {
        self.displayed
    }

    /// Ease toward an offset. Clamped into the valid range.
    pub fn scroll_to(&mut self, offset: f32) {
        self.target = offset.clamp(0.0, self.max_scroll_offset());
    }

    /// Jump to an offset without easing.
    pub fn jump_to(&mut self, offset: f32) {
        self.scroll_to(offset);
        self.displayed = self.target;
    }

    /// The focused widget's offset within the scrolled content, if it is a
    /// strict descendant of this viewport. Walks the parent chain upward; a
    /// node that cannot be borrowed is on the active update path, which
    /// means it is an ancestor of this viewport, not a descendant.
    fn content_offset_of(&self, start: &WidgetWeak) -> Option<(Point, Point)> {
        let me = self.state().self_ref.clone()?;
        let mut acc = Point::zero();
        let mut size = Point::zero();
        let mut cur = start.upgrade()?;
        let mut first = true;
        loop {
            let (b, parent) = {
                let w = cur.try_borrow().ok()?;
                (w.bounds(), w.state().parent.clone())
            };
            if first {
                size = Point::new(b.w, b.h);
                first = false;
            }
            acc = acc + b.origin();
            let parent = parent?;
            if WidgetWeak::ptr_eq(&parent, &me) {
                return Some((acc, size));
            }
            cur = parent.upgrade()?;
        }
    }

    fn follow_focus(&mut self, ctx: &Context) {
        let Some(node) = ctx.focus().current() else {
            self.followed_focus = None;
            return;
        };
        if self.followed_focus == Some(node.id()) {
            return;
        }
        self.followed_focus = Some(node.id());
        let Some((pos, size)) = self.content_offset_of(&node.widget()) else {
            return;
        };
        let viewport = self.axis.main_of(self.bounds().size());
        let (start, extent) = match self.axis {
            Axis::Horizontal => (pos.x, size.x),
            Axis::Vertical => (pos.y, size.y),
        };
        let end = start + extent;
        if end > self.target + viewport - FOCUS_MARGIN {
            self.target = end - viewport + FOCUS_MARGIN;
        }
        if start < self.target + FOCUS_MARGIN {
            self.target = start - FOCUS_MARGIN;
        }
        self.target = self.target.clamp(0.0, self.max_scroll_offset());
        trace!(target = self.target, "scroll: follow focus");
    }
}

impl Widget for Scrollable {
    fn init(&mut self, ctx: &Context) -> Result<()> {
        init_child(ctx, &self.child, self.self_ref()?)
    }

    fn layout(&mut self, ctx: &Context, c: BoxConstraints) -> Result<()> {
        let axis = self.axis;
        // The viewport resolves both extents before the child is consulted.
        let main = resolve_extent(c.min_along(axis), c.max_along(axis));
        let cross = resolve_extent(c.min_along(axis.cross()), c.max_along(axis.cross()));
        // The child sees an unbounded scroll axis and the viewport's exact
        // cross extent.
        let cc = BoxConstraints::along(axis, 0.0, f32::INFINITY, cross, cross)?;
        self.child.borrow_mut().layout(ctx, cc)?;
        place(&self.child, Point::zero());
        self.content_extent = axis.main_of(self.child.borrow().bounds().size());
        self.set_size(c.constrain(axis.pack(main, cross)));
        self.target = self.target.clamp(0.0, self.max_scroll_offset());
        Ok(())
    }

    fn update(&mut self, ctx: &Context, delta: f32) -> Result<()> {
        let input = ctx.input();
        if self.abs_rect.contains(input.pointer_position()) {
            let wheel = input.wheel_delta();
            let w = match self.axis {
                Axis::Horizontal => wheel.x,
                Axis::Vertical => wheel.y,
            };
            if w != 0.0 {
                self.target = (self.target - w * SCROLL_SPEED).clamp(0.0, self.max_scroll_offset());
                trace!(target = self.target, "scroll: wheel");
            }
        }

        self.follow_focus(ctx);

        let gap = self.target - self.displayed;
        if gap.abs() < SNAP_EPSILON {
            self.displayed = self.target;
        } else {
            self.displayed += gap * (1.0 - (-SMOOTH_RATE * delta).exp());
        }

        self.child.borrow_mut().update(ctx, delta)
    }

    fn draw(&mut self, ctx: &Context, x: f32, y: f32) -> Result<()> {
        let abs = self.bounds().at(Point::new(x, y));
        self.abs_rect = abs;
        ctx.paint().push_clip(abs)?;
        let (dx, dy) = match self.axis {
            Axis::Horizontal => (-self.displayed, 0.0),
            Axis::Vertical => (0.0, -self.displayed),
        };
        let r = self.child.borrow_mut().draw(ctx, x + dx, y + dy);
        ctx.paint().pop_clip()?;
        r
    }

    fn dispose(&mut self, ctx: &Context) -> Result<()> {
        self.child.borrow_mut().dispose(ctx)
    }
}
