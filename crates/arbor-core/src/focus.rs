//! Focus registry and spatial navigation.
//!
//! Interactive widgets register a [`FocusNode`] while mounted. The
//! [`FocusManager`] tracks which node currently holds focus, keeps a history
//! so that removing the focused widget falls back to the previous one, and
//! implements directional movement between nodes based on the absolute
//! rectangles they reported during the last paint traversal.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use geom::{Direction, Rect};
use tracing::debug;

use crate::widget::{Widget, WidgetWeak};

/// Monotonic focus node id source.
static FOCUS_ID: AtomicU64 = AtomicU64::new(0);

/// A focusable entry bound to a widget. Built by the widget during `init`,
/// registered with the [`FocusManager`], and unregistered during `dispose`.
pub struct FocusNode {
    id: u64,
    widget: WidgetWeak,
    on_gained: Option<Rc<dyn Fn()>>,
    on_lost: Option<Rc<dyn Fn()>>,
    on_activate: Option<Rc<dyn Fn()>>,
}

impl FocusNode {
    /// A node bound to a widget, with no callbacks.
    pub fn new(widget: WidgetWeak) -> Self {
        Self {
            id: FOCUS_ID.fetch_add(1, Ordering::Relaxed),
            widget,
            on_gained: None,
            on_lost: None,
            on_activate: None,
        }
    }

    /// Attach a callback invoked when the node gains focus.
    pub fn on_gained(mut self, f: impl Fn() + 'static) -> Self {
        self.on_gained = Some(Rc::new(f));
        self
    }

    /// Attach a callback invoked when the node loses focus.
    pub fn on_lost(mut self, f: impl Fn() + 'static) -> Self {
        self.on_lost = Some(Rc::new(f));
        self
    }

    /// Attach a callback invoked when the node is activated while focused.
    pub fn on_activate(mut self, f: impl Fn() + 'static) -> Self {
        self.on_activate = Some(Rc::new(f));
        self
    }

    /// This node's id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The bound widget.
    pub fn widget(&self) -> WidgetWeak {
        self.widget.clone()
    }

    /// The absolute rectangle navigation should use for this node, read from
    /// the bound widget. `None` if the widget is gone or currently mutably
    /// borrowed by an ongoing traversal.
    pub fn rect(&self) -> Option<Rect> {
        let w = self.widget.upgrade()?;
        let r = w.try_borrow().ok()?.focus_rect();
        Some(r)
    }

    fn is_alive(&self) -> bool {
        self.widget.strong_count() > 0
    }
}

#[derive(Default)]
struct FocusState {
    nodes: Vec<Rc<FocusNode>>,
    current: Option<Rc<FocusNode>>,
    history: Vec<u64>,
}

impl FocusState {
    fn contains(&self, id: u64) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    fn by_id(&self, id: u64) -> Option<Rc<FocusNode>> {
        self.nodes.iter().find(|n| n.id == id).cloned()
    }
}

/// Tracks the focused node among all registered [`FocusNode`]s and moves
/// focus between them. Single-threaded; shared by handle through the context.
#[derive(Default)]
pub struct FocusManager {
    state: RefCell<FocusState>,
}

impl FocusManager {
    /// An empty manager with nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node and return the shared handle the widget should keep.
    /// The first registered node is focused automatically.
    pub fn register(&self, node: FocusNode) -> Rc<FocusNode> {
        let node = Rc::new(node);
        let gained = {
            let mut s = self.state.borrow_mut();
            s.nodes.push(node.clone());
            if s.current.is_none() {
                s.current = Some(node.clone());
                debug!(id = node.id, "focus: initial");
                node.on_gained.clone()
            } else {
                None
            }
        };
        if let Some(f) = gained {
            f();
        }
        node
    }

    /// Remove a node. If it held focus, focus falls back to the most recent
    /// live entry in the history, then to the first remaining node.
    pub fn unregister(&self, node: &Rc<FocusNode>) {
        let gained = {
            let mut s = self.state.borrow_mut();
            s.nodes.retain(|n| n.id != node.id);
            s.history.retain(|id| *id != node.id);
            let was_current = s
                .current
                .as_ref()
                .is_some_and(|c| c.id == node.id);
            if !was_current {
                return;
            }
            let mut next = None;
            while let Some(id) = s.history.pop() {
                if let Some(n) = s.by_id(id) {
                    if n.is_alive() {
                        next = Some(n);
                        break;
                    }
                }
            }
            if next.is_none() {
                next = s.nodes.first().cloned();
            }
            s.current = next.clone();
            match &next {
                Some(n) => debug!(id = n.id, "focus: fallback"),
                None => debug!("focus: cleared"),
            }
            next.and_then(|n| n.on_gained.clone())
        };
        if let Some(f) = gained {
            f();
        }
    }

    /// Move focus to a node. A no-op if the node already holds focus or is
    /// not registered. The previous holder is notified first, then pushed
    /// onto the history.
    pub fn set_focus(&self, node: &Rc<FocusNode>) {
        let (lost, gained) = {
            let mut s = self.state.borrow_mut();
            if !s.contains(node.id) {
                return;
            }
            if s.current.as_ref().is_some_and(|c| c.id == node.id) {
                return;
            }
            let prev = s.current.take();
            s.current = Some(node.clone());
            if let Some(p) = &prev {
                s.history.push(p.id);
            }
            debug!(id = node.id, "focus: set");
            (
                prev.and_then(|p| p.on_lost.clone()),
                node.on_gained.clone(),
            )
        };
        if let Some(f) = lost {
            f();
        }
        if let Some(f) = gained {
            f();
        }
    }

    /// Drop focus entirely. The previous holder is notified and pushed onto
    /// the history.
    pub fn blur(&self) {
        let lost = {
            let mut s = self.state.borrow_mut();
            let prev = s.current.take();
            if let Some(p) = &prev {
                s.history.push(p.id);
                debug!(id = p.id, "focus: blur");
            }
            prev.and_then(|p| p.on_lost.clone())
        };
        if let Some(f) = lost {
            f();
        }
    }

    /// Forget all nodes and drop focus without notifying anyone.
    pub fn clear(&self) {
        let mut s = self.state.borrow_mut();
        s.nodes.clear();
        s.history.clear();
        s.current = None;
    }

    /// The node currently holding focus.
    pub fn current(&self) -> Option<Rc<FocusNode>> {
        self.state.borrow().current.clone()
    }

    /// Does this node hold focus?
    pub fn is_focused(&self, node: &FocusNode) -> bool {
        self.state
            .borrow()
            .current
            .as_ref()
            .is_some_and(|c| c.id == node.id)
    }

    /// Invoke the focused node's activation callback, if any.
    pub fn activate(&self) {
        let f = self
            .state
            .borrow()
            .current
            .as_ref()
            .and_then(|c| c.on_activate.clone());
        if let Some(f) = f {
            f();
        }
    }

    /// Move focus spatially. Candidates are nodes whose rectangle center
    /// lies strictly in the half-plane on the far side of the current
    /// node's center along `dir`; the nearest center wins, with ties going
    /// to the earliest-registered node. A no-op with nothing focused.
    /// Returns whether focus moved.
    pub fn move_focus(&self, dir: Direction) -> bool {
        let target = {
            let s = self.state.borrow();
            let Some(cur) = &s.current else {
                return false;
            };
            let Some(from) = cur.rect() else {
                return false;
            };
            let origin = from.center();
            let mut best: Option<(f32, Rc<FocusNode>)> = None;
            for n in &s.nodes {
                if n.id == cur.id {
                    continue;
                }
                let Some(r) = n.rect() else { continue };
                let c = r.center();
                let ahead = match dir {
                    Direction::Up => c.y < origin.y,
                    Direction::Down => c.y > origin.y,
                    Direction::Left => c.x < origin.x,
                    Direction::Right => c.x > origin.x,
                };
                if !ahead {
                    continue;
                }
                let d = c.dist_squared(origin);
                if best.as_ref().is_none_or(|(bd, _)| d < *bd) {
                    best = Some((d, n.clone()));
                }
            }
            best.map(|(_, n)| n)
        };
        match target {
            Some(n) => {
                self.set_focus(&n);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutils::{TFixed, test_context};
    use crate::widget::{init_child, place, shared};
    use geom::Point;
    use std::rc::Rc;

    fn focusable(
        ctx: &crate::Context,
        pos: Point,
        size: f32,
    ) -> (crate::widget::WidgetRc, Rc<FocusNode>) {
        let w = shared(TFixed::new(size, size));
        let weak = Rc::downgrade(&w);
        init_child(ctx, &w, weak.clone()).unwrap();
        place(&w, pos);
        let node = ctx.focus().register(FocusNode::new(weak));
        (w, node)
    }

    #[test]
    fn first_registration_takes_focus() {
        let (ctx, _, _) = test_context();
        let (_wa, a) = focusable(&ctx, Point::zero(), 10.0);
        let (_wb, b) = focusable(&ctx, Point::new(50.0, 0.0), 10.0);
        assert!(ctx.focus().is_focused(&a));
        assert!(!ctx.focus().is_focused(&b));
    }

    #[test]
    fn unregister_falls_back_through_history() {
        let (ctx, _, _) = test_context();
        let (_wa, a) = focusable(&ctx, Point::zero(), 10.0);
        let (_wb, b) = focusable(&ctx, Point::new(50.0, 0.0), 10.0);
        let (_wc, c) = focusable(&ctx, Point::new(100.0, 0.0), 10.0);
        ctx.focus().set_focus(&b);
        ctx.focus().set_focus(&c);
        ctx.focus().unregister(&c);
        assert!(ctx.focus().is_focused(&b));
        ctx.focus().unregister(&b);
        assert!(ctx.focus().is_focused(&a));
    }

    #[test]
    fn move_prefers_half_plane_over_distance() {
        let (ctx, _, _) = test_context();
        let (_wa, _a) = focusable(&ctx, Point::zero(), 10.0);
        let (_wr, right) = focusable(&ctx, Point::new(100.0, 0.0), 10.0);
        let (_wb, below) = focusable(&ctx, Point::new(0.0, 100.0), 10.0);
        assert!(ctx.focus().move_focus(Direction::Down));
        assert!(ctx.focus().is_focused(&below));
        assert!(!ctx.focus().is_focused(&right));
    }

    #[test]
    fn move_with_no_candidate_keeps_focus() {
        let (ctx, _, _) = test_context();
        let (_wa, a) = focusable(&ctx, Point::zero(), 10.0);
        assert!(!ctx.focus().move_focus(Direction::Up));
        assert!(ctx.focus().is_focused(&a));
    }

    #[test]
    fn move_with_nothing_focused_is_a_no_op() {
        let (ctx, _, _) = test_context();
        let (_wa, _a) = focusable(&ctx, Point::zero(), 10.0);
        ctx.focus().blur();
        assert!(!ctx.focus().move_focus(Direction::Down));
        assert!(ctx.focus().current().is_none());
    }

    #[test]
    fn ties_go_to_earliest_registered() {
        let (ctx, _, _) = test_context();
        let (_wo, _origin) = focusable(&ctx, Point::zero(), 10.0);
        let (_w1, first) = focusable(&ctx, Point::new(100.0, 0.0), 10.0);
        let (_w2, second) = focusable(&ctx, Point::new(100.0, 0.0), 10.0);
        assert!(ctx.focus().move_focus(Direction::Right));
        assert!(ctx.focus().is_focused(&first));
        assert!(!ctx.focus().is_focused(&second));
    }

    #[test]
    fn activate_reaches_callback() {
        use std::cell::Cell;
        let (ctx, _, _) = test_context();
        let hits = Rc::new(Cell::new(0));
        let w = shared(TFixed::new(10.0, 10.0));
        let weak = Rc::downgrade(&w);
        init_child(&ctx, &w, weak.clone()).unwrap();
        let h = hits.clone();
        let node = ctx
            .focus()
            .register(FocusNode::new(weak).on_activate(move || h.set(h.get() + 1)));
        ctx.focus().set_focus(&node);
        ctx.focus().activate();
        assert_eq!(hits.get(), 1);
    }
}
