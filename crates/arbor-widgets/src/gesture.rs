//! Pointer and touch interaction.
//!
//! A [`GestureDetector`] wraps a child and turns raw input state into hover,
//! press, release and click callbacks. Hit testing runs against the absolute
//! rectangle captured during the previous paint traversal, so a gesture is
//! recognized one frame after the pointer event that caused it.

use std::rc::Rc;

use arbor_core::{
    BoxConstraints, Color, Context, FocusNode, MouseButton, Point, Result, Stateful, Widget,
    WidgetRc, WidgetState, init_child, place, shared,
};
use geom::Rect;
use tracing::trace;

/// An interactive region around a single child.
#[derive(Stateful)]
pub struct GestureDetector {
    state: WidgetState,
    child: WidgetRc,
    abs_rect: Rect,
    hovering: bool,
    pressed: bool,
    focusable: bool,
    node: Option<Rc<FocusNode>>,
    on_click: Option<Rc<dyn Fn()>>,
    on_press: Option<Rc<dyn Fn()>>,
    on_release: Option<Rc<dyn Fn()>>,
    on_hover_enter: Option<Rc<dyn Fn()>>,
    on_hover_exit: Option<Rc<dyn Fn()>>,
}

impl GestureDetector {
    /// A detector around a child. Without callbacks it is inert.
    pub fn new(child: impl Widget + 'static) -> Self {
        Self {
            state: WidgetState::new(),
            child: shared(child),
            abs_rect: Rect::zero(),
            hovering: false,
            pressed: false,
            focusable: false,
            node: None,
            on_click: None,
            on_press: None,
            on_release: None,
            on_hover_enter: None,
            on_hover_exit: None,
        }
    }

    /// Invoked when a press is released inside the region. Gamepad
    /// activation of a focused detector fires the same callback.
    pub fn on_click(mut self, f: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }

    /// Invoked when a press begins inside the region.
    pub fn on_press(mut self, f: impl Fn() + 'static) -> Self {
        self.on_press = Some(Rc::new(f));
        self
    }

    /// Invoked when a press ends, inside the region or not.
    pub fn on_release(mut self, f: impl Fn() + 'static) -> Self {
        self.on_release = Some(Rc::new(f));
        self
    }

    /// Invoked when the pointer enters the region. Never fires on touch
    /// devices.
    pub fn on_hover_enter(mut self, f: impl Fn() + 'static) -> Self {
        self.on_hover_enter = Some(Rc::new(f));
        self
    }

    /// Invoked when the pointer leaves the region. Never fires on touch
    /// devices.
    pub fn on_hover_exit(mut self, f: impl Fn() + 'static) -> Self {
        self.on_hover_exit = Some(Rc::new(f));
        self
    }

    /// Register with the focus manager, making the region reachable by
    /// spatial navigation. Clicking also moves focus here.
    pub fn focusable(mut self) -> Self {
        self.focusable = true;
        self
    }

    /// Is a press currently held on this region?
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Is the pointer currently over this region?
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }
}

impl Widget for GestureDetector {
    fn init(&mut self, ctx: &Context) -> Result<()> {
        init_child(ctx, &self.child, self.self_ref()?)?;
        if self.focusable {
            let mut node = FocusNode::new(self.self_ref()?);
            if let Some(click) = &self.on_click {
                let click = click.clone();
                node = node.on_activate(move || click());
            }
            self.node = Some(ctx.focus().register(node));
        }
        Ok(())
    }

    fn layout(&mut self, ctx: &Context, c: BoxConstraints) -> Result<()> {
        self.child.borrow_mut().layout(ctx, c)?;
        place(&self.child, Point::zero());
        let size = self.child.borrow().bounds().size();
        self.set_size(size);
        Ok(())
    }

    fn update(&mut self, ctx: &Context, delta: f32) -> Result<()> {
        let input = ctx.input();
        let inside = self.abs_rect.contains(input.pointer_position());

        if !input.is_touch_device() {
            if inside && !self.hovering {
                self.hovering = true;
                if let Some(f) = &self.on_hover_enter {
                    f();
                }
            } else if !inside && self.hovering {
                self.hovering = false;
                if let Some(f) = &self.on_hover_exit {
                    f();
                }
            }
        }

        let down = input.is_button_down(MouseButton::Left) || input.is_touch_active();
        if !self.pressed && inside && down {
            self.pressed = true;
            trace!(id = self.id(), "gesture: press");
            if let Some(f) = &self.on_press {
                f();
            }
        } else if self.pressed && !down {
            self.pressed = false;
            trace!(id = self.id(), "gesture: release");
            if let Some(f) = &self.on_release {
                f();
            }
            if inside {
                if let (true, Some(node)) = (self.focusable, &self.node) {
                    ctx.focus().set_focus(node);
                }
                if let Some(f) = &self.on_click {
                    f();
                }
            }
        }

        self.child.borrow_mut().update(ctx, delta)
    }

    fn draw(&mut self, ctx: &Context, x: f32, y: f32) -> Result<()> {
        self.abs_rect = self.bounds().at(Point::new(x, y));
        self.child.borrow_mut().draw(ctx, x, y)
    }

    fn dispose(&mut self, ctx: &Context) -> Result<()> {
        if let Some(node) = self.node.take() {
            ctx.focus().unregister(&node);
        }
        self.child.borrow_mut().dispose(ctx)
    }

    fn focus_rect(&self) -> Rect {
        self.abs_rect
    }
}

/// Wraps a child in a focusable region and strokes a highlight around it
/// while it holds focus.
#[derive(Stateful)]
pub struct FocusDecorator {
    state: WidgetState,
    child: WidgetRc,
    abs_rect: Rect,
    node: Option<Rc<FocusNode>>,
    color: Color,
    thickness: f32,
}

impl FocusDecorator {
    /// A decorator around a child, highlighting in white.
    pub fn new(child: impl Widget + 'static) -> Self {
        Self {
            state: WidgetState::new(),
            child: shared(child),
            abs_rect: Rect::zero(),
            node: None,
            color: Color::WHITE,
            thickness: 1.0,
        }
    }

    /// Set the highlight stroke.
    pub fn with_highlight(mut self, color: Color, thickness: f32) -> Self {
        self.color = color;
        self.thickness = thickness;
        self
    }

    /// The focus node, once mounted.
    pub fn node(&self) -> Option<&Rc<FocusNode>> {
        self.node.as_ref()
    }
}

impl Widget for FocusDecorator {
    fn init(&mut self, ctx: &Context) -> Result<()> {
        init_child(ctx, &self.child, self.self_ref()?)?;
        self.node = Some(ctx.focus().register(FocusNode::new(self.self_ref()?)));
        Ok(())
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
        self.abs_rect = self.bounds().at(Point::new(x, y));
        self.child.borrow_mut().draw(ctx, x, y)?;
        let focused = self
            .node
            .as_ref()
            .is_some_and(|n| ctx.focus().is_focused(n));
        if focused {
            ctx.paint()
                .draw_rect(self.abs_rect, self.color, self.thickness)?;
        }
        Ok(())
    }

    fn dispose(&mut self, ctx: &Context) -> Result<()> {
        if let Some(node) = self.node.take() {
            ctx.focus().unregister(&node);
        }
        self.child.borrow_mut().dispose(ctx)
    }

    fn focus_rect(&self) -> Rect {
        self.abs_rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::tutils::{TFixed, test_context};
    use arbor_core::{Expanse, init_root};
    use std::cell::RefCell;

    fn detector(
        ctx: &arbor_core::Context,
        log: &Rc<RefCell<Vec<&'static str>>>,
    ) -> arbor_core::Result<WidgetRc> {
        let mk = |tag: &'static str, log: &Rc<RefCell<Vec<&'static str>>>| {
            let log = log.clone();
            move || log.borrow_mut().push(tag)
        };
        let root = shared(
            GestureDetector::new(TFixed::new(100.0, 100.0))
                .on_press(mk("press", log))
                .on_release(mk("release", log))
                .on_click(mk("click", log))
                .on_hover_enter(mk("enter", log))
                .on_hover_exit(mk("exit", log)),
        );
        init_root(ctx, &root)?;
        root.borrow_mut()
            .layout(ctx, BoxConstraints::tight(Expanse::new(100.0, 100.0)))?;
        // Capture the hit rectangle.
        root.borrow_mut().draw(ctx, 0.0, 0.0)?;
        Ok(root)
    }

    #[test]
    fn press_release_inside_is_a_click() -> arbor_core::Result<()> {
        let (ctx, _, input) = test_context();
        let log = Rc::new(RefCell::new(Vec::new()));
        let root = detector(&ctx, &log)?;

        input.pointer.set(Point::new(50.0, 50.0));
        input.press(MouseButton::Left);
        root.borrow_mut().update(&ctx, 0.016)?;
        input.end_frame();
        input.release(MouseButton::Left);
        root.borrow_mut().update(&ctx, 0.016)?;

        assert_eq!(*log.borrow(), vec!["enter", "press", "release", "click"]);
        Ok(())
    }

    #[test]
    fn drag_out_releases_without_click() -> arbor_core::Result<()> {
        let (ctx, _, input) = test_context();
        let log = Rc::new(RefCell::new(Vec::new()));
        let root = detector(&ctx, &log)?;

        input.pointer.set(Point::new(50.0, 50.0));
        input.press(MouseButton::Left);
        root.borrow_mut().update(&ctx, 0.016)?;
        input.end_frame();
        input.pointer.set(Point::new(500.0, 500.0));
        root.borrow_mut().update(&ctx, 0.016)?;
        input.release(MouseButton::Left);
        root.borrow_mut().update(&ctx, 0.016)?;

        assert_eq!(*log.borrow(), vec!["enter", "press", "exit", "release"]);
        Ok(())
    }

    #[test]
    fn hit_test_uses_previous_frame_rect() -> arbor_core::Result<()> {
        let (ctx, _, input) = test_context();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mk = |tag: &'static str| {
            let log = log.clone();
            move || log.borrow_mut().push(tag)
        };
        let root = shared(GestureDetector::new(TFixed::new(100.0, 100.0)).on_press(mk("press")));
        init_root(&ctx, &root)?;
        root.borrow_mut()
            .layout(&ctx, BoxConstraints::tight(Expanse::new(100.0, 100.0)))?;

        // No draw yet: the press misses even though the pointer is inside
        // the laid-out bounds.
        input.pointer.set(Point::new(50.0, 50.0));
        input.press(MouseButton::Left);
        root.borrow_mut().update(&ctx, 0.016)?;
        assert!(log.borrow().is_empty());

        root.borrow_mut().draw(&ctx, 0.0, 0.0)?;
        root.borrow_mut().update(&ctx, 0.016)?;
        assert_eq!(*log.borrow(), vec!["press"]);
        Ok(())
    }

    #[test]
    fn touch_devices_skip_hover() -> arbor_core::Result<()> {
        let (ctx, _, input) = test_context();
        let log = Rc::new(RefCell::new(Vec::new()));
        let root = detector(&ctx, &log)?;

        input.touch_device.set(true);
        input.pointer.set(Point::new(50.0, 50.0));
        input.touch_active.set(true);
        root.borrow_mut().update(&ctx, 0.016)?;
        input.touch_active.set(false);
        root.borrow_mut().update(&ctx, 0.016)?;

        assert_eq!(*log.borrow(), vec!["press", "release", "click"]);
        Ok(())
    }

    #[test]
    fn click_moves_focus_to_focusable_detector() -> arbor_core::Result<()> {
        let (ctx, _, input) = test_context();
        // A first node takes initial focus; the detector is second.
        let decoy = shared(FocusDecorator::new(TFixed::new(10.0, 10.0)));
        init_root(&ctx, &decoy)?;
        let root = shared(GestureDetector::new(TFixed::new(100.0, 100.0)).focusable());
        init_root(&ctx, &root)?;
        root.borrow_mut()
            .layout(&ctx, BoxConstraints::tight(Expanse::new(100.0, 100.0)))?;
        root.borrow_mut().draw(&ctx, 0.0, 0.0)?;

        input.pointer.set(Point::new(50.0, 50.0));
        input.press(MouseButton::Left);
        root.borrow_mut().update(&ctx, 0.016)?;
        input.end_frame();
        input.release(MouseButton::Left);
        root.borrow_mut().update(&ctx, 0.016)?;

        let focused = ctx.focus().current().expect("something focused");
        let rect = focused.rect().expect("live widget");
        assert_eq!(rect, Rect::new(0.0, 0.0, 100.0, 100.0));
        Ok(())
    }
}
