//! Test doubles for the collaborator backends, plus small stub widgets.
//! Used by the engine's own tests and by downstream widget tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use geom::{BoxConstraints, Expanse, Point, Rect};

use crate::backend::{
    Color, GamepadAxis, GamepadButton, ImageHandle, ImageProvider, InputBackend, MouseButton,
    PaintBackend,
};
use crate::widget::Widget;
use crate::{Context, Result, Stateful, WidgetState, error};

/// One recorded paint call.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    /// A line.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Line color.
        color: Color,
    },
    /// A stroked rectangle.
    Stroke {
        /// The rectangle.
        rect: Rect,
        /// Stroke color.
        color: Color,
    },
    /// A filled rectangle.
    Fill {
        /// The rectangle.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// A text run.
    Text {
        /// Baseline origin.
        pos: Point,
        /// The text.
        text: String,
        /// Scale factor.
        scale: f32,
    },
    /// An image blit.
    Image {
        /// Destination rectangle.
        dest: Rect,
        /// Source image size.
        size: Expanse,
    },
    /// A sub-rectangle image blit.
    ImageRegion {
        /// Destination rectangle.
        dest: Rect,
        /// Source rectangle within the image.
        src: Rect,
    },
    /// A clip push.
    PushClip(Rect),
    /// A clip pop.
    PopClip,
}

/// A paint backend that records every call. Text measures as a fixed-width
/// font: 8 units per character wide, 16 units tall, times the scale.
#[derive(Default)]
pub struct TestPaint {
    /// The recorded calls, in order.
    pub ops: Vec<PaintOp>,
    clip_depth: usize,
}

impl TestPaint {
    /// An empty recorder wrapped for use as a context backend.
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Drain and return the recorded calls.
    pub fn take_ops(&mut self) -> Vec<PaintOp> {
        std::mem::take(&mut self.ops)
    }
}

impl PaintBackend for TestPaint {
    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> Result<()> {
        self.ops.push(PaintOp::Line { from, to, color });
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, color: Color, _thickness: f32) -> Result<()> {
        self.ops.push(PaintOp::Stroke { rect, color });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()> {
        self.ops.push(PaintOp::Fill { rect, color });
        Ok(())
    }

    fn draw_text(&mut self, pos: Point, text: &str, _color: Color, scale: f32) -> Result<()> {
        self.ops.push(PaintOp::Text {
            pos,
            text: text.to_string(),
            scale,
        });
        Ok(())
    }

    fn measure_text(&self, text: &str, scale: f32) -> Expanse {
        Expanse::new(text.chars().count() as f32 * 8.0 * scale, 16.0 * scale)
    }

    fn draw_image(
        &mut self,
        dest: Rect,
        image: &ImageHandle,
        _tint: Color,
        _scale: f32,
    ) -> Result<()> {
        self.ops.push(PaintOp::Image {
            dest,
            size: Expanse::new(image.width, image.height),
        });
        Ok(())
    }

    fn draw_image_region(
        &mut self,
        dest: Rect,
        src: Rect,
        _image: &ImageHandle,
        _tint: Color,
    ) -> Result<()> {
        self.ops.push(PaintOp::ImageRegion { dest, src });
        Ok(())
    }

    fn push_clip(&mut self, rect: Rect) -> Result<()> {
        self.clip_depth += 1;
        self.ops.push(PaintOp::PushClip(rect));
        Ok(())
    }

    fn pop_clip(&mut self) -> Result<()> {
        if self.clip_depth == 0 {
            return Err(error::Error::Backend("clip stack underflow".into()));
        }
        self.clip_depth -= 1;
        self.ops.push(PaintOp::PopClip);
        Ok(())
    }
}

/// A scriptable input backend. Tests poke the fields between frames; all
/// queries read them directly.
#[derive(Default)]
pub struct TestInput {
    /// Pointer position.
    pub pointer: Cell<Point>,
    /// Pointer movement this frame.
    pub pointer_delta: Cell<Point>,
    /// Wheel movement this frame.
    pub wheel: Cell<Point>,
    /// Buttons that went down this frame.
    pub pressed: RefCell<HashSet<MouseButton>>,
    /// Buttons that went up this frame.
    pub released: RefCell<HashSet<MouseButton>>,
    /// Buttons currently held.
    pub down: RefCell<HashSet<MouseButton>>,
    /// Report as a touch device.
    pub touch_device: Cell<bool>,
    /// A touch is in progress.
    pub touch_active: Cell<bool>,
    /// Clipboard contents.
    pub clipboard: RefCell<String>,
    /// Cursor visibility as last requested.
    pub cursor_shown: Cell<bool>,
    /// Connected gamepads.
    pub pads: RefCell<HashSet<usize>>,
    /// Gamepad buttons that went down this frame.
    pub pad_pressed: RefCell<HashSet<(usize, GamepadButton)>>,
    /// Gamepad buttons currently held.
    pub pad_down: RefCell<HashSet<(usize, GamepadButton)>>,
    /// Gamepad axis positions.
    pub pad_axes: RefCell<HashMap<(usize, GamepadAxis), f32>>,
}

impl TestInput {
    /// A backend with everything idle.
    pub fn new() -> Rc<Self> {
        let t = Self::default();
        t.cursor_shown.set(true);
        Rc::new(t)
    }

    /// Press a button this frame: it appears in both the edge and held sets.
    pub fn press(&self, b: MouseButton) {
        self.pressed.borrow_mut().insert(b);
        self.down.borrow_mut().insert(b);
    }

    /// Release a button this frame.
    pub fn release(&self, b: MouseButton) {
        self.released.borrow_mut().insert(b);
        self.down.borrow_mut().remove(&b);
    }

    /// Clear the per-frame edge sets, as a host would between polls.
    pub fn end_frame(&self) {
        self.pressed.borrow_mut().clear();
        self.released.borrow_mut().clear();
        self.pad_pressed.borrow_mut().clear();
        self.wheel.set(Point::zero());
        self.pointer_delta.set(Point::zero());
    }

    /// Connect a gamepad.
    pub fn connect_pad(&self, pad: usize) {
        self.pads.borrow_mut().insert(pad);
    }

    /// Press a gamepad button this frame.
    pub fn press_pad(&self, pad: usize, b: GamepadButton) {
        self.pad_pressed.borrow_mut().insert((pad, b));
        self.pad_down.borrow_mut().insert((pad, b));
    }
}

impl InputBackend for TestInput {
    fn pointer_position(&self) -> Point {
        self.pointer.get()
    }

    fn pointer_delta(&self) -> Point {
        self.pointer_delta.get()
    }

    fn wheel_delta(&self) -> Point {
        self.wheel.get()
    }

    fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed.borrow().contains(&button)
    }

    fn is_button_released(&self, button: MouseButton) -> bool {
        self.released.borrow().contains(&button)
    }

    fn is_button_down(&self, button: MouseButton) -> bool {
        self.down.borrow().contains(&button)
    }

    fn is_touch_device(&self) -> bool {
        self.touch_device.get()
    }

    fn is_touch_active(&self) -> bool {
        self.touch_active.get()
    }

    fn clipboard(&self) -> Result<String> {
        Ok(self.clipboard.borrow().clone())
    }

    fn set_clipboard(&self, text: &str) -> Result<()> {
        *self.clipboard.borrow_mut() = text.to_string();
        Ok(())
    }

    fn show_cursor(&self, show: bool) {
        self.cursor_shown.set(show);
    }

    fn gamepad_available(&self, pad: usize) -> bool {
        self.pads.borrow().contains(&pad)
    }

    fn gamepad_button_pressed(&self, pad: usize, button: GamepadButton) -> bool {
        self.pad_pressed.borrow().contains(&(pad, button))
    }

    fn gamepad_button_down(&self, pad: usize, button: GamepadButton) -> bool {
        self.pad_down.borrow().contains(&(pad, button))
    }

    fn gamepad_axis(&self, pad: usize, axis: GamepadAxis) -> f32 {
        self.pad_axes
            .borrow()
            .get(&(pad, axis))
            .copied()
            .unwrap_or(0.0)
    }
}

/// An image provider that counts lifecycle calls and serves a fixed-size
/// handle.
pub struct TestImages {
    size: Expanse,
    loads: Cell<usize>,
    disposes: Cell<usize>,
}

impl TestImages {
    /// A provider serving images of the given pixel size.
    pub fn new(w: f32, h: f32) -> Rc<Self> {
        Rc::new(Self {
            size: Expanse::new(w, h),
            loads: Cell::new(0),
            disposes: Cell::new(0),
        })
    }

    /// How many times `load` has run.
    pub fn loads(&self) -> usize {
        self.loads.get()
    }

    /// How many times `dispose` has run.
    pub fn disposes(&self) -> usize {
        self.disposes.get()
    }
}

impl ImageProvider for TestImages {
    fn load(&self) -> Result<Rc<ImageHandle>> {
        self.loads.set(self.loads.get() + 1);
        Ok(Rc::new(ImageHandle::new(
            self.size.w,
            self.size.h,
            Rc::new(()),
        )))
    }

    fn dispose(&self) -> Result<()> {
        self.disposes.set(self.disposes.get() + 1);
        Ok(())
    }
}

/// A leaf widget with a preferred size, clamped into whatever constraints it
/// is given.
pub struct TFixed {
    /// Widget state.
    pub state: WidgetState,
    /// Preferred size.
    pub size: Expanse,
}

impl TFixed {
    /// A leaf preferring the given size.
    pub fn new(w: f32, h: f32) -> Self {
        Self {
            state: WidgetState::new(),
            size: Expanse::new(w, h),
        }
    }
}

impl Stateful for TFixed {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }
}

impl Widget for TFixed {
    fn layout(&mut self, _ctx: &Context, c: BoxConstraints) -> Result<()> {
        let s = c.constrain(self.size);
        self.set_size(s);
        Ok(())
    }
}

/// A leaf widget that appends every lifecycle call to a shared log, for
/// ordering assertions.
pub struct TRecorder {
    /// Widget state.
    pub state: WidgetState,
    /// Label used in log entries.
    pub name: String,
    /// The shared log.
    pub log: Rc<RefCell<Vec<String>>>,
}

impl TRecorder {
    /// A recorder writing into `log` under `name`.
    pub fn new(name: impl Into<String>, log: Rc<RefCell<Vec<String>>>) -> Self {
        Self {
            state: WidgetState::new(),
            name: name.into(),
            log,
        }
    }

    fn note(&self, what: &str) {
        self.log.borrow_mut().push(format!("{}:{}", self.name, what));
    }
}

impl Stateful for TRecorder {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }
}

impl Widget for TRecorder {
    fn init(&mut self, _ctx: &Context) -> Result<()> {
        self.note("init");
        Ok(())
    }

    fn layout(&mut self, _ctx: &Context, c: BoxConstraints) -> Result<()> {
        self.note("layout");
        self.set_size(c.constrain(Expanse::default()));
        Ok(())
    }

    fn update(&mut self, _ctx: &Context, _delta: f32) -> Result<()> {
        self.note("update");
        Ok(())
    }

    fn draw(&mut self, _ctx: &Context, _x: f32, _y: f32) -> Result<()> {
        self.note("draw");
        Ok(())
    }

    fn dispose(&mut self, _ctx: &Context) -> Result<()> {
        self.note("dispose");
        Ok(())
    }
}

/// A context over fresh test backends, returned along with handles to them.
pub fn test_context() -> (Context, Rc<RefCell<TestPaint>>, Rc<TestInput>) {
    let paint = TestPaint::new();
    let input = TestInput::new();
    let ctx = Context::new(input.clone(), paint.clone());
    (ctx, paint, input)
}
