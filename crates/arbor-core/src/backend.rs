//! Collaborator interfaces consumed by the engine.
//!
//! The engine is host-agnostic: it draws through [`PaintBackend`], reads
//! input through [`InputBackend`] and obtains decoded images through
//! [`ImageProvider`]. All coordinates handed to the paint backend are
//! absolute.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use geom::{Expanse, Point, Rect};

use crate::{Result, error};

/// An RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component.
    pub a: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// An opaque color from float components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// A color from float components.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// A color from 8-bit components.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Is this color fully transparent?
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Mouse buttons recognized by the input backend.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Middle button.
    Middle,
}

/// Gamepad buttons recognized by the input backend.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum GamepadButton {
    /// D-pad up.
    DpadUp,
    /// D-pad down.
    DpadDown,
    /// D-pad left.
    DpadLeft,
    /// D-pad right.
    DpadRight,
    /// Bottom face button (accept).
    South,
    /// Right face button (back).
    East,
    /// Top face button.
    North,
    /// Left face button.
    West,
    /// Start button.
    Start,
    /// Select button.
    Select,
}

/// Gamepad analog axes.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum GamepadAxis {
    /// Left stick, horizontal.
    LeftX,
    /// Left stick, vertical.
    LeftY,
    /// Right stick, horizontal.
    RightX,
    /// Right stick, vertical.
    RightY,
}

/// The maximum number of gamepads an input backend is queried for.
pub const MAX_GAMEPADS: usize = 4;

/// Pixel-drawing primitives. Implementations do the actual rasterization;
/// the engine only ever hands them absolute coordinates.
pub trait PaintBackend {
    /// Draw a line between two points.
    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> Result<()>;

    /// Stroke a rectangle outline.
    fn draw_rect(&mut self, rect: Rect, color: Color, thickness: f32) -> Result<()>;

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()>;

    /// Draw text at a position, scaled.
    fn draw_text(&mut self, pos: Point, text: &str, color: Color, scale: f32) -> Result<()>;

    /// Measure the extent text would occupy at a scale.
    fn measure_text(&self, text: &str, scale: f32) -> Expanse;

    /// Draw an image into a destination rectangle with a tint.
    fn draw_image(&mut self, dest: Rect, image: &ImageHandle, tint: Color, scale: f32)
    -> Result<()>;

    /// Draw a sub-rectangle of an image into a destination rectangle.
    fn draw_image_region(
        &mut self,
        dest: Rect,
        src: Rect,
        image: &ImageHandle,
        tint: Color,
    ) -> Result<()>;

    /// Push a clip rectangle. Subsequent draws are clipped to the
    /// intersection of all pushed rectangles.
    fn push_clip(&mut self, rect: Rect) -> Result<()>;

    /// Pop the most recently pushed clip rectangle.
    fn pop_clip(&mut self) -> Result<()>;
}

/// Pointer, wheel, touch, clipboard and gamepad state, polled once per frame
/// by whoever owns the OS event loop.
pub trait InputBackend {
    /// Absolute pointer position.
    fn pointer_position(&self) -> Point;

    /// Pointer movement since the previous frame.
    fn pointer_delta(&self) -> Point;

    /// Wheel movement since the previous frame, on both axes.
    fn wheel_delta(&self) -> Point;

    /// Did the button go down this frame?
    fn is_button_pressed(&self, button: MouseButton) -> bool;

    /// Did the button go up this frame?
    fn is_button_released(&self, button: MouseButton) -> bool;

    /// Is the button currently held?
    fn is_button_down(&self, button: MouseButton) -> bool;

    /// Is this a touch device (no hover support)?
    fn is_touch_device(&self) -> bool;

    /// Is a touch currently active?
    fn is_touch_active(&self) -> bool;

    /// Read the clipboard.
    fn clipboard(&self) -> Result<String>;

    /// Replace the clipboard contents.
    fn set_clipboard(&self, text: &str) -> Result<()>;

    /// Show or hide the pointer cursor.
    fn show_cursor(&self, show: bool);

    /// Is the given gamepad connected? Pads are indexed `0..MAX_GAMEPADS`.
    fn gamepad_available(&self, pad: usize) -> bool;

    /// Did the gamepad button go down this frame?
    fn gamepad_button_pressed(&self, pad: usize, button: GamepadButton) -> bool;

    /// Is the gamepad button currently held?
    fn gamepad_button_down(&self, pad: usize, button: GamepadButton) -> bool;

    /// Current position of a gamepad axis, in `[-1, 1]`.
    fn gamepad_axis(&self, pad: usize, axis: GamepadAxis) -> f32;
}

/// A decoded image: its pixel dimensions plus an opaque reference the paint
/// backend knows how to draw.
pub struct ImageHandle {
    /// Pixel width.
    pub width: f32,
    /// Pixel height.
    pub height: f32,
    /// Backend-specific texture reference.
    pub backend: Rc<dyn Any>,
}

impl ImageHandle {
    /// Construct a handle.
    pub fn new(width: f32, height: f32, backend: Rc<dyn Any>) -> Self {
        Self {
            width,
            height,
            backend,
        }
    }
}

impl std::fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageHandle")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Supplies decoded images to image widgets. `load` is called during the
/// widget's `init`, `dispose` during its `dispose`; a provider may cache and
/// reference-count the underlying resource.
pub trait ImageProvider {
    /// Produce the decoded image.
    fn load(&self) -> Result<Rc<ImageHandle>>;

    /// Release the image produced by `load`.
    fn dispose(&self) -> Result<()>;
}

/// A path-keyed image cache: repeated loads of the same key return the same
/// handle. The decode function is supplied by the host.
pub struct ImageCache {
    /// Host-supplied decoder.
    decode: Box<dyn Fn(&str) -> Result<Rc<ImageHandle>>>,
    /// Decoded handles by key.
    entries: RefCell<HashMap<String, Rc<ImageHandle>>>,
}

impl ImageCache {
    /// Construct a cache around a decode function.
    pub fn new(decode: impl Fn(&str) -> Result<Rc<ImageHandle>> + 'static) -> Rc<Self> {
        Rc::new(Self {
            decode: Box::new(decode),
            entries: RefCell::new(HashMap::new()),
        })
    }

    /// Fetch the handle for a key, decoding on first use.
    pub fn get(&self, key: &str) -> Result<Rc<ImageHandle>> {
        if let Some(h) = self.entries.borrow().get(key) {
            return Ok(h.clone());
        }
        let h = (self.decode)(key)?;
        self.entries.borrow_mut().insert(key.to_string(), h.clone());
        Ok(h)
    }

    /// Drop the cached handle for a key, if present.
    pub fn evict(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }

    /// A provider that loads `key` through this cache.
    pub fn provider(self: &Rc<Self>, key: impl Into<String>) -> CachedImageProvider {
        CachedImageProvider {
            cache: self.clone(),
            key: key.into(),
        }
    }
}

/// An [`ImageProvider`] backed by a shared [`ImageCache`].
pub struct CachedImageProvider {
    /// The shared cache.
    cache: Rc<ImageCache>,
    /// Cache key, typically a path.
    key: String,
}

impl ImageProvider for CachedImageProvider {
    fn load(&self) -> Result<Rc<ImageHandle>> {
        self.cache
            .get(&self.key)
            .map_err(|e| error::Error::Resolve(format!("image {:?}: {e}", self.key)))
    }

    fn dispose(&self) -> Result<()> {
        // The cache owns the handle; nothing to release per widget.
        Ok(())
    }
}

/// An [`ImageProvider`] backed by an in-memory byte buffer that has already
/// been decoded.
pub struct MemoryImageProvider {
    /// The prebuilt handle.
    handle: Rc<ImageHandle>,
}

impl MemoryImageProvider {
    /// Wrap decoded bytes and their dimensions.
    pub fn new(width: f32, height: f32, bytes: Rc<Vec<u8>>) -> Self {
        Self {
            handle: Rc::new(ImageHandle::new(width, height, bytes)),
        }
    }
}

impl ImageProvider for MemoryImageProvider {
    fn load(&self) -> Result<Rc<ImageHandle>> {
        Ok(self.handle.clone())
    }

    fn dispose(&self) -> Result<()> {
        Ok(())
    }
}
