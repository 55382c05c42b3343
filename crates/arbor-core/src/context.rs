use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use geom::Expanse;

use crate::backend::{InputBackend, PaintBackend};
use crate::focus::FocusManager;

/// The shared services handed to every widget lifecycle method: input state,
/// paint primitives and the focus manager. Cloning a `Context` is cheap and
/// produces a handle to the same underlying services.
#[derive(Clone)]
pub struct Context {
    input: Rc<dyn InputBackend>,
    paint: Rc<RefCell<dyn PaintBackend>>,
    focus: Rc<FocusManager>,
}

impl Context {
    /// Assemble a context from its backends.
    pub fn new(input: Rc<dyn InputBackend>, paint: Rc<RefCell<dyn PaintBackend>>) -> Self {
        Self {
            input,
            paint,
            focus: Rc::new(FocusManager::new()),
        }
    }

    /// The input backend.
    pub fn input(&self) -> &dyn InputBackend {
        self.input.as_ref()
    }

    /// Borrow the paint backend mutably for drawing.
    pub fn paint(&self) -> RefMut<'_, dyn PaintBackend> {
        self.paint.borrow_mut()
    }

    /// Borrow the paint backend immutably, for queries like text measurement.
    pub fn paint_ref(&self) -> Ref<'_, dyn PaintBackend> {
        self.paint.borrow()
    }

    /// The focus manager.
    pub fn focus(&self) -> &FocusManager {
        &self.focus
    }

    /// Measure text through the paint backend.
    pub fn measure_text(&self, text: &str, scale: f32) -> Expanse {
        self.paint_ref().measure_text(text, scale)
    }
}
