//! The root driver. The host owns the OS event loop and calls into a
//! [`Runtime`] once per frame: `update` with the elapsed time, then `draw`
//! with the current surface size.

use std::rc::Rc;

use geom::{BoxConstraints, Direction, Expanse};
use tracing::info;

use crate::backend::{GamepadButton, MAX_GAMEPADS};
use crate::widget::{Widget, WidgetRc, init_root};
use crate::{Context, Result, error};

/// Owns the widget tree and drives its lifecycle. One runtime per surface.
pub struct Runtime {
    ctx: Context,
    root: Option<WidgetRc>,
    initialized: bool,
    active: bool,
}

impl Runtime {
    /// A runtime over the given context. Nothing is mounted yet.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            root: None,
            initialized: false,
            active: false,
        }
    }

    /// Start the runtime. Calling this twice is a configuration error.
    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Err(error::Error::Config(
                "runtime initialized more than once".into(),
            ));
        }
        self.initialized = true;
        self.active = true;
        info!("runtime initialized");
        Ok(())
    }

    /// Mount a root widget and run its `init`. Mounting over an existing
    /// root is a configuration error; a new root may be mounted after
    /// `unmount`.
    pub fn mount(&mut self, root: WidgetRc) -> Result<()> {
        if !self.initialized {
            return Err(error::Error::Lifecycle(
                "mount before runtime initialization".into(),
            ));
        }
        if self.root.is_some() {
            return Err(error::Error::Config("a root is already mounted".into()));
        }
        init_root(&self.ctx, &root)?;
        self.root = Some(root);
        Ok(())
    }

    /// Dispose the current root, if any, and clear all focus state.
    pub fn unmount(&mut self) -> Result<()> {
        if let Some(root) = self.root.take() {
            root.borrow_mut().dispose(&self.ctx)?;
        }
        self.ctx.focus().clear();
        Ok(())
    }

    /// Per-frame mutation pass. Polls gamepads for focus navigation, then
    /// runs the update traversal over the tree. `delta` is the elapsed time
    /// in seconds since the previous update.
    pub fn update(&mut self, delta: f32) -> Result<()> {
        let root = self.mounted()?;
        self.poll_gamepads();
        root.borrow_mut().update(&self.ctx, delta)?;
        Ok(())
    }

    /// Layout and paint pass over a surface of the given size. The root is
    /// always laid out tight to the surface.
    pub fn draw(&mut self, w: f32, h: f32) -> Result<()> {
        let root = self.mounted()?;
        root.borrow_mut()
            .layout(&self.ctx, BoxConstraints::tight(Expanse::new(w, h)))?;
        root.borrow_mut().draw(&self.ctx, 0.0, 0.0)?;
        Ok(())
    }

    /// Shut down: dispose the tree and deactivate. Idempotent.
    pub fn close(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.unmount()?;
        self.active = false;
        info!("runtime closed");
        Ok(())
    }

    /// Is the runtime running? False before `initialize` and after `close`.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The context widgets are driven with.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    fn mounted(&self) -> Result<WidgetRc> {
        if !self.active {
            return Err(error::Error::Lifecycle("runtime is not active".into()));
        }
        self.root
            .clone()
            .ok_or_else(|| error::Error::Lifecycle("no root mounted".into()))
    }

    /// Translate d-pad presses on any connected pad into focus movement, and
    /// the accept button into activation of the focused widget.
    fn poll_gamepads(&self) {
        let input = self.ctx.input();
        for pad in 0..MAX_GAMEPADS {
            if !input.gamepad_available(pad) {
                continue;
            }
            for (button, dir) in [
                (GamepadButton::DpadUp, Direction::Up),
                (GamepadButton::DpadDown, Direction::Down),
                (GamepadButton::DpadLeft, Direction::Left),
                (GamepadButton::DpadRight, Direction::Right),
            ] {
                if input.gamepad_button_pressed(pad, button) {
                    self.ctx.focus().move_focus(dir);
                }
            }
            if input.gamepad_button_pressed(pad, GamepadButton::South) {
                self.ctx.focus().activate();
            }
        }
    }
}
