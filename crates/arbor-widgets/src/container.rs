use arbor_core::{
    Alignment, BoxConstraints, Color, Context, EdgeInsets, Expanse, Point, Result, Stateful,
    Widget, WidgetRc, WidgetState, init_child, place, shared,
};

/// A single-child box that applies padding, an optional background and
/// border, an optional explicit size, and aligns its child within itself.
#[derive(Stateful)]
pub struct Container {
    state: WidgetState,
    child: Option<WidgetRc>,
    padding: EdgeInsets,
    background: Option<Color>,
    border: Option<(Color, f32)>,
    alignment: Alignment,
    clip: bool,
    width: Option<f32>,
    height: Option<f32>,
}

impl Container {
    /// An empty container.
    pub fn new() -> Self {
        Self {
            state: WidgetState::new(),
            child: None,
            padding: EdgeInsets::default(),
            background: None,
            border: None,
            alignment: Alignment::TOP_LEFT,
            clip: false,
            width: None,
            height: None,
        }
    }

    /// Set the child.
    pub fn with_child(mut self, child: impl Widget + 'static) -> Self {
        self.child = Some(shared(child));
        self
    }

    /// Set the padding.
    pub fn with_padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = padding;
        self
    }

    /// Set the background fill.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Set a border stroke.
    pub fn with_border(mut self, color: Color, thickness: f32) -> Self {
        self.border = Some((color, thickness));
        self
    }

    /// Set how the child is aligned within the padded interior.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Clip the child's paint to this container's rectangle.
    pub fn with_clip(mut self) -> Self {
        self.clip = true;
        self
    }

    /// Request an explicit size. Still clamped by incoming constraints.
    pub fn with_size(mut self, w: f32, h: f32) -> Self {
        self.width = Some(w);
        self.height = Some(h);
        self
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Container {
    fn init(&mut self, ctx: &Context) -> Result<()> {
        if let Some(child) = &self.child {
            init_child(ctx, child, self.self_ref()?)?;
        }
        Ok(())
    }

    fn layout(&mut self, ctx: &Context, c: BoxConstraints) -> Result<()> {
        // An explicit size tightens the incoming constraints before padding
        // is carved out.
        let mut outer = c;
        if let Some(w) = self.width {
            let w = w.clamp(outer.min_w, outer.max_w);
            outer.min_w = w;
            outer.max_w = w;
        }
        if let Some(h) = self.height {
            let h = h.clamp(outer.min_h, outer.max_h);
            outer.min_h = h;
            outer.max_h = h;
        }
        let inner = outer.deflate(self.padding);

        let size = if let Some(child) = &self.child {
            child.borrow_mut().layout(ctx, inner.loosen())?;
            let cs = child.borrow().bounds().size();
            outer.constrain(Expanse::new(
                cs.w + self.padding.horizontal(),
                cs.h + self.padding.vertical(),
            ))
        } else {
            outer.constrain(Expanse::default())
        };
        self.set_size(size);

        if let Some(child) = &self.child {
            let interior = Expanse::new(
                size.w - self.padding.horizontal(),
                size.h - self.padding.vertical(),
            );
            let cs = child.borrow().bounds().size();
            let p = self.alignment.position(interior, cs);
            place(
                child,
                Point::new(self.padding.left + p.x, self.padding.top + p.y),
            );
        }
        Ok(())
    }

    fn update(&mut self, ctx: &Context, delta: f32) -> Result<()> {
        if let Some(child) = &self.child {
            child.borrow_mut().update(ctx, delta)?;
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &Context, x: f32, y: f32) -> Result<()> {
        let b = self.bounds();
        let abs = b.at(Point::new(x, y));
        if let Some(bg) = self.background {
            ctx.paint().fill_rect(abs, bg)?;
        }
        if let Some((color, thickness)) = self.border {
            ctx.paint().draw_rect(abs, color, thickness)?;
        }
        if let Some(child) = &self.child {
            let cb = child.borrow().bounds();
            if self.clip {
                ctx.paint().push_clip(abs)?;
                let r = child.borrow_mut().draw(ctx, x + cb.x, y + cb.y);
                ctx.paint().pop_clip()?;
                r?;
            } else {
                child.borrow_mut().draw(ctx, x + cb.x, y + cb.y)?;
            }
        }
        Ok(())
    }

    fn dispose(&mut self, ctx: &Context) -> Result<()> {
        if let Some(child) = &self.child {
            child.borrow_mut().dispose(ctx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::tutils::{TFixed, test_context};
    use arbor_core::{Rect, init_root};

    #[test]
    fn wraps_child_plus_padding() -> Result<()> {
        let (ctx, _, _) = test_context();
        let root = shared(
            Container::new()
                .with_padding(EdgeInsets::all(5.0))
                .with_child(TFixed::new(20.0, 10.0)),
        );
        init_root(&ctx, &root)?;
        root.borrow_mut()
            .layout(&ctx, BoxConstraints::loose(Expanse::new(100.0, 100.0)))?;
        assert_eq!(root.borrow().bounds().size(), Expanse::new(30.0, 20.0));
        Ok(())
    }

    #[test]
    fn centers_child_in_explicit_size() -> Result<()> {
        let (ctx, _, _) = test_context();
        let root = shared(
            Container::new()
                .with_size(100.0, 100.0)
                .with_alignment(Alignment::CENTER)
                .with_child(TFixed::new(20.0, 10.0)),
        );
        init_root(&ctx, &root)?;
        root.borrow_mut()
            .layout(&ctx, BoxConstraints::loose(Expanse::new(200.0, 200.0)))?;
        assert_eq!(root.borrow().bounds().size(), Expanse::new(100.0, 100.0));
        Ok(())
    }

    #[test]
    fn clip_brackets_the_child_paint() -> Result<()> {
        use arbor_core::tutils::PaintOp;
        let (ctx, paint, _) = test_context();
        let root = shared(
            Container::new()
                .with_size(20.0, 20.0)
                .with_clip()
                .with_child(Container::new().with_size(100.0, 100.0).with_background(Color::BLACK)),
        );
        init_root(&ctx, &root)?;
        root.borrow_mut()
            .layout(&ctx, BoxConstraints::loose(Expanse::new(20.0, 20.0)))?;
        root.borrow_mut().draw(&ctx, 0.0, 0.0)?;
        let ops = paint.borrow_mut().take_ops();
        assert_eq!(
            ops,
            vec![
                PaintOp::PushClip(Rect::new(0.0, 0.0, 20.0, 20.0)),
                PaintOp::Fill {
                    rect: Rect::new(0.0, 0.0, 20.0, 20.0),
                    color: Color::BLACK,
                },
                PaintOp::PopClip,
            ]
        );
        Ok(())
    }

    #[test]
    fn background_fills_own_rect() -> Result<()> {
        let (ctx, paint, _) = test_context();
        let root = shared(
            Container::new()
                .with_size(40.0, 30.0)
                .with_background(Color::BLACK),
        );
        init_root(&ctx, &root)?;
        root.borrow_mut()
            .layout(&ctx, BoxConstraints::loose(Expanse::new(100.0, 100.0)))?;
        root.borrow_mut().draw(&ctx, 7.0, 9.0)?;
        let ops = paint.borrow_mut().take_ops();
        assert_eq!(
            ops,
            vec![arbor_core::tutils::PaintOp::Fill {
                rect: Rect::new(7.0, 9.0, 40.0, 30.0),
                color: Color::BLACK,
            }]
        );
        Ok(())
    }
}
