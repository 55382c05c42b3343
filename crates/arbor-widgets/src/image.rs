//! Image display.
//!
//! The image itself comes from an [`ImageProvider`], loaded during `init`
//! and released during `dispose`. Layout prefers the image's natural pixel
//! size; paint maps the image into the resolved bounds according to a
//! [`BoxFit`].

use std::rc::Rc;

use arbor_core::{
    Alignment, BoxConstraints, Color, Context, Expanse, ImageHandle, ImageProvider, Point, Result,
    Stateful, Widget, WidgetState, error,
};
use geom::Rect;

/// How an image is mapped into its resolved bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxFit {
    /// Stretch to the bounds, ignoring aspect ratio.
    Fill,
    /// Largest aspect-preserving size that fits inside the bounds.
    #[default]
    Contain,
    /// Smallest aspect-preserving size that covers the bounds; the overflow
    /// is cropped.
    Cover,
    /// Match the bounds' width, preserving aspect ratio.
    FitWidth,
    /// Match the bounds' height, preserving aspect ratio.
    FitHeight,
    /// Natural size, centered; larger images are cropped.
    None,
    /// Like `None`, but shrunk as by `Contain` when the image is too large.
    ScaleDown,
}

/// One paint call's worth of image geometry.
enum Mapping {
    Whole(Rect),
    Region { dest: Rect, src: Rect },
}

fn map_fit(fit: BoxFit, bounds: Rect, image: Expanse, align: Alignment) -> Mapping {
    let (bw, bh) = (bounds.w, bounds.h);
    let (iw, ih) = (image.w, image.h);
    if iw <= 0.0 || ih <= 0.0 || bw <= 0.0 || bh <= 0.0 {
        return Mapping::Whole(Rect::new(bounds.x, bounds.y, 0.0, 0.0));
    }
    let aligned = |w: f32, h: f32| {
        Rect::new(
            bounds.x + (bw - w) * align.x,
            bounds.y + (bh - h) * align.y,
            w,
            h,
        )
    };
    match fit {
        BoxFit::Fill => Mapping::Whole(bounds),
        BoxFit::Contain => {
            let s = (bw / iw).min(bh / ih);
            Mapping::Whole(aligned(iw * s, ih * s))
        }
        BoxFit::Cover => {
            let s = (bw / iw).max(bh / ih);
            let (vw, vh) = (bw / s, bh / s);
            Mapping::Region {
                dest: bounds,
                src: Rect::new((iw - vw) * align.x, (ih - vh) * align.y, vw, vh),
            }
        }
        BoxFit::FitWidth => {
            let s = bw / iw;
            Mapping::Whole(aligned(bw, ih * s))
        }
        BoxFit::FitHeight => {
            let s = bh / ih;
            Mapping::Whole(aligned(iw * s, bh))
        }
        BoxFit::None => {
            let (vw, vh) = (iw.min(bw), ih.min(bh));
            Mapping::Region {
                dest: aligned(vw, vh),
                src: Rect::new((iw - vw) * align.x, (ih - vh) * align.y, vw, vh),
            }
        }
        BoxFit::ScaleDown => {
            if iw <= bw && ih <= bh {
                map_fit(BoxFit::None, bounds, image, align)
            } else {
                map_fit(BoxFit::Contain, bounds, image, align)
            }
        }
    }
}

/// A widget displaying one provided image.
#[derive(Stateful)]
pub struct Image {
    state: WidgetState,
    provider: Rc<dyn ImageProvider>,
    handle: Option<Rc<ImageHandle>>,
    fit: BoxFit,
    align: Alignment,
    tint: Color,
    size: Option<Expanse>,
}

impl Image {
    /// An image widget over a provider.
    pub fn new(provider: Rc<dyn ImageProvider>) -> Self {
        Self {
            state: WidgetState::new(),
            provider,
            handle: None,
            fit: BoxFit::default(),
            align: Alignment::CENTER,
            tint: Color::WHITE,
            size: None,
        }
    }

    /// Set the fit mode.
    pub fn with_fit(mut self, fit: BoxFit) -> Self {
        self.fit = fit;
        self
    }

    /// Set where the fitted image sits within the bounds.
    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Prefer an explicit size over the image's natural size.
    pub fn with_size(mut self, w: f32, h: f32) -> Self {
        self.size = Some(Expanse::new(w, h));
        self
    }

    /// Set the tint applied at paint time.
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    fn natural_size(&self) -> Expanse {
        self.handle
            .as_ref()
            .map(|h| Expanse::new(h.width, h.height))
            .unwrap_or_default()
    }
}

impl Widget for Image {
    fn init(&mut self, _ctx: &Context) -> Result<()> {
        self.handle = Some(self.provider.load()?);
        Ok(())
    }

    fn layout(&mut self, _ctx: &Context, c: BoxConstraints) -> Result<()> {
        let preferred = self.size.unwrap_or_else(|| self.natural_size());
        self.set_size(c.constrain(preferred));
        Ok(())
    }

    fn draw(&mut self, ctx: &Context, x: f32, y: f32) -> Result<()> {
        let handle = self
            .handle
            .as_ref()
            .ok_or_else(|| error::Error::Lifecycle("image drawn before init".into()))?
            .clone();
        let abs = self.bounds().at(Point::new(x, y));
        match map_fit(self.fit, abs, self.natural_size(), self.align) {
            Mapping::Whole(dest) => ctx.paint().draw_image(dest, &handle, self.tint, 1.0)?,
            Mapping::Region { dest, src } => {
                ctx.paint().draw_image_region(dest, src, &handle, self.tint)?
            }
        }
        Ok(())
    }

    fn dispose(&mut self, _ctx: &Context) -> Result<()> {
        self.handle = None;
        self.provider.dispose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::tutils::{PaintOp, TestImages, test_context};
    use arbor_core::{init_root, shared};

    #[test]
    fn provider_lifecycle_is_paired() -> Result<()> {
        let (ctx, _, _) = test_context();
        let images = TestImages::new(64.0, 32.0);
        let root = shared(Image::new(images.clone()));
        init_root(&ctx, &root)?;
        assert_eq!(images.loads(), 1);
        root.borrow_mut().dispose(&ctx)?;
        assert_eq!(images.disposes(), 1);
        Ok(())
    }

    #[test]
    fn layout_prefers_natural_size() -> Result<()> {
        let (ctx, _, _) = test_context();
        let root = shared(Image::new(TestImages::new(64.0, 32.0)));
        init_root(&ctx, &root)?;
        root.borrow_mut()
            .layout(&ctx, BoxConstraints::loose(Expanse::new(1000.0, 1000.0)))?;
        assert_eq!(root.borrow().bounds().size(), Expanse::new(64.0, 32.0));
        Ok(())
    }

    #[test]
    fn explicit_size_wins_over_natural() -> Result<()> {
        let (ctx, _, _) = test_context();
        let root = shared(Image::new(TestImages::new(64.0, 32.0)).with_size(10.0, 10.0));
        init_root(&ctx, &root)?;
        root.borrow_mut()
            .layout(&ctx, BoxConstraints::loose(Expanse::new(1000.0, 1000.0)))?;
        assert_eq!(root.borrow().bounds().size(), Expanse::new(10.0, 10.0));
        Ok(())
    }

    #[test]
    fn alignment_shifts_the_letterbox() -> Result<()> {
        let (ctx, paint, _) = test_context();
        let root = shared(
            Image::new(TestImages::new(100.0, 50.0))
                .with_fit(BoxFit::Contain)
                .with_align(Alignment::TOP_LEFT),
        );
        init_root(&ctx, &root)?;
        root.borrow_mut()
            .layout(&ctx, BoxConstraints::tight(Expanse::new(200.0, 200.0)))?;
        root.borrow_mut().draw(&ctx, 0.0, 0.0)?;
        let ops = paint.borrow_mut().take_ops();
        assert_eq!(
            ops,
            vec![PaintOp::Image {
                dest: Rect::new(0.0, 0.0, 200.0, 100.0),
                size: Expanse::new(100.0, 50.0),
            }]
        );
        Ok(())
    }

    #[test]
    fn contain_letterboxes() -> Result<()> {
        let (ctx, paint, _) = test_context();
        let root = shared(Image::new(TestImages::new(100.0, 50.0)).with_fit(BoxFit::Contain));
        init_root(&ctx, &root)?;
        root.borrow_mut()
            .layout(&ctx, BoxConstraints::tight(Expanse::new(200.0, 200.0)))?;
        root.borrow_mut().draw(&ctx, 0.0, 0.0)?;
        let ops = paint.borrow_mut().take_ops();
        assert_eq!(
            ops,
            vec![PaintOp::Image {
                dest: Rect::new(0.0, 50.0, 200.0, 100.0),
                size: Expanse::new(100.0, 50.0),
            }]
        );
        Ok(())
    }

    #[test]
    fn cover_crops_the_overflow() -> Result<()> {
        let (ctx, paint, _) = test_context();
        let root = shared(Image::new(TestImages::new(100.0, 50.0)).with_fit(BoxFit::Cover));
        init_root(&ctx, &root)?;
        root.borrow_mut()
            .layout(&ctx, BoxConstraints::tight(Expanse::new(100.0, 100.0)))?;
        root.borrow_mut().draw(&ctx, 0.0, 0.0)?;
        let ops = paint.borrow_mut().take_ops();
        // Scale 2 on the vertical axis: only the middle 50x50 of the image
        // is visible.
        assert_eq!(
            ops,
            vec![PaintOp::ImageRegion {
                dest: Rect::new(0.0, 0.0, 100.0, 100.0),
                src: Rect::new(25.0, 0.0, 50.0, 50.0),
            }]
        );
        Ok(())
    }
}
