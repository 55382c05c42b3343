use super::{Point, Rect};

/// An `Expanse` is a rectangle that has a width and height but no location.
/// Layout resolvers produce an `Expanse`; the parent then decides where it
/// goes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Expanse {
    /// Width in pixels.
    pub w: f32,
    /// Height in pixels.
    pub h: f32,
}

impl Expanse {
    /// Construct a size.
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// Return a `Rect` with the same dimensions, located at (0, 0).
    pub fn rect(&self) -> Rect {
        Rect {
            x: 0.0,
            y: 0.0,
            w: self.w,
            h: self.h,
        }
    }

    /// True if both dimensions are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.w.is_finite() && self.h.is_finite() && self.w >= 0.0 && self.h >= 0.0
    }

    /// True if this size can completely enclose the target size in both
    /// dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(f32, f32)> for Expanse {
    fn from(v: (f32, f32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}

impl From<Point> for Expanse {
    fn from(p: Point) -> Self {
        Self { w: p.x, h: p.y }
    }
}
