use super::{Axis, EdgeInsets, Error, Expanse, Result};

/// An immutable min/max range per axis, passed from a parent to a child at
/// the start of layout.
///
/// Invariants: `min <= max` on each axis, minimums are finite and
/// non-negative, and nothing is NaN. A maximum may be `f32::INFINITY`,
/// meaning the child may request any extent on that axis; the parent must
/// still resolve a finite size for itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxConstraints {
    /// Minimum width.
    pub min_w: f32,
    /// Maximum width, possibly infinite.
    pub max_w: f32,
    /// Minimum height.
    pub min_h: f32,
    /// Maximum height, possibly infinite.
    pub max_h: f32,
}

impl BoxConstraints {
    /// Construct constraints, validating the range invariants.
    pub fn new(min_w: f32, max_w: f32, min_h: f32, max_h: f32) -> Result<Self> {
        let c = Self {
            min_w,
            max_w,
            min_h,
            max_h,
        };
        if !c.is_valid() {
            return Err(Error::Geometry(format!("invalid constraints {c:?}")));
        }
        Ok(c)
    }

    /// Tight constraints: the child's size is dictated on both axes.
    pub fn tight(size: Expanse) -> Self {
        Self {
            min_w: size.w,
            max_w: size.w,
            min_h: size.h,
            max_h: size.h,
        }
    }

    /// Loose constraints: anything from zero up to the given size.
    pub fn loose(size: Expanse) -> Self {
        Self {
            min_w: 0.0,
            max_w: size.w,
            min_h: 0.0,
            max_h: size.h,
        }
    }

    /// Check the range invariants.
    pub fn is_valid(&self) -> bool {
        let axis_ok = |min: f32, max: f32| {
            min.is_finite() && !max.is_nan() && min >= 0.0 && min <= max
        };
        axis_ok(self.min_w, self.max_w) && axis_ok(self.min_h, self.max_h)
    }

    /// Clamp a size into the constraint ranges.
    pub fn constrain(&self, size: Expanse) -> Expanse {
        Expanse::new(
            size.w.clamp(self.min_w, self.max_w),
            size.h.clamp(self.min_h, self.max_h),
        )
    }

    /// A copy with the minimums dropped to zero.
    pub fn loosen(&self) -> Self {
        Self {
            min_w: 0.0,
            max_w: self.max_w,
            min_h: 0.0,
            max_h: self.max_h,
        }
    }

    /// A copy shrunk by the given insets, for laying out a padded child.
    /// Maximums never drop below the (also shrunk) minimums.
    pub fn deflate(&self, insets: EdgeInsets) -> Self {
        let h = insets.horizontal();
        let v = insets.vertical();
        let min_w = (self.min_w - h).max(0.0);
        let min_h = (self.min_h - v).max(0.0);
        Self {
            min_w,
            max_w: (self.max_w - h).max(min_w),
            min_h,
            max_h: (self.max_h - v).max(min_h),
        }
    }

    /// Is the width dictated exactly?
    pub fn is_tight_width(&self) -> bool {
        self.min_w == self.max_w
    }

    /// Is the height dictated exactly?
    pub fn is_tight_height(&self) -> bool {
        self.min_h == self.max_h
    }

    /// Does the width have a finite upper bound?
    pub fn has_bounded_width(&self) -> bool {
        self.max_w.is_finite()
    }

    /// Does the height have a finite upper bound?
    pub fn has_bounded_height(&self) -> bool {
        self.max_h.is_finite()
    }

    /// Minimum extent along an axis.
    pub fn min_along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.min_w,
            Axis::Vertical => self.min_h,
        }
    }

    /// Maximum extent along an axis.
    pub fn max_along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.max_w,
            Axis::Vertical => self.max_h,
        }
    }

    /// Build constraints from per-axis ranges, with `main` along the given
    /// axis.
    pub fn along(
        axis: Axis,
        main_min: f32,
        main_max: f32,
        cross_min: f32,
        cross_max: f32,
    ) -> Result<Self> {
        match axis {
            Axis::Horizontal => Self::new(main_min, main_max, cross_min, cross_max),
            Axis::Vertical => Self::new(cross_min, cross_max, main_min, main_max),
        }
    }
}
