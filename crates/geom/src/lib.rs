//! Geometry primitives used across arbor.
//!
//! All coordinates are `f32` pixels. Layout never stores a non-finite or
//! negative dimension; the constraint type enforces this at the boundary.

/// Alignment fractions within a container.
mod alignment;
/// Box constraint ranges passed from parent to child during layout.
mod constraints;
/// Error types for geometry operations.
mod error;
/// Width/height size type.
mod expanse;
/// Per-edge padding values.
mod insets;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;

pub use alignment::Alignment;
pub use constraints::BoxConstraints;
pub use error::{Error, Result};
pub use expanse::Expanse;
pub use insets::EdgeInsets;
pub use point::Point;
pub use rect::Rect;

/// Cardinal directions, used for focus navigation.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Direction {
    /// Upward direction.
    Up,
    /// Downward direction.
    Down,
    /// Leftward direction.
    Left,
    /// Rightward direction.
    Right,
}

/// Layout axes for flex containers and scrolling viewports.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Axis {
    /// Left-to-right main axis.
    Horizontal,
    /// Top-to-bottom main axis.
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Select the component of an expanse that lies along this axis.
    pub fn main_of(self, e: Expanse) -> f32 {
        match self {
            Self::Horizontal => e.w,
            Self::Vertical => e.h,
        }
    }

    /// Select the component of an expanse that lies across this axis.
    pub fn cross_of(self, e: Expanse) -> f32 {
        self.cross().main_of(e)
    }

    /// Assemble an expanse from main and cross extents.
    pub fn pack(self, main: f32, cross: f32) -> Expanse {
        match self {
            Self::Horizontal => Expanse::new(main, cross),
            Self::Vertical => Expanse::new(cross, main),
        }
    }
}
