use super::{Expanse, Point};

/// A fractional alignment within a container. `(0, 0)` is the top-left
/// corner, `(0.5, 0.5)` the center and `(1, 1)` the bottom-right corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    /// Horizontal fraction.
    pub x: f32,
    /// Vertical fraction.
    pub y: f32,
}

impl Alignment {
    /// Top-left corner.
    pub const TOP_LEFT: Self = Self { x: 0.0, y: 0.0 };
    /// Top edge, centered.
    pub const TOP_CENTER: Self = Self { x: 0.5, y: 0.0 };
    /// Top-right corner.
    pub const TOP_RIGHT: Self = Self { x: 1.0, y: 0.0 };
    /// Left edge, centered.
    pub const CENTER_LEFT: Self = Self { x: 0.0, y: 0.5 };
    /// Dead center.
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };
    /// Right edge, centered.
    pub const CENTER_RIGHT: Self = Self { x: 1.0, y: 0.5 };
    /// Bottom-left corner.
    pub const BOTTOM_LEFT: Self = Self { x: 0.0, y: 1.0 };
    /// Bottom edge, centered.
    pub const BOTTOM_CENTER: Self = Self { x: 0.5, y: 1.0 };
    /// Bottom-right corner.
    pub const BOTTOM_RIGHT: Self = Self { x: 1.0, y: 1.0 };

    /// Construct an alignment from fractions.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Position a child of the given size within a container, returning the
    /// child's top-left offset.
    pub fn position(&self, container: Expanse, child: Expanse) -> Point {
        Point::new(
            (container.w - child.w) * self.x,
            (container.h - child.h) * self.y,
        )
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::TOP_LEFT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position() {
        let outer = Expanse::new(100.0, 100.0);
        let inner = Expanse::new(20.0, 10.0);
        assert_eq!(
            Alignment::TOP_LEFT.position(outer, inner),
            Point::new(0.0, 0.0)
        );
        assert_eq!(
            Alignment::CENTER.position(outer, inner),
            Point::new(40.0, 45.0)
        );
        assert_eq!(
            Alignment::BOTTOM_RIGHT.position(outer, inner),
            Point::new(80.0, 90.0)
        );
    }
}
