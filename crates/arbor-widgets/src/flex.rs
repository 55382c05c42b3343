//! Single-axis flexible layout.
//!
//! A [`Flex`] lays its children along one axis in two passes: rigid children
//! first, under unbounded main-axis constraints, then [`Flexible`] children
//! splitting whatever main-axis space remains in proportion to their flex
//! factors. Inter-child spacing takes part in the space accounting, so a
//! spaced run of rigid children reports the full spaced extent as its size.

use arbor_core::{
    Axis, BoxConstraints, Context, Expanse, Point, Result, Stateful, Widget, WidgetRc, WidgetState,
    init_child, place, shared,
};

/// Distribution of leftover main-axis space when no child is flexible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainAlign {
    /// Pack children at the start.
    #[default]
    Start,
    /// Center the run of children.
    Center,
    /// Pack children at the end.
    End,
    /// Distribute leftover space into the gaps between children.
    SpaceBetween,
    /// Distribute leftover space around every child equally.
    SpaceAround,
}

/// Placement of each child across the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossAlign {
    /// Align to the start edge.
    #[default]
    Start,
    /// Center on the cross axis.
    Center,
    /// Align to the end edge.
    End,
}

/// A child wrapper claiming a proportional share of the free main-axis
/// space in a [`Flex`].
#[derive(Stateful)]
pub struct Flexible {
    state: WidgetState,
    child: WidgetRc,
    flex: f32,
}

impl Flexible {
    /// Wrap a child with a flex factor. Factors of zero are treated as rigid.
    pub fn new(flex: f32, child: impl Widget + 'static) -> Self {
        Self {
            state: WidgetState::new(),
            child: shared(child),
            flex,
        }
    }
}

impl Widget for Flexible {
    fn init(&mut self, ctx: &Context) -> Result<()> {
        init_child(ctx, &self.child, self.self_ref()?)
    }

    fn layout(&mut self, ctx: &Context, c: BoxConstraints) -> Result<()> {
        self.child.borrow_mut().layout(ctx, c)?;
        place(&self.child, Point::zero());
        let size = self.child.borrow().bounds().size();
        self.set_size(size);
        Ok(())
    }

    fn update(&mut self, ctx: &Context, delta: f32) -> Result<()> {
        self.child.borrow_mut().update(ctx, delta)
    }

    fn draw(&mut self, ctx: &Context, x: f32, y: f32) -> Result<()> {
        self.child.borrow_mut().draw(ctx, x, y)
    }

    fn dispose(&mut self, ctx: &Context) -> Result<()> {
        self.child.borrow_mut().dispose(ctx)
    }

    fn flex_factor(&self) -> Option<f32> {
        (self.flex > 0.0).then_some(self.flex)
    }
}

/// A multi-child container laying children out along one axis.
#[derive(Stateful)]
pub struct Flex {
    state: WidgetState,
    axis: Axis,
    children: Vec<WidgetRc>,
    spacing: f32,
    main_align: MainAlign,
    cross_align: CrossAlign,
}

impl Flex {
    /// A horizontal run of children.
    pub fn row() -> Self {
        Self::new(Axis::Horizontal)
    }

    /// A vertical run of children.
    pub fn column() -> Self {
        Self::new(Axis::Vertical)
    }

    fn new(axis: Axis) -> Self {
        Self {
            state: WidgetState::new(),
            axis,
            children: Vec::new(),
            spacing: 0.0,
            main_align: MainAlign::default(),
            cross_align: CrossAlign::default(),
        }
    }

    /// Append a child.
    pub fn with_child(mut self, child: impl Widget + 'static) -> Self {
        self.children.push(shared(child));
        self
    }

    /// Append a flexible child with the given factor.
    pub fn with_flexible(self, flex: f32, child: impl Widget + 'static) -> Self {
        self.with_child(Flexible::new(flex, child))
    }

    /// Set the gap between adjacent children.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set main-axis distribution of leftover space.
    pub fn with_main_align(mut self, align: MainAlign) -> Self {
        self.main_align = align;
        self
    }

    /// Set cross-axis placement of children.
    pub fn with_cross_align(mut self, align: CrossAlign) -> Self {
        self.cross_align = align;
        self
    }

    fn spacing_total(&self) -> f32 {
        if self.children.is_empty() {
            0.0
        } else {
            self.spacing * (self.children.len() as f32 - 1.0)
        }
    }
}

impl Widget for Flex {
    fn init(&mut self, ctx: &Context) -> Result<()> {
        for child in &self.children {
            init_child(ctx, child, self.self_ref()?)?;
        }
        Ok(())
    }

    fn layout(&mut self, ctx: &Context, c: BoxConstraints) -> Result<()> {
        let axis = self.axis;
        let cross_max = c.max_along(axis.cross());

        // Pass one: rigid children under unbounded main constraints.
        let mut used = self.spacing_total();
        let mut total_flex = 0.0;
        for child in &self.children {
            let flex = child.borrow().flex_factor();
            match flex {
                Some(f) => total_flex += f,
                None => {
                    let cc = BoxConstraints::along(axis, 0.0, f32::INFINITY, 0.0, cross_max)?;
                    child.borrow_mut().layout(ctx, cc)?;
                    used += axis.main_of(child.borrow().bounds().size());
                }
            }
        }

        // The main extent: fill a bounded axis, shrink-wrap an unbounded one.
        let main = if c.max_along(axis).is_finite() {
            c.max_along(axis)
        } else {
            used.max(c.min_along(axis))
        };
        let remaining = (main - used).max(0.0);

        // Pass two: flexible children split the remaining space, tight on
        // the main axis.
        if total_flex > 0.0 {
            for child in &self.children {
                let Some(f) = child.borrow().flex_factor() else {
                    continue;
                };
                let share = remaining * f / total_flex;
                let cc = BoxConstraints::along(axis, share, share, 0.0, cross_max)?;
                child.borrow_mut().layout(ctx, cc)?;
            }
        }

        let cross = self
            .children
            .iter()
            .map(|ch| axis.cross_of(ch.borrow().bounds().size()))
            .fold(0.0, f32::max);
        let size = c.constrain(axis.pack(main, cross));
        self.set_size(size);

        // Leftover space only remains distributable when nothing was
        // flexible.
        let leftover = if total_flex > 0.0 { 0.0 } else { remaining };
        let n = self.children.len() as f32;
        let (mut cursor, extra_gap) = match self.main_align {
            MainAlign::Start => (0.0, 0.0),
            MainAlign::Center => (leftover / 2.0, 0.0),
            MainAlign::End => (leftover, 0.0),
            MainAlign::SpaceBetween => {
                if self.children.len() > 1 {
                    (0.0, leftover / (n - 1.0))
                } else {
                    (0.0, 0.0)
                }
            }
            MainAlign::SpaceAround => {
                if self.children.is_empty() {
                    (0.0, 0.0)
                } else {
                    (leftover / n / 2.0, leftover / n)
                }
            }
        };
        let cross_extent = axis.cross_of(size);
        for child in &self.children {
            let cs = child.borrow().bounds().size();
            let cross_offset = match self.cross_align {
                CrossAlign::Start => 0.0,
                CrossAlign::Center => (cross_extent - axis.cross_of(cs)) / 2.0,
                CrossAlign::End => cross_extent - axis.cross_of(cs),
            };
            let p = match axis {
                Axis::Horizontal => Point::new(cursor, cross_offset),
                Axis::Vertical => Point::new(cross_offset, cursor),
            };
            place(child, p);
            cursor += axis.main_of(cs) + self.spacing + extra_gap;
        }
        Ok(())
    }

    fn update(&mut self, ctx: &Context, delta: f32) -> Result<()> {
        for child in &self.children {
            child.borrow_mut().update(ctx, delta)?;
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &Context, x: f32, y: f32) -> Result<()> {
        for child in &self.children {
            let cb = child.borrow().bounds();
            child.borrow_mut().draw(ctx, x + cb.x, y + cb.y)?;
        }
        Ok(())
    }

    fn dispose(&mut self, ctx: &Context) -> Result<()> {
        for child in &self.children {
            child.borrow_mut().dispose(ctx)?;
        }
        Ok(())
    }
}
