//! Run-breaking layout.
//!
//! A [`Wrap`] lays children along its main axis like a flex run, but starts
//! a new run instead of overflowing when the next child would not fit. Runs
//! stack along the cross axis.

use arbor_core::{
    Axis, BoxConstraints, Context, Point, Result, Stateful, Widget, WidgetRc, WidgetState,
    init_child, place, shared,
};

use crate::flex::{CrossAlign, MainAlign};

/// A multi-child container that breaks its children into runs.
#[derive(Stateful)]
pub struct Wrap {
    state: WidgetState,
    axis: Axis,
    children: Vec<WidgetRc>,
    spacing: f32,
    run_spacing: f32,
    align: MainAlign,
    cross_align: CrossAlign,
}

impl Wrap {
    /// A horizontal wrap: runs fill left to right, stack downward.
    pub fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    /// A vertical wrap: runs fill top to bottom, stack rightward.
    pub fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    fn new(axis: Axis) -> Self {
        Self {
            state: WidgetState::new(),
            axis,
            children: Vec::new(),
            spacing: 0.0,
            run_spacing: 0.0,
            align: MainAlign::default(),
            cross_align: CrossAlign::default(),
        }
    }

    /// Append a child.
    pub fn with_child(mut self, child: impl Widget + 'static) -> Self {
        self.children.push(shared(child));
        self
    }

    /// Set the gap between children within a run.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the gap between runs.
    pub fn with_run_spacing(mut self, run_spacing: f32) -> Self {
        self.run_spacing = run_spacing;
        self
    }

    /// Set how leftover main-axis space is distributed within each run.
    pub fn with_align(mut self, align: MainAlign) -> Self {
        self.align = align;
        self
    }

    /// Set how children sit across their run.
    pub fn with_cross_align(mut self, cross_align: CrossAlign) -> Self {
        self.cross_align = cross_align;
        self
    }
}

impl Widget for Wrap {
    fn init(&mut self, ctx: &Context) -> Result<()> {
        for child in &self.children {
            init_child(ctx, child, self.self_ref()?)?;
        }
        Ok(())
    }

    fn layout(&mut self, ctx: &Context, c: BoxConstraints) -> Result<()> {
        let axis = self.axis;
        let main_max = c.max_along(axis);
        let cc = BoxConstraints::along(axis, 0.0, main_max, 0.0, f32::INFINITY)?;
        for child in &self.children {
            child.borrow_mut().layout(ctx, cc)?;
        }

        // Break children into runs greedily, spacing included.
        let mut runs: Vec<Vec<&WidgetRc>> = Vec::new();
        let mut current: Vec<&WidgetRc> = Vec::new();
        let mut cursor = 0.0f32;
        for child in &self.children {
            let m = axis.main_of(child.borrow().bounds().size());
            if !current.is_empty() && cursor + self.spacing + m > main_max {
                runs.push(std::mem::take(&mut current));
                cursor = 0.0;
            }
            if !current.is_empty() {
                cursor += self.spacing;
            }
            cursor += m;
            current.push(child);
        }
        if !current.is_empty() {
            runs.push(current);
        }

        let mut cross_offset = 0.0f32;
        let mut widest = 0.0f32;
        for (i, run) in runs.iter().enumerate() {
            if i > 0 {
                cross_offset += self.run_spacing;
            }
            let gaps = self.spacing * (run.len() as f32 - 1.0);
            let run_main: f32 =
                gaps + run.iter().map(|ch| axis.main_of(ch.borrow().bounds().size())).sum::<f32>();
            let run_cross = run
                .iter()
                .map(|ch| axis.cross_of(ch.borrow().bounds().size()))
                .fold(0.0, f32::max);
            widest = widest.max(run_main);

            let leftover = if main_max.is_finite() {
                (main_max - run_main).max(0.0)
            } else {
                0.0
            };
            let n = run.len() as f32;
            let (mut pos, extra_gap) = match self.align {
                MainAlign::Start => (0.0, 0.0),
                MainAlign::Center => (leftover / 2.0, 0.0),
                MainAlign::End => (leftover, 0.0),
                MainAlign::SpaceBetween => {
                    if run.len() > 1 {
                        (0.0, leftover / (n - 1.0))
                    } else {
                        (0.0, 0.0)
                    }
                }
                MainAlign::SpaceAround => (leftover / n / 2.0, leftover / n),
            };
            for child in run {
                let cs = child.borrow().bounds().size();
                let cross = match self.cross_align {
                    CrossAlign::Start => 0.0,
                    CrossAlign::Center => (run_cross - axis.cross_of(cs)) / 2.0,
                    CrossAlign::End => run_cross - axis.cross_of(cs),
                };
                let p = match axis {
                    Axis::Horizontal => Point::new(pos, cross_offset + cross),
                    Axis::Vertical => Point::new(cross_offset + cross, pos),
                };
                place(child, p);
                pos += axis.main_of(cs) + self.spacing + extra_gap;
            }
            cross_offset += run_cross;
        }
        self.set_size(c.constrain(axis.pack(widest, cross_offset)));
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
