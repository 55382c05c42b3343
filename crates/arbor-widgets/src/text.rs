//! Text display.
//!
//! Measurement is delegated to the paint backend, so the widget stays font
//! agnostic. Content is split on newlines, and optionally word-wrapped to
//! the constraint width during layout.

use arbor_core::{
    Alignment, BoxConstraints, Color, Context, Expanse, Point, Result, Stateful, Widget,
    WidgetState,
};

/// A block of styled text.
#[derive(Stateful)]
pub struct Text {
    state: WidgetState,
    content: String,
    color: Color,
    scale: f32,
    wrap: bool,
    align: Alignment,
    lines: Vec<String>,
    line_height: f32,
}

impl Text {
    /// A single-style text block.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            state: WidgetState::new(),
            content: content.into(),
            color: Color::WHITE,
            scale: 1.0,
            wrap: false,
            align: Alignment::TOP_LEFT,
            lines: Vec::new(),
            line_height: 0.0,
        }
    }

    /// Set the text color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the scale factor passed to the backend.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Word-wrap to the constraint width instead of overflowing.
    pub fn with_wrap(mut self) -> Self {
        self.wrap = true;
        self
    }

    /// Align the lines within the resolved bounds: `x` places each line
    /// horizontally, `y` places the block vertically.
    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Replace the content. Takes effect at the next layout.
    pub fn set_text(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// The current content.
    pub fn text(&self) -> &str {
        &self.content
    }

    fn wrap_line(&self, ctx: &Context, line: &str, max_w: f32, out: &mut Vec<String>) {
        let mut current = String::new();
        for word in line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if !current.is_empty() && ctx.measure_text(&candidate, self.scale).w > max_w {
                out.push(std::mem::take(&mut current));
                current = word.to_string();
            } else {
                current = candidate;
            }
        }
        out.push(current);
    }
}

impl Widget for Text {
    fn layout(&mut self, ctx: &Context, c: BoxConstraints) -> Result<()> {
        self.line_height = ctx.measure_text("", self.scale).h;
        self.lines.clear();
        for line in self.content.split('\n') {
            if self.wrap && c.has_bounded_width() {
                let mut wrapped = Vec::new();
                self.wrap_line(ctx, line, c.max_w, &mut wrapped);
                self.lines.append(&mut wrapped);
            } else {
                self.lines.push(line.to_string());
            }
        }
        let width = self
            .lines
            .iter()
            .map(|l| ctx.measure_text(l, self.scale).w)
            .fold(0.0, f32::max);
        let height = self.line_height * self.lines.len() as f32;
        self.set_size(c.constrain(Expanse::new(width, height)));
        Ok(())
    }

    fn draw(&mut self, ctx: &Context, x: f32, y: f32) -> Result<()> {
        let b = self.bounds();
        let block_h = self.line_height * self.lines.len() as f32;
        let y0 = y + (b.h - block_h) * self.align.y;
        for (i, line) in self.lines.iter().enumerate() {
            let line_w = ctx.measure_text(line, self.scale).w;
            let lx = x + (b.w - line_w) * self.align.x;
            ctx.paint().draw_text(
                Point::new(lx, y0 + i as f32 * self.line_height),
                line,
                self.color,
                self.scale,
            )?;
        }
        Ok(())
    }
}
