//! Rendering surface adapter.
//!
//! Turns primitive drawing intents into `RenderContext2d` calls, applying the
//! current `PaintState`. Paint setters only touch the state; the context sees
//! them at the next draw call.

use crate::context::{RenderContext2d, TextAlign};
use crate::paint::PaintState;
use std::f64::consts::TAU;

/// Font and alignment for `Renderer::text`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    pub align: TextAlign,
    pub font_size: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            align: TextAlign::Left,
            font_size: 16.0,
        }
    }
}

impl TextStyle {
    /// CSS font shorthand, e.g. `16px Arial`.
    pub fn font(&self) -> String {
        format!("{}px {}", self.font_size, self.font_family)
    }
}

/// Draws onto a fixed-size surface through a 2D context.
pub struct Renderer<C> {
    ctx: C,
    width: u32,
    height: u32,
    paint: PaintState,
}

impl<C: RenderContext2d> Renderer<C> {
    pub fn new(ctx: C, width: u32, height: u32) -> Self {
        Self {
            ctx,
            width,
            height,
            paint: PaintState::default(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn paint(&self) -> &PaintState {
        &self.paint
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    // ─── Paint state ─────────────────────────────────────────────────────

    pub fn fill(&mut self, color: &str) {
        self.paint.set_fill_color(color);
    }

    pub fn stroke_color(&mut self, color: &str) {
        self.paint.set_stroke_color(color);
    }

    pub fn stroke_weight(&mut self, weight: f64) {
        self.paint.set_stroke_width(weight);
    }

    // ─── Drawing ─────────────────────────────────────────────────────────

    /// Paint the whole surface with `color`, replacing prior content.
    pub fn background(&mut self, color: &str) {
        log::trace!("PAINT background {color} {}x{}", self.width, self.height);
        self.ctx.set_fill_style(color);
        self.ctx
            .fill_rect(0.0, 0.0, f64::from(self.width), f64::from(self.height));
    }

    /// Axis-aligned rectangle with its top-left corner at `(x, y)`.
    ///
    /// With `apply_stroke`, the box is inset by half the stroke width on each
    /// side so the outline stays inside the nominal `w`×`h` bounds.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, apply_stroke: bool) {
        let (x, y, w, h) = if apply_stroke {
            let s = self.paint.stroke_width();
            (x + s / 2.0, y + s / 2.0, w - s, h - s)
        } else {
            (x, y, w, h)
        };
        log::trace!("PAINT rect ({x}, {y}) {w}x{h} stroke={apply_stroke}");

        self.apply_fill();
        self.ctx.begin_path();
        self.ctx.rect(x, y, w, h);
        self.ctx.fill();
        if apply_stroke {
            self.stroke();
        }
    }

    pub fn square(&mut self, x: f64, y: f64, size: f64, apply_stroke: bool) {
        self.rect(x, y, size, size, apply_stroke);
    }

    /// Filled ellipse centered at `(x, y)` with radii `w/2` and `h/2`.
    pub fn ellipse(&mut self, x: f64, y: f64, w: f64, h: f64) {
        log::trace!("PAINT ellipse ({x}, {y}) {w}x{h}");
        self.apply_fill();
        self.ctx.begin_path();
        self.ctx.ellipse(x, y, w / 2.0, h / 2.0, 0.0, 0.0, TAU);
        self.ctx.fill();
    }

    pub fn circle(&mut self, x: f64, y: f64, r: f64) {
        self.ellipse(x, y, r, r);
    }

    /// Define a segment path. Does not paint; call `stroke` afterwards.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        log::trace!("PAINT line ({x1}, {y1}) -> ({x2}, {y2})");
        self.ctx.begin_path();
        self.ctx.move_to(x1, y1);
        self.ctx.line_to(x2, y2);
    }

    /// Fill-colored text; never stroked.
    pub fn text(&mut self, content: &str, x: f64, y: f64, style: &TextStyle) {
        log::trace!("PAINT text \"{content}\" at ({x}, {y})");
        self.ctx.set_font(&style.font());
        self.ctx.set_text_align(style.align);
        self.apply_fill();
        self.ctx.fill_text(content, x, y);
    }

    /// Stroke the current path with the current stroke color and width.
    pub fn stroke(&mut self) {
        if let Some(color) = self.paint.stroke_color() {
            self.ctx.set_stroke_style(color);
        }
        self.ctx.set_line_width(self.paint.stroke_width());
        self.ctx.stroke();
    }

    fn apply_fill(&mut self) {
        if let Some(color) = self.paint.fill_color() {
            self.ctx.set_fill_style(color);
        }
    }
}
