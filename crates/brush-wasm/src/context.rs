//! `RenderContext2d` over the browser's `CanvasRenderingContext2d`.

use brush_core::{RenderContext2d, TextAlign};
use web_sys::CanvasRenderingContext2d;

/// A canvas element's 2D context.
pub struct WebContext(pub CanvasRenderingContext2d);

impl RenderContext2d for WebContext {
    fn set_fill_style(&mut self, color: &str) {
        self.0.set_fill_style_str(color);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.0.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.0.set_line_width(width);
    }

    fn set_font(&mut self, font: &str) {
        self.0.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.0.set_text_align(align.as_str());
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.0.fill_rect(x, y, w, h);
    }

    fn begin_path(&mut self) {
        self.0.begin_path();
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.0.rect(x, y, w, h);
    }

    fn ellipse(
        &mut self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
    ) {
        // Only fails for negative radii, which draw nothing.
        let _ = self
            .0
            .ellipse(x, y, radius_x, radius_y, rotation, start_angle, end_angle);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.0.line_to(x, y);
    }

    fn fill(&mut self) {
        self.0.fill();
    }

    fn stroke(&mut self) {
        self.0.stroke();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let _ = self.0.fill_text(text, x, y);
    }
}
