//! Guarded drawing surface.
//!
//! `Surface` is a cheap shared handle over `SurfaceState`. Every drawing and
//! paint call goes through one guard: before `create_canvas` there is no
//! renderer and the call fails with `UninitializedSurface` without side
//! effects. Clones observe the canvas created later, so setup/draw callbacks
//! can capture a handle up front.

use crate::context::RenderContext2d;
use crate::error::{BrushError, Result};
use crate::paint::PaintState;
use crate::renderer::{Renderer, TextStyle};
use std::cell::RefCell;
use std::rc::Rc;

/// Whether a canvas exists yet.
pub enum SurfaceState<C> {
    Uninitialized,
    Ready(Renderer<C>),
}

pub struct Surface<C> {
    state: Rc<RefCell<SurfaceState<C>>>,
}

impl<C> Clone for Surface<C> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<C: RenderContext2d> Default for Surface<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: RenderContext2d> Surface<C> {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(SurfaceState::Uninitialized)),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.state.borrow(), SurfaceState::Ready(_))
    }

    /// `(width, height)` of the current canvas.
    pub fn size(&self) -> Option<(u32, u32)> {
        match &*self.state.borrow() {
            SurfaceState::Ready(r) => Some((r.width(), r.height())),
            SurfaceState::Uninitialized => None,
        }
    }

    /// Snapshot of the paint state.
    pub fn paint(&self) -> Result<PaintState> {
        self.with_renderer("paint", |r| r.paint().clone())
    }

    /// Replace whatever canvas was there before; paint state starts fresh.
    pub(crate) fn install(&self, renderer: Renderer<C>) {
        *self.state.borrow_mut() = SurfaceState::Ready(renderer);
    }

    /// Run `f` against the renderer, or fail naming `operation`.
    pub fn with_renderer<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut Renderer<C>) -> T,
    ) -> Result<T> {
        match &mut *self.state.borrow_mut() {
            SurfaceState::Ready(renderer) => Ok(f(renderer)),
            SurfaceState::Uninitialized => Err(BrushError::UninitializedSurface { operation }),
        }
    }

    // ─── Paint state ─────────────────────────────────────────────────────

    pub fn fill(&self, color: &str) -> Result<()> {
        self.with_renderer("fill", |r| r.fill(color))
    }

    pub fn stroke_color(&self, color: &str) -> Result<()> {
        self.with_renderer("stroke_color", |r| r.stroke_color(color))
    }

    pub fn stroke_weight(&self, weight: f64) -> Result<()> {
        self.with_renderer("stroke_weight", |r| r.stroke_weight(weight))
    }

    // ─── Drawing ─────────────────────────────────────────────────────────

    pub fn background(&self, color: &str) -> Result<()> {
        self.with_renderer("background", |r| r.background(color))
    }

    pub fn rect(&self, x: f64, y: f64, w: f64, h: f64, apply_stroke: bool) -> Result<()> {
        self.with_renderer("rect", |r| r.rect(x, y, w, h, apply_stroke))
    }

    pub fn square(&self, x: f64, y: f64, size: f64, apply_stroke: bool) -> Result<()> {
        self.with_renderer("square", |r| r.square(x, y, size, apply_stroke))
    }

    pub fn ellipse(&self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        self.with_renderer("ellipse", |r| r.ellipse(x, y, w, h))
    }

    pub fn circle(&self, x: f64, y: f64, r: f64) -> Result<()> {
        self.with_renderer("circle", |renderer| renderer.circle(x, y, r))
    }

    /// Segment from `(x1, y1)` to `(x2, y2)`, always stroked.
    pub fn line(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        self.with_renderer("line", |r| {
            r.line(x1, y1, x2, y2);
            r.stroke();
        })
    }

    /// Text in 16px Arial, left-aligned.
    pub fn text(&self, content: &str, x: f64, y: f64) -> Result<()> {
        self.text_styled(content, x, y, &TextStyle::default())
    }

    pub fn text_styled(&self, content: &str, x: f64, y: f64, style: &TextStyle) -> Result<()> {
        self.with_renderer("text", |r| r.text(content, x, y, style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DrawCommand, RecordingContext};

    #[test]
    fn every_call_fails_before_install() {
        let surface = Surface::<RecordingContext>::new();
        let results = [
            ("fill", surface.fill("red")),
            ("stroke_color", surface.stroke_color("red")),
            ("stroke_weight", surface.stroke_weight(2.0)),
            ("background", surface.background("red")),
            ("rect", surface.rect(0.0, 0.0, 1.0, 1.0, false)),
            ("square", surface.square(0.0, 0.0, 1.0, true)),
            ("ellipse", surface.ellipse(0.0, 0.0, 1.0, 1.0)),
            ("circle", surface.circle(0.0, 0.0, 1.0)),
            ("line", surface.line(0.0, 0.0, 1.0, 1.0)),
            ("text", surface.text("hi", 0.0, 0.0)),
        ];
        for (operation, result) in results {
            assert_eq!(result, Err(BrushError::UninitializedSurface { operation }));
        }
        assert!(!surface.is_ready());
        assert_eq!(surface.size(), None);
    }

    #[test]
    fn clones_see_the_installed_canvas() {
        let surface = Surface::new();
        let handle = surface.clone();
        let ctx = RecordingContext::new();
        let log = ctx.log();
        surface.install(Renderer::new(ctx, 320, 240));

        handle.background("#000").unwrap();
        assert_eq!(handle.size(), Some((320, 240)));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn line_is_always_stroked_once() {
        let surface = Surface::new();
        let ctx = RecordingContext::new();
        let log = ctx.log();
        surface.install(Renderer::new(ctx, 100, 100));

        surface.line(0.0, 0.0, 10.0, 0.0).unwrap();
        assert_eq!(log.count(&DrawCommand::Stroke), 1);
        surface.stroke_weight(0.0).unwrap();
        surface.line(0.0, 0.0, 0.0, 10.0).unwrap();
        assert_eq!(log.count(&DrawCommand::Stroke), 2);
    }
}
