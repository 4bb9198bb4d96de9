//! Headless 2D context that records every call.
//!
//! Used by `HeadlessHost` and by tests to assert on the exact call sequence a
//! draw operation produces.

use crate::context::{RenderContext2d, TextAlign};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// One recorded context call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", content = "args", rename_all = "camelCase")]
pub enum DrawCommand {
    SetFillStyle(String),
    SetStrokeStyle(String),
    SetLineWidth(f64),
    SetFont(String),
    SetTextAlign(TextAlign),
    FillRect { x: f64, y: f64, w: f64, h: f64 },
    BeginPath,
    Rect { x: f64, y: f64, w: f64, h: f64 },
    Ellipse {
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
    },
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Fill,
    Stroke,
    FillText { text: String, x: f64, y: f64 },
}

/// Shared view of a recording, still readable after the context has been
/// moved into a renderer.
#[derive(Debug, Clone, Default)]
pub struct CommandLog(Rc<RefCell<Vec<DrawCommand>>>);

impl CommandLog {
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Number of recorded commands equal to `command`.
    pub fn count(&self, command: &DrawCommand) -> usize {
        self.0.borrow().iter().filter(|c| *c == command).count()
    }

    /// The fill style in effect after the last recorded command.
    pub fn current_fill_style(&self) -> Option<String> {
        self.0.borrow().iter().rev().find_map(|c| match c {
            DrawCommand::SetFillStyle(color) => Some(color.clone()),
            _ => None,
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&*self.0.borrow()).unwrap_or_else(|_| "[]".to_string())
    }

    fn push(&self, command: DrawCommand) {
        log::trace!("RECORD {command:?}");
        self.0.borrow_mut().push(command);
    }
}

/// A `RenderContext2d` that appends to a `CommandLog` instead of painting.
#[derive(Debug, Default)]
pub struct RecordingContext {
    log: CommandLog,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to this context's recording.
    pub fn log(&self) -> CommandLog {
        self.log.clone()
    }
}

impl RenderContext2d for RecordingContext {
    fn set_fill_style(&mut self, color: &str) {
        self.log.push(DrawCommand::SetFillStyle(color.to_string()));
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.log.push(DrawCommand::SetStrokeStyle(color.to_string()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.log.push(DrawCommand::SetLineWidth(width));
    }

    fn set_font(&mut self, font: &str) {
        self.log.push(DrawCommand::SetFont(font.to_string()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.log.push(DrawCommand::SetTextAlign(align));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.log.push(DrawCommand::FillRect { x, y, w, h });
    }

    fn begin_path(&mut self) {
        self.log.push(DrawCommand::BeginPath);
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.log.push(DrawCommand::Rect { x, y, w, h });
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
        self.log.push(DrawCommand::Ellipse {
            x,
            y,
            radius_x,
            radius_y,
            rotation,
            start_angle,
            end_angle,
        });
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.log.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.log.push(DrawCommand::LineTo { x, y });
    }

    fn fill(&mut self) {
        self.log.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.log.push(DrawCommand::Stroke);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.log.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn log_survives_moving_the_context() {
        let ctx = RecordingContext::new();
        let log = ctx.log();
        let mut boxed: Box<dyn RenderContext2d> = Box::new(ctx);
        boxed.set_fill_style("#fff");
        boxed.fill_rect(0.0, 0.0, 10.0, 10.0);

        assert_eq!(
            log.commands(),
            vec![
                DrawCommand::SetFillStyle("#fff".into()),
                DrawCommand::FillRect {
                    x: 0.0,
                    y: 0.0,
                    w: 10.0,
                    h: 10.0
                },
            ]
        );
        assert_eq!(log.current_fill_style().as_deref(), Some("#fff"));
    }

    #[test]
    fn json_dump_tags_each_op() {
        let mut ctx = RecordingContext::new();
        ctx.begin_path();
        ctx.move_to(1.0, 2.0);
        assert_eq!(
            ctx.log().to_json(),
            r#"[{"op":"beginPath"},{"op":"moveTo","args":{"x":1.0,"y":2.0}}]"#
        );
    }
}
