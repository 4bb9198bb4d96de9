//! The 2D context contract the renderer draws through.
//!
//! Mirrors the subset of `CanvasRenderingContext2d` that brush uses, so the
//! same renderer drives a browser canvas or a headless recording.

use std::fmt;
use std::str::FromStr;

/// Horizontal text alignment, as understood by Canvas2D `textAlign`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
    Start,
    End,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "center" => Ok(Self::Center),
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            other => Err(format!("unknown text alignment `{other}`")),
        }
    }
}

/// Minimal immediate-mode 2D drawing context.
///
/// Paths are implicit: `begin_path` starts one, `rect`/`ellipse`/`move_to`/
/// `line_to` extend it, and `fill`/`stroke` paint whatever is current.
pub trait RenderContext2d {
    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn begin_path(&mut self);
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    #[allow(clippy::too_many_arguments)]
    fn ellipse(
        &mut self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
    );
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn fill(&mut self);
    fn stroke(&mut self);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_align_parses_canvas_keywords() {
        for align in [
            TextAlign::Left,
            TextAlign::Right,
            TextAlign::Center,
            TextAlign::Start,
            TextAlign::End,
        ] {
            assert_eq!(align.as_str().parse::<TextAlign>(), Ok(align));
        }
        assert!("middle".parse::<TextAlign>().is_err());
        assert_eq!(TextAlign::default(), TextAlign::Left);
    }
}
