//! Paint state shared by every draw call.

/// Stroke width used until `stroke_weight` is called.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

/// Current fill color, stroke color, and stroke width.
///
/// Colors stay `None` until first set; drawing in that state uses whatever
/// the underlying context already has.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintState {
    fill_color: Option<String>,
    stroke_color: Option<String>,
    stroke_width: f64,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            fill_color: None,
            stroke_color: None,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl PaintState {
    pub fn fill_color(&self) -> Option<&str> {
        self.fill_color.as_deref()
    }

    pub fn stroke_color(&self) -> Option<&str> {
        self.stroke_color.as_deref()
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn set_fill_color(&mut self, color: &str) {
        self.fill_color = Some(color.to_string());
    }

    pub fn set_stroke_color(&mut self, color: &str) {
        self.stroke_color = Some(color.to_string());
    }

    /// Negative and NaN widths clamp to zero.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.stroke_width = if width > 0.0 { width } else { 0.0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let paint = PaintState::default();
        assert_eq!(paint.fill_color(), None);
        assert_eq!(paint.stroke_color(), None);
        assert_eq!(paint.stroke_width(), 1.0);
    }

    #[test]
    fn stroke_width_never_negative() {
        let mut paint = PaintState::default();
        paint.set_stroke_width(-3.0);
        assert_eq!(paint.stroke_width(), 0.0);
        paint.set_stroke_width(f64::NAN);
        assert_eq!(paint.stroke_width(), 0.0);
        paint.set_stroke_width(4.0);
        assert_eq!(paint.stroke_width(), 4.0);
    }
}
