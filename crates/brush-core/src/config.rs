//! Loop and canvas configuration.
//!
//! Both types deserialize from camelCase JSON so JS callers can pass an
//! options string straight through the wasm bridge.

use crate::error::{BrushError, Result};
use serde::Deserialize;

/// Frame loop parameters used by `Brush::start_with`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoopConfig {
    /// Target ticks per second.
    pub frame_rate: f64,
    /// Draw invocations per fired tick.
    pub updates_per_frame: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            updates_per_frame: 1,
        }
    }
}

impl LoopConfig {
    pub fn new(frame_rate: f64, updates_per_frame: u32) -> Self {
        Self {
            frame_rate,
            updates_per_frame,
        }
    }

    /// Reject rates that would make the tick interval meaningless.
    pub fn validate(&self) -> Result<()> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(BrushError::InvalidFrameRate(self.frame_rate));
        }
        if self.updates_per_frame == 0 {
            return Err(BrushError::InvalidUpdatesPerFrame(self.updates_per_frame));
        }
        Ok(())
    }

    /// Milliseconds between fired ticks.
    pub fn interval_ms(&self) -> f64 {
        1000.0 / self.frame_rate
    }
}

/// Where a freshly created canvas gets mounted.
///
/// `E` is the host's element handle; JSON input can only name a selector.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged, bound(deserialize = ""))]
pub enum Container<E> {
    Selector(String),
    #[serde(skip)]
    Element(E),
}

/// Options for `Brush::create_canvas`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, bound(deserialize = ""))]
pub struct CanvasOptions<E> {
    pub container: Option<Container<E>>,
    pub id: Option<String>,
    pub class_name: Option<String>,
}

impl<E> Default for CanvasOptions<E> {
    fn default() -> Self {
        Self {
            container: None,
            id: None,
            class_name: None,
        }
    }
}

impl<E> CanvasOptions<E> {
    /// Parse options from a JSON object string such as
    /// `{"container":"#app","id":"sketch","className":"wide"}`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BrushError::InvalidOptions(e.to_string()))
    }

    pub fn with_container(mut self, container: Container<E>) -> Self {
        self.container = Some(container);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}
