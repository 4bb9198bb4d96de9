//! Input abstraction layer.
//!
//! Hosts normalize raw mouse and keyboard notifications into `InputEvent`s
//! carrying client-space coordinates; `EventHandler` maps them onto the
//! surface.

/// A normalized input event from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down).
    PointerDown { x: f64, y: f64 },

    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },

    /// Key pressed; `key` is the `KeyboardEvent.key` value.
    Key { key: String },
}

impl InputEvent {
    pub fn from_pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn from_pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn from_pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn from_key(key: impl Into<String>) -> Self {
        Self::Key { key: key.into() }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PointerDown { x, y } | Self::PointerMove { x, y } | Self::PointerUp { x, y } => {
                Some((*x, *y))
            }
            Self::Key { .. } => None,
        }
    }
}

/// Placement of the surface in client space (`getBoundingClientRect`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Client coordinates → surface-local coordinates.
    pub fn to_local(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        (client_x - self.left, client_y - self.top)
    }
}

/// Something that can report where the surface sits on screen.
pub trait PointerTarget {
    /// `None` when the host cannot provide geometry.
    fn bounding_rect(&self) -> Option<BoundingRect>;
}
