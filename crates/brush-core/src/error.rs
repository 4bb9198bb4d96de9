//! Error taxonomy for surface, loop, and event operations.
//!
//! Every condition is returned to the direct caller. Nothing here is retried
//! or logged-and-dropped; hosts decide how to report what reaches them.

use thiserror::Error;

/// Errors raised by the drawing facade and its collaborators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrushError {
    /// A draw or paint call arrived before `create_canvas`.
    #[error("Renderer not initialized: `{operation}` requires a canvas")]
    UninitializedSurface { operation: &'static str },

    /// The host could not hand out a 2D rendering context.
    #[error("Failed to get 2D context")]
    ContextUnavailable,

    /// A mount target could not be resolved.
    #[error("Container element not found: {0}")]
    ContainerNotFound(String),

    /// `start` was called with no setup callback assigned.
    #[error("Setup function not defined")]
    SetupMissing,

    /// A loop tick fired with no draw callback assigned.
    #[error("Draw function is not defined")]
    DrawMissing,

    /// The surface could not report its placement on the page.
    #[error("Canvas bounding rect is undefined")]
    BoundingGeometryUnavailable,

    #[error("Frame rate must be a positive number, got {0}")]
    InvalidFrameRate(f64),

    #[error("Updates per frame must be at least 1, got {0}")]
    InvalidUpdatesPerFrame(u32),

    /// A simulated display period that would never advance the clock.
    #[error("Frame period must be a positive number of milliseconds, got {0}")]
    InvalidFramePeriod(f64),

    /// Options JSON could not be parsed.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// A host API call failed (element creation, frame request, listeners).
    #[error("Host call failed: {0}")]
    Host(String),

    /// A user callback failed outside Rust (e.g. a thrown JS exception).
    #[error("Callback failed: {0}")]
    Callback(String),
}

/// Result type for brush operations.
pub type Result<T> = std::result::Result<T, BrushError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_condition() {
        let err = BrushError::UninitializedSurface { operation: "rect" };
        assert_eq!(
            err.to_string(),
            "Renderer not initialized: `rect` requires a canvas"
        );
        assert_eq!(BrushError::SetupMissing.to_string(), "Setup function not defined");
        assert_eq!(
            BrushError::ContainerNotFound("#app".into()).to_string(),
            "Container element not found: #app"
        );
    }
}
