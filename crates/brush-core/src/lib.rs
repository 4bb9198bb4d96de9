//! Brush core: a small drawing and animation layer over a 2D context.
//!
//! Host-independent. Browsers plug in through `brush-wasm`; tests and
//! headless tools use `HeadlessHost` with `ManualScheduler`.

pub mod brush;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod frame_loop;
pub mod host;
pub mod input;
pub mod paint;
pub mod record;
pub mod renderer;
pub mod scheduler;
pub mod surface;

pub use brush::{Brush, SketchFn};
pub use config::{CanvasOptions, Container, LoopConfig};
pub use context::{RenderContext2d, TextAlign};
pub use error::{BrushError, Result};
pub use events::EventHandler;
pub use frame_loop::{FrameCallback, FrameHandle, FrameLoop, FrameScheduler};
pub use host::{HeadlessCanvas, HeadlessHost, HeadlessTarget, SurfaceHost};
pub use input::{BoundingRect, InputEvent, PointerTarget};
pub use paint::PaintState;
pub use record::{CommandLog, DrawCommand, RecordingContext};
pub use renderer::{Renderer, TextStyle};
pub use scheduler::ManualScheduler;
pub use surface::{Surface, SurfaceState};
