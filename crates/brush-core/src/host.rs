//! Surface hosts: where canvases come from.
//!
//! A host creates the drawable element, acquires its 2D context, and mounts
//! it. `HeadlessHost` does this in memory with `RecordingContext`s.

use crate::config::{CanvasOptions, Container};
use crate::context::RenderContext2d;
use crate::error::{BrushError, Result};
use crate::input::{BoundingRect, PointerTarget};
use crate::record::{CommandLog, RecordingContext};
use std::cell::RefCell;

/// Environment that can create a canvas and hand out its 2D context.
pub trait SurfaceHost {
    type Context: RenderContext2d + 'static;
    /// Element handle accepted as a mount container.
    type Element;
    /// Handle used to query the mounted surface's placement.
    type Target: PointerTarget + Clone;

    /// Create a `width`×`height` surface, apply `id`/`class_name`, acquire
    /// the context, then mount into `container` if one is given.
    ///
    /// Fails with `ContextUnavailable` or `ContainerNotFound`.
    fn create_surface(
        &self,
        width: u32,
        height: u32,
        options: &CanvasOptions<Self::Element>,
    ) -> Result<(Self::Context, Self::Target)>;
}

// ─── Headless host ───────────────────────────────────────────────────────

/// What a `HeadlessHost` created, for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessCanvas {
    pub width: u32,
    pub height: u32,
    pub id: Option<String>,
    pub class_name: Option<String>,
    /// Selector or element name the canvas was mounted into.
    pub mounted_in: Option<String>,
}

/// Placement handle for a headless canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessTarget {
    pub bounds: Option<BoundingRect>,
}

impl PointerTarget for HeadlessTarget {
    fn bounding_rect(&self) -> Option<BoundingRect> {
        self.bounds
    }
}

/// In-memory host. Containers are plain names; selectors must be
/// registered with `with_container` to resolve.
pub struct HeadlessHost {
    containers: Vec<String>,
    bounds: Option<BoundingRect>,
    context_available: bool,
    canvases: RefCell<Vec<HeadlessCanvas>>,
    last_log: RefCell<Option<CommandLog>>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessHost {
    /// A host whose canvases sit at the client origin.
    pub fn new() -> Self {
        Self {
            containers: Vec::new(),
            bounds: Some(BoundingRect::default()),
            context_available: true,
            canvases: RefCell::new(Vec::new()),
            last_log: RefCell::new(None),
        }
    }

    pub fn with_container(mut self, selector: impl Into<String>) -> Self {
        self.containers.push(selector.into());
        self
    }

    /// Client offset reported for created canvases; `None` simulates a host
    /// that cannot report geometry.
    pub fn with_bounds(mut self, bounds: Option<BoundingRect>) -> Self {
        self.bounds = bounds;
        self
    }

    /// Simulate a host that refuses to hand out a 2D context.
    pub fn without_context(mut self) -> Self {
        self.context_available = false;
        self
    }

    pub fn canvases(&self) -> Vec<HeadlessCanvas> {
        self.canvases.borrow().clone()
    }

    /// Recording of the most recently created canvas.
    pub fn last_log(&self) -> Option<CommandLog> {
        self.last_log.borrow().clone()
    }
}

impl SurfaceHost for HeadlessHost {
    type Context = RecordingContext;
    type Element = String;
    type Target = HeadlessTarget;

    fn create_surface(
        &self,
        width: u32,
        height: u32,
        options: &CanvasOptions<String>,
    ) -> Result<(RecordingContext, HeadlessTarget)> {
        if !self.context_available {
            return Err(BrushError::ContextUnavailable);
        }
        let ctx = RecordingContext::new();

        let mounted_in = match &options.container {
            None => None,
            Some(Container::Element(name)) => Some(name.clone()),
            Some(Container::Selector(selector)) => {
                if !self.containers.iter().any(|c| c == selector) {
                    return Err(BrushError::ContainerNotFound(selector.clone()));
                }
                Some(selector.clone())
            }
        };

        self.canvases.borrow_mut().push(HeadlessCanvas {
            width,
            height,
            id: options.id.clone(),
            class_name: options.class_name.clone(),
            mounted_in,
        });
        *self.last_log.borrow_mut() = Some(ctx.log());
        let bounds = self.bounds.map(|b| BoundingRect {
            width: f64::from(width),
            height: f64::from(height),
            ..b
        });
        Ok((ctx, HeadlessTarget { bounds }))
    }
}
