//! Browser surface host.
//!
//! Creates `<canvas>` elements in the page document, acquires their 2D
//! context, and mounts them into a container element or selector.

use crate::context::WebContext;
use crate::host_error;
use brush_core::{
    BoundingRect, BrushError, CanvasOptions, Container, PointerTarget, Result, SurfaceHost,
};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement};

pub struct WebHost {
    document: Document,
}

impl WebHost {
    pub fn new() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| BrushError::Host("no global `document`".into()))?;
        Ok(Self { document })
    }
}

/// A created canvas element.
#[derive(Clone)]
pub struct CanvasTarget(pub HtmlCanvasElement);

impl PointerTarget for CanvasTarget {
    /// Browsers always report a rect; a detached canvas sits at the origin
    /// with zero size.
    fn bounding_rect(&self) -> Option<BoundingRect> {
        let rect = self.0.get_bounding_client_rect();
        Some(BoundingRect::new(
            rect.left(),
            rect.top(),
            rect.width(),
            rect.height(),
        ))
    }
}

impl SurfaceHost for WebHost {
    type Context = WebContext;
    type Element = Element;
    type Target = CanvasTarget;

    fn create_surface(
        &self,
        width: u32,
        height: u32,
        options: &CanvasOptions<Element>,
    ) -> Result<(WebContext, CanvasTarget)> {
        let canvas: HtmlCanvasElement = self
            .document
            .create_element("canvas")
            .map_err(host_error)?
            .dyn_into()
            .map_err(|_| BrushError::Host("created element is not a canvas".into()))?;
        canvas.set_width(width);
        canvas.set_height(height);
        if let Some(id) = &options.id {
            canvas.set_id(id);
        }
        if let Some(class_name) = &options.class_name {
            canvas.set_class_name(class_name);
        }

        let ctx = canvas
            .get_context("2d")
            .map_err(host_error)?
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(BrushError::ContextUnavailable)?;

        match &options.container {
            None => {}
            Some(Container::Selector(selector)) => {
                // An invalid selector throws; treat it like a missing element.
                let parent = self
                    .document
                    .query_selector(selector)
                    .ok()
                    .flatten()
                    .ok_or_else(|| BrushError::ContainerNotFound(selector.clone()))?;
                parent.append_child(&canvas).map_err(host_error)?;
            }
            Some(Container::Element(parent)) => {
                parent.append_child(&canvas).map_err(host_error)?;
            }
        }

        log::debug!(
            "mounted canvas id={:?} class={:?}",
            options.id,
            options.class_name
        );
        Ok((WebContext(ctx), CanvasTarget(canvas)))
    }
}
