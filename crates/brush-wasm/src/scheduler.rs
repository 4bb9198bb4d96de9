//! `requestAnimationFrame`-backed frame scheduler.

use crate::host_error;
use brush_core::{BrushError, FrameCallback, FrameHandle, FrameScheduler, Result};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub struct BrowserScheduler {
    window: web_sys::Window,
}

impl BrowserScheduler {
    pub fn new() -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| BrushError::Host("no global `window`".into()))?;
        Ok(Self { window })
    }
}

impl FrameScheduler for BrowserScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle> {
        // A failed tick is rethrown into the browser so it shows up as an
        // uncaught error, after the loop has already halted.
        let closure = Closure::once_into_js(
            move |timestamp: f64| -> std::result::Result<(), JsValue> {
                callback(timestamp).map_err(|e| {
                    log::error!("frame callback failed: {e}");
                    JsValue::from_str(&e.to_string())
                })
            },
        );
        let id = self
            .window
            .request_animation_frame(closure.unchecked_ref())
            .map_err(host_error)?;
        Ok(FrameHandle(id))
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }
}
