//! WASM bridge for Brush: exposes the drawing facade to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The exported `Brush` class
//! owns a browser canvas, an animation-frame loop, and its DOM listeners.
//! Options cross the boundary as JSON strings; errors become JS exceptions.

mod context;
mod events;
mod host;
mod logging;
mod scheduler;

pub use context::WebContext;
pub use events::DomListener;
pub use host::{CanvasTarget, WebHost};
pub use scheduler::BrowserScheduler;

use brush_core::{
    Brush, BrushError, CanvasOptions, Container, LoopConfig, Surface, TextAlign, TextStyle,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlCanvasElement};

type WebBrush = Brush<WebHost, BrowserScheduler>;

/// The JS-facing drawing facade.
///
/// Every method takes `&self` and the core facade holds no borrow across a
/// callback, so `setup`/`draw` may call back into this object freely.
#[wasm_bindgen(js_name = Brush)]
pub struct JsBrush {
    surface: Surface<WebContext>,
    inner: WebBrush,
    canvas_listeners: RefCell<Vec<DomListener>>,
    _key_listener: DomListener,
}

#[wasm_bindgen(js_class = Brush)]
impl JsBrush {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<JsBrush, JsError> {
        logging::init_logging(log::LevelFilter::Info);

        let window = web_sys::window()
            .ok_or_else(|| js_error(BrushError::Host("no global `window`".into())))?;
        let brush = Brush::new(
            WebHost::new().map_err(js_error)?,
            Rc::new(BrowserScheduler::new().map_err(js_error)?),
        );
        let key_listener = events::attach_keys(&window, &brush.events()).map_err(js_error)?;

        Ok(Self {
            surface: brush.surface(),
            inner: brush,
            canvas_listeners: RefCell::new(Vec::new()),
            _key_listener: key_listener,
        })
    }

    // ─── Canvas ──────────────────────────────────────────────────────────

    /// Create a canvas. `options` is JSON:
    /// `{"container":"#app","id":"...","className":"..."}`.
    #[wasm_bindgen(js_name = createCanvas)]
    pub fn create_canvas(
        &self,
        width: u32,
        height: u32,
        options: Option<String>,
    ) -> Result<HtmlCanvasElement, JsError> {
        let options = parse_options(options.as_deref())?;
        self.mount(width, height, &options)
    }

    /// Create a canvas mounted into `container`; a `container` key in
    /// `options` is ignored.
    #[wasm_bindgen(js_name = createCanvasIn)]
    pub fn create_canvas_in(
        &self,
        width: u32,
        height: u32,
        container: Element,
        options: Option<String>,
    ) -> Result<HtmlCanvasElement, JsError> {
        let options =
            parse_options(options.as_deref())?.with_container(Container::Element(container));
        self.mount(width, height, &options)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> Option<u32> {
        self.surface.size().map(|(w, _)| w)
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> Option<u32> {
        self.surface.size().map(|(_, h)| h)
    }

    // ─── Drawing ─────────────────────────────────────────────────────────

    pub fn background(&self, color: &str) -> Result<(), JsError> {
        self.surface.background(color).map_err(js_error)
    }

    pub fn rect(
        &self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        apply_stroke: Option<bool>,
    ) -> Result<(), JsError> {
        self.surface
            .rect(x, y, w, h, apply_stroke.unwrap_or(false))
            .map_err(js_error)
    }

    pub fn square(
        &self,
        x: f64,
        y: f64,
        size: f64,
        apply_stroke: Option<bool>,
    ) -> Result<(), JsError> {
        self.surface
            .square(x, y, size, apply_stroke.unwrap_or(false))
            .map_err(js_error)
    }

    pub fn ellipse(&self, x: f64, y: f64, w: f64, h: f64) -> Result<(), JsError> {
        self.surface.ellipse(x, y, w, h).map_err(js_error)
    }

    pub fn circle(&self, x: f64, y: f64, r: f64) -> Result<(), JsError> {
        self.surface.circle(x, y, r).map_err(js_error)
    }

    pub fn line(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<(), JsError> {
        self.surface.line(x1, y1, x2, y2).map_err(js_error)
    }

    /// Defaults: `"Arial"`, `"left"`, `16`.
    pub fn text(
        &self,
        content: &str,
        x: f64,
        y: f64,
        font_family: Option<String>,
        align: Option<String>,
        font_size: Option<f64>,
    ) -> Result<(), JsError> {
        let style = text_style(font_family, align.as_deref(), font_size)?;
        self.surface
            .text_styled(content, x, y, &style)
            .map_err(js_error)
    }

    pub fn fill(&self, color: &str) -> Result<(), JsError> {
        self.surface.fill(color).map_err(js_error)
    }

    #[wasm_bindgen(js_name = strokeColor)]
    pub fn stroke_color(&self, color: &str) -> Result<(), JsError> {
        self.surface.stroke_color(color).map_err(js_error)
    }

    #[wasm_bindgen(js_name = strokeWeight)]
    pub fn stroke_weight(&self, weight: f64) -> Result<(), JsError> {
        self.surface.stroke_weight(weight).map_err(js_error)
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    #[wasm_bindgen(js_name = setSetup)]
    pub fn set_setup(&self, setup: js_sys::Function) -> Result<(), JsError> {
        self.inner.set_setup(move || call_js(&setup));
        Ok(())
    }

    #[wasm_bindgen(js_name = setDraw)]
    pub fn set_draw(&self, draw: js_sys::Function) -> Result<(), JsError> {
        self.inner.set_draw(move || call_js(&draw));
        Ok(())
    }

    /// Run `setup` once, then `draw` at `frameRate` (default 60),
    /// `updatesPerFrame` (default 1) times per tick.
    pub fn start(
        &self,
        frame_rate: Option<f64>,
        updates_per_frame: Option<u32>,
    ) -> Result<(), JsError> {
        let defaults = LoopConfig::default();
        let config = LoopConfig::new(
            frame_rate.unwrap_or(defaults.frame_rate),
            updates_per_frame.unwrap_or(defaults.updates_per_frame),
        );
        self.inner.start_with(config).map_err(js_error)
    }

    pub fn stop(&self) -> Result<(), JsError> {
        self.inner.stop();
        Ok(())
    }

    #[wasm_bindgen(getter, js_name = isLooping)]
    pub fn is_looping(&self) -> bool {
        self.inner.is_looping()
    }

    // ─── Events ──────────────────────────────────────────────────────────

    #[wasm_bindgen(js_name = onMouseClick)]
    pub fn on_mouse_click(&self, callback: js_sys::Function) -> Result<(), JsError> {
        self.inner
            .on_mouse_click(pointer_callback(callback))
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = onMouseMove)]
    pub fn on_mouse_move(&self, callback: js_sys::Function) -> Result<(), JsError> {
        self.inner
            .on_mouse_move(pointer_callback(callback))
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = onMouseRelease)]
    pub fn on_mouse_release(&self, callback: js_sys::Function) -> Result<(), JsError> {
        self.inner
            .on_mouse_release(pointer_callback(callback))
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = onMouseClickAndMove)]
    pub fn on_mouse_click_and_move(&self, callback: js_sys::Function) -> Result<(), JsError> {
        self.inner
            .on_mouse_click_and_move(pointer_callback(callback))
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = onKeyPress)]
    pub fn on_key_press(&self, callback: js_sys::Function) -> Result<(), JsError> {
        self.inner.on_key_press(move |key| {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(key)) {
                log::error!("key listener threw: {}", describe(&e));
            }
        });
        Ok(())
    }
}

impl JsBrush {
    fn mount(
        &self,
        width: u32,
        height: u32,
        options: &CanvasOptions<Element>,
    ) -> Result<HtmlCanvasElement, JsError> {
        let CanvasTarget(canvas) = self
            .inner
            .create_canvas(width, height, options)
            .map_err(js_error)?;
        let listeners = events::attach_pointer(&canvas, &self.inner.events()).map_err(js_error)?;
        // Dropping the old listeners detaches them from the previous canvas.
        *self.canvas_listeners.borrow_mut() = listeners;
        Ok(canvas)
    }
}

/// Set the console log level (`"error"` … `"trace"`, or `"off"`).
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) {
    logging::init_logging(logging::parse_level(level));
}

pub(crate) fn host_error(value: JsValue) -> BrushError {
    BrushError::Host(describe(&value))
}

fn js_error(err: BrushError) -> JsError {
    JsError::new(&err.to_string())
}

fn describe(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn call_js(function: &js_sys::Function) -> brush_core::Result<()> {
    function
        .call0(&JsValue::NULL)
        .map(|_| ())
        .map_err(|e| BrushError::Callback(describe(&e)))
}

fn pointer_callback(callback: js_sys::Function) -> impl FnMut(f64, f64) + 'static {
    move |x: f64, y: f64| {
        let (x, y) = (JsValue::from_f64(x), JsValue::from_f64(y));
        if let Err(e) = callback.call2(&JsValue::NULL, &x, &y) {
            log::error!("pointer listener threw: {}", describe(&e));
        }
    }
}

fn parse_options(json: Option<&str>) -> Result<CanvasOptions<Element>, JsError> {
    match json {
        Some(json) if !json.trim().is_empty() => CanvasOptions::from_json(json).map_err(js_error),
        _ => Ok(CanvasOptions::default()),
    }
}

fn text_style(
    font_family: Option<String>,
    align: Option<&str>,
    font_size: Option<f64>,
) -> Result<TextStyle, JsError> {
    let defaults = TextStyle::default();
    let align = match align {
        Some(align) => align
            .parse::<TextAlign>()
            .map_err(|e| js_error(BrushError::InvalidOptions(e)))?,
        None => defaults.align,
    };
    Ok(TextStyle {
        font_family: font_family.unwrap_or(defaults.font_family),
        align,
        font_size: font_size.unwrap_or(defaults.font_size),
    })
}
