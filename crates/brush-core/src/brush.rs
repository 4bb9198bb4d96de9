//! The `Brush` facade.
//!
//! Owns the host, the guarded surface, the event helper, and at most one
//! frame loop. Lifecycle: `create_canvas`, assign `setup`/`draw`, `start`.
//! `setup` runs once per `start`; `draw` runs `updates_per_frame` times per
//! tick until `stop`.
//!
//! Every method takes `&self`, and no internal borrow is held while a user
//! callback runs, so `setup` and `draw` may call back into the facade
//! through a shared handle.

use crate::config::{CanvasOptions, LoopConfig};
use crate::error::{BrushError, Result};
use crate::events::EventHandler;
use crate::frame_loop::{FrameLoop, FrameScheduler};
use crate::host::SurfaceHost;
use crate::input::{InputEvent, PointerTarget};
use crate::renderer::{Renderer, TextStyle};
use crate::surface::Surface;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// A setup or draw callback. Capture a `Surface` handle to draw from it.
pub type SketchFn = Box<dyn FnMut() -> Result<()>>;

/// Holds one callback. The generation changes on every assignment, so a
/// callback taken out to run can tell whether it was replaced or cleared
/// meanwhile.
#[derive(Default)]
struct CallbackSlot {
    callback: Option<SketchFn>,
    generation: u64,
}

impl CallbackSlot {
    fn assign(&mut self, callback: Option<SketchFn>) {
        self.callback = callback;
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Run the callback in `slot` once, with the slot unborrowed while it runs.
/// It goes back only if nothing was assigned in the meantime.
fn run_slot(slot: &RefCell<CallbackSlot>, missing: BrushError) -> Result<()> {
    let (mut callback, generation) = {
        let mut slot = slot.borrow_mut();
        let callback = slot.callback.take().ok_or(missing)?;
        (callback, slot.generation)
    };
    let result = callback();
    let mut slot = slot.borrow_mut();
    if slot.generation == generation {
        slot.callback = Some(callback);
    }
    result
}

pub struct Brush<H: SurfaceHost, S: FrameScheduler + 'static> {
    host: H,
    scheduler: Rc<S>,
    surface: Surface<H::Context>,
    target: RefCell<Option<H::Target>>,
    events: Rc<EventHandler>,
    setup: RefCell<CallbackSlot>,
    draw: Rc<RefCell<CallbackSlot>>,
    frame_loop: RefCell<Option<FrameLoop<S>>>,
}

impl<H: SurfaceHost, S: FrameScheduler + 'static> Brush<H, S> {
    pub fn new(host: H, scheduler: Rc<S>) -> Self {
        Self {
            host,
            scheduler,
            surface: Surface::new(),
            target: RefCell::new(None),
            events: Rc::new(EventHandler::new()),
            setup: RefCell::new(CallbackSlot::default()),
            draw: Rc::new(RefCell::new(CallbackSlot::default())),
            frame_loop: RefCell::new(None),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Shared drawing handle; valid before and after `create_canvas`.
    pub fn surface(&self) -> Surface<H::Context> {
        self.surface.clone()
    }

    /// Shared event helper, for hosts that feed it raw input.
    pub fn events(&self) -> Rc<EventHandler> {
        Rc::clone(&self.events)
    }

    pub fn target(&self) -> Option<H::Target> {
        self.target.borrow().clone()
    }

    pub fn width(&self) -> Option<u32> {
        self.surface.size().map(|(w, _)| w)
    }

    pub fn height(&self) -> Option<u32> {
        self.surface.size().map(|(_, h)| h)
    }

    /// Create and mount a `width`×`height` canvas, replacing any previous
    /// one. Returns the host's handle to the new canvas.
    ///
    /// Pointer subscriptions belong to the canvas they were made against and
    /// are dropped with it; key subscriptions stay.
    pub fn create_canvas(
        &self,
        width: u32,
        height: u32,
        options: &CanvasOptions<H::Element>,
    ) -> Result<H::Target> {
        let (ctx, target) = self.host.create_surface(width, height, options)?;
        log::debug!("canvas created {width}x{height}");
        self.surface.install(Renderer::new(ctx, width, height));
        if self.target.replace(Some(target.clone())).is_some() {
            self.events.clear_pointer();
        }
        Ok(target)
    }

    // ─── Drawing (guarded) ───────────────────────────────────────────────

    pub fn background(&self, color: &str) -> Result<()> {
        self.surface.background(color)
    }

    pub fn rect(&self, x: f64, y: f64, w: f64, h: f64, apply_stroke: bool) -> Result<()> {
        self.surface.rect(x, y, w, h, apply_stroke)
    }

    pub fn square(&self, x: f64, y: f64, size: f64, apply_stroke: bool) -> Result<()> {
        self.surface.square(x, y, size, apply_stroke)
    }

    pub fn ellipse(&self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        self.surface.ellipse(x, y, w, h)
    }

    pub fn circle(&self, x: f64, y: f64, r: f64) -> Result<()> {
        self.surface.circle(x, y, r)
    }

    pub fn line(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        self.surface.line(x1, y1, x2, y2)
    }

    pub fn text(&self, content: &str, x: f64, y: f64) -> Result<()> {
        self.surface.text(content, x, y)
    }

    pub fn text_styled(&self, content: &str, x: f64, y: f64, style: &TextStyle) -> Result<()> {
        self.surface.text_styled(content, x, y, style)
    }

    pub fn fill(&self, color: &str) -> Result<()> {
        self.surface.fill(color)
    }

    pub fn stroke_color(&self, color: &str) -> Result<()> {
        self.surface.stroke_color(color)
    }

    pub fn stroke_weight(&self, weight: f64) -> Result<()> {
        self.surface.stroke_weight(weight)
    }

    // ─── Callbacks ───────────────────────────────────────────────────────

    pub fn set_setup(&self, setup: impl FnMut() -> Result<()> + 'static) {
        self.setup.borrow_mut().assign(Some(Box::new(setup)));
    }

    pub fn clear_setup(&self) {
        self.setup.borrow_mut().assign(None);
    }

    pub fn has_setup(&self) -> bool {
        self.setup.borrow().callback.is_some()
    }

    /// Takes effect on the next tick, including for a running loop and when
    /// called from inside `draw`.
    pub fn set_draw(&self, draw: impl FnMut() -> Result<()> + 'static) {
        self.draw.borrow_mut().assign(Some(Box::new(draw)));
    }

    /// The next tick fails with `DrawMissing` unless a new draw is set.
    pub fn clear_draw(&self) {
        self.draw.borrow_mut().assign(None);
    }

    pub fn has_draw(&self) -> bool {
        self.draw.borrow().callback.is_some()
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// `start_with` at 60 fps, one update per frame.
    pub fn start(&self) -> Result<()> {
        self.start_with(LoopConfig::default())
    }

    /// Run `setup` once, then loop `draw`.
    ///
    /// Fails with `SetupMissing` before anything else happens. A missing
    /// `draw` is not an error here; it surfaces as `DrawMissing` on the
    /// first tick. Any running loop is stopped first.
    pub fn start_with(&self, config: LoopConfig) -> Result<()> {
        if !self.has_setup() {
            return Err(BrushError::SetupMissing);
        }
        if !self.surface.is_ready() {
            return Err(BrushError::UninitializedSurface { operation: "start" });
        }
        config.validate()?;

        self.stop();
        run_slot(&self.setup, BrushError::SetupMissing)?;

        let draw = Rc::clone(&self.draw);
        let mut frame_loop = FrameLoop::with_config(
            Rc::clone(&self.scheduler),
            move || run_slot(&draw, BrushError::DrawMissing),
            config,
        )?;
        frame_loop.start()?;
        // Replacing a loop started from inside `setup` drops, and so stops, it.
        self.frame_loop.replace(Some(frame_loop));
        Ok(())
    }

    /// Stop the active loop, if any. The loop stays inspectable.
    pub fn stop(&self) {
        if let Some(frame_loop) = self.frame_loop.borrow_mut().as_mut() {
            frame_loop.stop();
        }
    }

    pub fn is_looping(&self) -> bool {
        self.frame_loop
            .borrow()
            .as_ref()
            .is_some_and(FrameLoop::is_running)
    }

    /// The loop built by the last `start`.
    pub fn frame_loop(&self) -> Option<Ref<'_, FrameLoop<S>>> {
        Ref::filter_map(self.frame_loop.borrow(), Option::as_ref).ok()
    }

    // ─── Events ──────────────────────────────────────────────────────────

    pub fn on_mouse_click(&self, callback: impl FnMut(f64, f64) + 'static) -> Result<()> {
        self.events
            .on_mouse_click(self.pointer_target().as_ref().map(as_target), callback)
    }

    pub fn on_mouse_move(&self, callback: impl FnMut(f64, f64) + 'static) -> Result<()> {
        self.events
            .on_mouse_move(self.pointer_target().as_ref().map(as_target), callback)
    }

    pub fn on_mouse_release(&self, callback: impl FnMut(f64, f64) + 'static) -> Result<()> {
        self.events
            .on_mouse_release(self.pointer_target().as_ref().map(as_target), callback)
    }

    pub fn on_mouse_click_and_move(
        &self,
        callback: impl FnMut(f64, f64) + 'static,
    ) -> Result<()> {
        self.events
            .on_mouse_click_and_move(self.pointer_target().as_ref().map(as_target), callback)
    }

    pub fn on_key_press(&self, callback: impl FnMut(&str) + 'static) {
        self.events.on_key_press(callback);
    }

    pub fn dispatch(&self, event: &InputEvent) {
        self.events.dispatch(event);
    }

    /// Cloned so no borrow is held while the subscription is registered.
    fn pointer_target(&self) -> Option<H::Target> {
        self.target.borrow().clone()
    }
}

fn as_target<T: PointerTarget>(target: &T) -> &dyn PointerTarget {
    target
}
