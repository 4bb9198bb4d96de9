//! Pointer and keyboard subscriptions in surface-local coordinates.
//!
//! Subscribing captures the surface's client offset once; `dispatch` then
//! routes host `InputEvent`s to every matching listener. Listeners may
//! subscribe further listeners from inside a callback.

use crate::error::{BrushError, Result};
use crate::input::{BoundingRect, InputEvent, PointerTarget};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type PointerFn = Box<dyn FnMut(f64, f64)>;
type KeyFn = Box<dyn FnMut(&str)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerPhase {
    Down,
    Move,
    Up,
    /// Moves between a down and the next up.
    Drag,
}

struct PointerListener {
    phase: PointerPhase,
    origin: BoundingRect,
    dragging: Cell<bool>,
    callback: RefCell<PointerFn>,
}

impl PointerListener {
    fn call(&self, client_x: f64, client_y: f64) {
        let (x, y) = self.origin.to_local(client_x, client_y);
        let mut callback = self.callback.borrow_mut();
        callback(x, y);
    }
}

/// Event subscription helper held by the `Brush` facade.
#[derive(Default)]
pub struct EventHandler {
    pointer: RefCell<Vec<Rc<PointerListener>>>,
    keys: RefCell<Vec<Rc<RefCell<KeyFn>>>>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer-down positions.
    pub fn on_mouse_click(
        &self,
        target: Option<&dyn PointerTarget>,
        callback: impl FnMut(f64, f64) + 'static,
    ) -> Result<()> {
        self.subscribe(PointerPhase::Down, target, Box::new(callback))
    }

    pub fn on_mouse_move(
        &self,
        target: Option<&dyn PointerTarget>,
        callback: impl FnMut(f64, f64) + 'static,
    ) -> Result<()> {
        self.subscribe(PointerPhase::Move, target, Box::new(callback))
    }

    /// Pointer-up positions.
    pub fn on_mouse_release(
        &self,
        target: Option<&dyn PointerTarget>,
        callback: impl FnMut(f64, f64) + 'static,
    ) -> Result<()> {
        self.subscribe(PointerPhase::Up, target, Box::new(callback))
    }

    /// Move positions, only while the pointer is held down.
    pub fn on_mouse_click_and_move(
        &self,
        target: Option<&dyn PointerTarget>,
        callback: impl FnMut(f64, f64) + 'static,
    ) -> Result<()> {
        self.subscribe(PointerPhase::Drag, target, Box::new(callback))
    }

    /// Key-down `key` values. Needs no surface.
    pub fn on_key_press(&self, callback: impl FnMut(&str) + 'static) {
        self.keys
            .borrow_mut()
            .push(Rc::new(RefCell::new(Box::new(callback))));
    }

    pub fn listener_count(&self) -> usize {
        self.pointer.borrow().len() + self.keys.borrow().len()
    }

    /// Drop every pointer subscription. Their captured offsets belong to a
    /// surface that no longer receives input.
    pub fn clear_pointer(&self) {
        let dropped = self.pointer.take().len();
        log::debug!("dropped {dropped} pointer listeners");
    }

    /// Route one host event to the matching listeners.
    pub fn dispatch(&self, event: &InputEvent) {
        if let InputEvent::Key { key } = event {
            let listeners = self.keys.borrow().clone();
            for listener in listeners {
                let mut callback = listener.borrow_mut();
                callback(key);
            }
            return;
        }

        let listeners = self.pointer.borrow().clone();
        for listener in listeners {
            match (event, listener.phase) {
                (InputEvent::PointerDown { x, y }, PointerPhase::Down)
                | (InputEvent::PointerMove { x, y }, PointerPhase::Move)
                | (InputEvent::PointerUp { x, y }, PointerPhase::Up) => listener.call(*x, *y),
                (InputEvent::PointerDown { .. }, PointerPhase::Drag) => listener.dragging.set(true),
                (InputEvent::PointerMove { x, y }, PointerPhase::Drag) => {
                    if listener.dragging.get() {
                        listener.call(*x, *y);
                    }
                }
                (InputEvent::PointerUp { .. }, PointerPhase::Drag) => listener.dragging.set(false),
                _ => {}
            }
        }
    }

    fn subscribe(
        &self,
        phase: PointerPhase,
        target: Option<&dyn PointerTarget>,
        callback: PointerFn,
    ) -> Result<()> {
        let target = target.ok_or(BrushError::UninitializedSurface {
            operation: phase.operation(),
        })?;
        let origin = target
            .bounding_rect()
            .ok_or(BrushError::BoundingGeometryUnavailable)?;
        log::debug!("subscribe {} at offset ({}, {})", phase.operation(), origin.left, origin.top);
        self.pointer.borrow_mut().push(Rc::new(PointerListener {
            phase,
            origin,
            dragging: Cell::new(false),
            callback: RefCell::new(callback),
        }));
        Ok(())
    }
}

impl PointerPhase {
    fn operation(self) -> &'static str {
        match self {
            Self::Down => "on_mouse_click",
            Self::Move => "on_mouse_move",
            Self::Up => "on_mouse_release",
            Self::Drag => "on_mouse_click_and_move",
        }
    }
}
