//! DOM listeners feeding `EventHandler`.
//!
//! Each `DomListener` owns its JS closure and removes itself from the target
//! when dropped, so replacing a canvas detaches the old canvas's listeners.

use crate::host_error;
use brush_core::{EventHandler, InputEvent, Result};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, KeyboardEvent, MouseEvent};

pub struct DomListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl DomListener {
    pub fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(host_error)?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for DomListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

type PointerCtor = fn(f64, f64) -> InputEvent;

/// `mousedown`/`mousemove`/`mouseup` on the canvas, in client coordinates.
pub fn attach_pointer(canvas: &EventTarget, events: &Rc<EventHandler>) -> Result<Vec<DomListener>> {
    let routes: [(&'static str, PointerCtor); 3] = [
        ("mousedown", InputEvent::from_pointer_down),
        ("mousemove", InputEvent::from_pointer_move),
        ("mouseup", InputEvent::from_pointer_up),
    ];
    routes
        .into_iter()
        .map(|(name, to_input)| {
            let events = Rc::clone(events);
            DomListener::attach(canvas, name, move |event: Event| {
                if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                    let input = to_input(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
                    events.dispatch(&input);
                }
            })
        })
        .collect()
}

/// `keydown` on the window.
pub fn attach_keys(window: &EventTarget, events: &Rc<EventHandler>) -> Result<DomListener> {
    let events = Rc::clone(events);
    DomListener::attach(window, "keydown", move |event: Event| {
        if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
            events.dispatch(&InputEvent::from_key(key.key()));
        }
    })
}
