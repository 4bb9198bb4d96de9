//! Fixed-rate frame loop driven by the host's animation-frame primitive.
//!
//! Every animation frame is checked against the target interval. When at
//! least one interval has passed since the last fired tick, the callback runs
//! exactly `updates_per_frame` times and the tick timestamp is recorded.
//! Missed intervals are not caught up.

use crate::config::LoopConfig;
use crate::error::Result;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// One-shot frame callback receiving the host's monotonic timestamp in ms.
pub type FrameCallback = Box<dyn FnOnce(f64) -> Result<()>>;

/// Identifies a pending frame request so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// The host's "call me on the next frame" primitive.
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle>;

    /// Cancelling an already-fired or unknown handle is a no-op.
    fn cancel_frame(&self, handle: FrameHandle);
}

type TickFn = Box<dyn FnMut() -> Result<()>>;

/// Drives a callback at roughly `frame_rate` ticks per second.
///
/// Dropping the loop stops its session.
pub struct FrameLoop<S: FrameScheduler + 'static> {
    scheduler: Rc<S>,
    callback: Rc<RefCell<TickFn>>,
    config: LoopConfig,
    session: Option<Rc<Session<S>>>,
}

impl<S: FrameScheduler + 'static> FrameLoop<S> {
    /// Build a stopped loop. Fails on a non-positive frame rate or zero
    /// updates per frame.
    pub fn new(
        scheduler: Rc<S>,
        callback: impl FnMut() -> Result<()> + 'static,
        frame_rate: f64,
        updates_per_frame: u32,
    ) -> Result<Self> {
        Self::with_config(
            scheduler,
            callback,
            LoopConfig::new(frame_rate, updates_per_frame),
        )
    }

    pub fn with_config(
        scheduler: Rc<S>,
        callback: impl FnMut() -> Result<()> + 'static,
        config: LoopConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            scheduler,
            callback: Rc::new(RefCell::new(Box::new(callback))),
            config,
            session: None,
        })
    }

    pub fn frame_rate(&self) -> f64 {
        self.config.frame_rate
    }

    pub fn updates_per_frame(&self) -> u32 {
        self.config.updates_per_frame
    }

    pub fn target_interval_ms(&self) -> f64 {
        self.config.interval_ms()
    }

    /// `false` before `start`, after `stop`, and after a failed tick.
    pub fn is_running(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.running.get())
    }

    /// Begin a fresh session with `last_fired_at = 0`.
    ///
    /// A session that is still running is stopped first.
    pub fn start(&mut self) -> Result<()> {
        if self.is_running() {
            log::warn!("frame loop restarted while running; stopping previous session");
        }
        self.stop();

        let session = Rc::new(Session {
            scheduler: Rc::clone(&self.scheduler),
            callback: Rc::clone(&self.callback),
            interval_ms: self.config.interval_ms(),
            updates_per_frame: self.config.updates_per_frame,
            last_fired_at: Cell::new(0.0),
            pending: Cell::new(None),
            running: Cell::new(true),
        });
        log::debug!(
            "frame loop start: {} fps, {} updates/frame",
            self.config.frame_rate,
            self.config.updates_per_frame
        );
        let scheduled = session.schedule();
        if scheduled.is_err() {
            session.running.set(false);
        }
        self.session = Some(session);
        scheduled
    }

    /// Cancel the pending frame request. No-op when nothing is pending.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            if session.running.get() {
                log::debug!("frame loop stop");
            }
            session.halt();
        }
    }
}

impl<S: FrameScheduler + 'static> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

struct Session<S: FrameScheduler> {
    scheduler: Rc<S>,
    callback: Rc<RefCell<TickFn>>,
    interval_ms: f64,
    updates_per_frame: u32,
    last_fired_at: Cell<f64>,
    pending: Cell<Option<FrameHandle>>,
    running: Cell<bool>,
}

impl<S: FrameScheduler + 'static> Session<S> {
    fn schedule(self: &Rc<Self>) -> Result<()> {
        let session = Rc::clone(self);
        let handle = self
            .scheduler
            .request_frame(Box::new(move |timestamp| session.on_frame(timestamp)))?;
        self.pending.set(Some(handle));
        Ok(())
    }

    fn on_frame(self: &Rc<Self>, timestamp: f64) -> Result<()> {
        self.pending.set(None);
        if !self.running.get() {
            return Ok(());
        }

        if timestamp - self.last_fired_at.get() >= self.interval_ms {
            let mut callback = self.callback.borrow_mut();
            for _ in 0..self.updates_per_frame {
                if let Err(e) = callback() {
                    self.running.set(false);
                    return Err(e);
                }
            }
            self.last_fired_at.set(timestamp);
        }

        // The callback may have stopped the loop.
        if self.running.get() {
            if let Err(e) = self.schedule() {
                self.running.set(false);
                return Err(e);
            }
        }
        Ok(())
    }

    fn halt(&self) {
        self.running.set(false);
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}
