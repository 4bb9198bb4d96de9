//! Deterministic frame scheduler for headless runs and tests.
//!
//! Simulates a display that refreshes every `period` milliseconds. Frame
//! `n` (1-based) is delivered at timestamp `n * period`, so the first frame
//! after start arrives one period in, like a browser's first
//! `requestAnimationFrame` callback.

use crate::error::{BrushError, Result};
use crate::frame_loop::{FrameCallback, FrameHandle, FrameScheduler};
use std::cell::{Cell, RefCell};

/// Display refresh period used by `ManualScheduler::new`.
pub const DEFAULT_FRAME_PERIOD_MS: f64 = 1000.0 / 60.0;

/// Absorbs float drift when `advance_by` steps land exactly on a frame.
const TIME_EPSILON_MS: f64 = 1e-9;

pub struct ManualScheduler {
    period: f64,
    now: Cell<f64>,
    frames_delivered: Cell<u64>,
    next_id: Cell<i32>,
    queue: RefCell<Vec<(FrameHandle, FrameCallback)>>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::from_period(DEFAULT_FRAME_PERIOD_MS)
    }

    /// A display refreshing every `period` ms. Fails unless `period` is
    /// finite and positive.
    pub fn with_period(period: f64) -> Result<Self> {
        if !period.is_finite() || period <= 0.0 {
            return Err(BrushError::InvalidFramePeriod(period));
        }
        Ok(Self::from_period(period))
    }

    fn from_period(period: f64) -> Self {
        Self {
            period,
            now: Cell::new(0.0),
            frames_delivered: Cell::new(0),
            next_id: Cell::new(1),
            queue: RefCell::new(Vec::new()),
        }
    }

    /// Current simulated time in ms.
    pub fn now(&self) -> f64 {
        self.now.get()
    }

    /// Number of outstanding frame requests.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Advance the clock by `ms`, delivering every frame that falls due.
    ///
    /// Callbacks requested while a frame is being delivered wait for the next
    /// frame. If a callback fails, the remaining callbacks of that frame still
    /// run, the clock stops at that frame, and the first error is returned.
    pub fn advance_by(&self, ms: f64) -> Result<()> {
        let target = self.now.get() + ms;
        loop {
            let frame_at = self.next_frame_at();
            if frame_at > target + TIME_EPSILON_MS {
                break;
            }
            self.now.set(frame_at);
            self.deliver(frame_at)?;
        }
        self.now.set(target);
        Ok(())
    }

    /// Jump straight to the next frame and deliver it.
    pub fn step(&self) -> Result<()> {
        let frame_at = self.next_frame_at();
        self.now.set(frame_at);
        self.deliver(frame_at)
    }

    fn next_frame_at(&self) -> f64 {
        (self.frames_delivered.get() + 1) as f64 * self.period
    }

    fn deliver(&self, timestamp: f64) -> Result<()> {
        self.frames_delivered.set(self.frames_delivered.get() + 1);
        let due = std::mem::take(&mut *self.queue.borrow_mut());
        let mut first_error = None;
        for (_, callback) in due {
            if let Err(e) = callback(timestamp) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle> {
        let handle = FrameHandle(self.next_id.get());
        self.next_id.set(self.next_id.get().wrapping_add(1));
        self.queue.borrow_mut().push((handle, callback));
        Ok(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.queue.borrow_mut().retain(|(h, _)| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn delivers_frames_at_period_multiples() {
        let scheduler = ManualScheduler::with_period(10.0).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for _ in 0..2 {
            let seen = Rc::clone(&seen);
            scheduler
                .request_frame(Box::new(move |t| {
                    seen.borrow_mut().push(t);
                    Ok(())
                }))
                .unwrap();
        }
        scheduler.advance_by(5.0).unwrap();
        assert!(seen.borrow().is_empty());
        scheduler.advance_by(5.0).unwrap();
        assert_eq!(*seen.borrow(), vec![10.0, 10.0]);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.now(), 10.0);
    }

    #[test]
    fn cancelled_requests_never_fire() {
        let scheduler = ManualScheduler::with_period(10.0).unwrap();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let handle = scheduler
            .request_frame(Box::new(move |_| {
                flag.set(true);
                Ok(())
            }))
            .unwrap();
        scheduler.cancel_frame(handle);
        scheduler.cancel_frame(handle);
        scheduler.step().unwrap();
        assert!(!fired.get());
    }

    #[test]
    fn failing_callback_stops_the_clock_at_its_frame() {
        let scheduler = ManualScheduler::with_period(10.0).unwrap();
        scheduler
            .request_frame(Box::new(|_| Err(BrushError::DrawMissing)))
            .unwrap();
        let err = scheduler.advance_by(50.0).unwrap_err();
        assert_eq!(err, BrushError::DrawMissing);
        assert_eq!(scheduler.now(), 10.0);
    }

    #[test]
    fn rejects_periods_that_never_advance() {
        for period in [0.0, -16.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                ManualScheduler::with_period(period),
                Err(BrushError::InvalidFramePeriod(_))
            ));
        }
        let scheduler = ManualScheduler::with_period(0.5).unwrap();
        scheduler.advance_by(1.0).unwrap();
        assert_eq!(scheduler.now(), 1.0);
    }
}
