//! Browser console logging and the panic hook.

use log::{Level, LevelFilter};
use std::sync::Once;

static INIT: Once = Once::new();

/// Unknown names fall back to `Info`.
pub(crate) fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Info)
}

/// Route `log` records and panics to the browser console. The backend is
/// installed once at `Trace`; every call, including the first, then sets the
/// effective level.
pub(crate) fn init_logging(level: LevelFilter) {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(Level::Trace).is_err() {
            log::warn!("a logger was already installed; keeping it");
        }
    });
    log::set_max_level(level);
}
