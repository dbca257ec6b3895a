//! Process-wide shutdown coordination.
//! A flag set by the ctrlc handler so `--hold` can stop waiting and let the
//! held scratch files tear down normally.
//!
//! Notes:
//! - Relaxed atomics are sufficient for a one-way "stop" flag.
//! - `request()` is safe to call from signal handlers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a cooperative shutdown (idempotent).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

/// Check whether a shutdown has been requested.
#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Block until `request()` is called, polling every `tick`.
pub fn wait(tick: Duration) {
    while !is_requested() {
        thread::sleep(tick);
    }
}
