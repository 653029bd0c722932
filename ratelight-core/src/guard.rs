//! Single-flight render guard
//!
//! At most one render cycle (or mode confirmation flash) may be inside its
//! guarded region at any instant. Concurrent requests are refused, never
//! queued and never awaited.

use core::sync::atomic::{AtomicBool, Ordering};

/// Render state flag: idle or busy
#[derive(Debug, Default)]
pub struct RenderGuard {
    busy: AtomicBool,
}

impl RenderGuard {
    /// Create an idle guard
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Try to enter the guarded region
    ///
    /// Returns a permit if the guard was idle. The guard goes back to idle
    /// when the permit is dropped or [`RenderGuard::exit`] is called. A
    /// refusal means the caller must drop its triggering event.
    pub fn try_enter(&self) -> Option<RenderPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| RenderPermit { guard: self })
    }

    /// Reset to idle unconditionally
    pub fn exit(&self) {
        self.busy.store(false, Ordering::Release);
    }

    /// Check if a cycle is in progress
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof of admission to the guarded region
///
/// Releases the guard on drop, so both the success and the failure path of a
/// cycle leave the guard idle.
#[derive(Debug)]
#[must_use = "the guard is released as soon as the permit is dropped"]
pub struct RenderPermit<'a> {
    guard: &'a RenderGuard,
}

impl RenderPermit<'_> {
    /// Release the guard explicitly
    pub fn exit(self) {}
}

impl Drop for RenderPermit<'_> {
    fn drop(&mut self) {
        self.guard.exit();
    }
}
