//! Rate gate serializing opportunistic flush triggers.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Clock seam so the gate can be driven deterministically in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock monotonic time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Allows at most one acquisition per interval.
///
/// The window is measured from the previous successful acquisition; denied
/// attempts do not extend it. Startup, foreground, and network-restored
/// triggers all funnel through one gate, so bursts of triggers collapse into
/// a single flush pass.
pub struct FlushGate {
    clock: Arc<dyn Clock>,
    min_interval: Duration,
    last_acquired: Mutex<Option<Instant>>,
}

impl FlushGate {
    pub fn new(min_interval: Duration) -> Self {
        Self::with_clock(min_interval, Arc::new(SystemClock))
    }

    pub fn with_clock(min_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            min_interval,
            last_acquired: Mutex::new(None),
        }
    }

    /// Try to take the gate. Returns false while inside the debounce window.
    pub fn try_acquire(&self) -> bool {
        let now = self.clock.now();
        let mut last = self.last_acquired.lock().unwrap();
        match *last {
            Some(previous) if now.duration_since(previous) < self.min_interval => false,
            _ => {
                *last = Some(now);
                true
            }
        }
    }
}
