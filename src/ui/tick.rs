//! Millisecond tick counter for the UI runtime.

use core::sync::atomic::{
    AtomicU32,
    Ordering,
};

use embassy_time::{
    Duration,
    Ticker,
};

/// Milliseconds elapsed as seen by the UI runtime.
///
/// Advanced from its own periodic task and read under the UI lock, so it is
/// a plain atomic rather than part of the locked state. Wraps after ~49 days;
/// readers only ever look at differences.
pub struct UiTicks {
    ms: AtomicU32,
}

impl UiTicks {
    pub const fn new() -> Self {
        Self {
            ms: AtomicU32::new(0),
        }
    }

    /// Advance the counter by `ms` milliseconds.
    pub fn inc(&self, ms: u32) {
        self.ms.fetch_add(ms, Ordering::Relaxed);
    }

    pub fn now(&self) -> u32 {
        self.ms.load(Ordering::Relaxed)
    }

    /// Milliseconds since `since`, tolerant of wraparound.
    pub fn elapsed(&self, since: u32) -> u32 {
        self.now().wrapping_sub(since)
    }
}

impl Default for UiTicks {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance `ticks` by `period_ms` every `period_ms`, forever.
pub async fn run_tick_source(ticks: &UiTicks, period_ms: u32) -> ! {
    debug!("UI tick source every {}ms", period_ms);
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(period_ms)));
    loop {
        ticker.next().await;
        ticks.inc(period_ms);
    }
}
