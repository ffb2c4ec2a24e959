//! Frame completion notification.

use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    signal::Signal,
};

/// Signalled by the screen each time a frame has been pushed to the panel,
/// carrying the frame number (starting at 1).
///
/// Waiters see the latest frame only; intermediate frames may be skipped.
pub type FlushReady = Signal<CriticalSectionRawMutex, u32>;
