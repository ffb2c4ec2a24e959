//! A small retained-mode UI runtime on top of `embedded-graphics`.
//!
//! The runtime is not safe to drive from two tasks at once. Wrap it in a
//! [`SharedUi`](crate::shared::SharedUi) and only touch it through the lock.

mod flush;
mod gesture;
mod input;
mod screen;
mod tick;

pub use flush::FlushReady;
pub use gesture::GestureRecognizer;
pub use input::{
    Direction,
    InputDevice,
    InputSample,
    NoInput,
};
pub use screen::{
    Align,
    GestureHandler,
    LABEL_CAPACITY,
    LabelId,
    MAX_LABELS,
    Screen,
};
pub use tick::{
    UiTicks,
    run_tick_source,
};

use crate::error::Error;

/// Returned by [`UiRuntime::process_pending`] when nothing is scheduled.
pub const NO_TIMER_READY: u32 = u32::MAX;

/// The operations the render scheduler and the clock need from a UI runtime.
pub trait UiRuntime {
    /// Run timers, poll input and redraw whatever changed.
    ///
    /// Returns how many milliseconds may pass before this should be called
    /// again.
    fn process_pending(&mut self) -> Result<u32, Error>;

    /// Replace the text of a label. The change is drawn on the next
    /// [`process_pending`](Self::process_pending).
    fn set_label_text(&mut self, label: LabelId, text: &str) -> Result<(), Error>;
}

