//! # lcd-clock
//!
//! Render loop, clock state and board support for an ESP32-S3 with an SPI
//! LCD panel.
//!
//! - **UI runtime** ([`ui`]): a retained-mode screen of labels drawn with
//!   `embedded-graphics`, with a tick counter and an input device.
//! - **Shared UI** ([`shared`]): the one lock every task takes before touching
//!   the UI runtime.
//! - **Render scheduler** ([`scheduler`]): pumps the UI runtime and sleeps for
//!   the clamped delay it asks for.
//! - **Clock** ([`clock`]): hours/minutes/seconds advanced once per second by
//!   a producer task and rendered into a label.
//! - **Touch** ([`touch`]): XPT2046 controller on any `embedded-hal` SPI
//!   device, feeding pointer samples into the UI runtime.
//! - **Board** (`board`, feature `board`): pin map, shared SPI bus, panel,
//!   backlight, touch and navigation buttons.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! static TICKS: UiTicks = UiTicks::new();
//! static FLUSHED: FlushReady = FlushReady::new();
//!
//! let mut screen = Screen::new(panel, background, &TICKS, &FLUSHED, config.ui);
//! let label = screen.add_label("", Rgb565::WHITE, Align::Center, Point::zero())?;
//! let shared = mk_static!(AppUi, SharedUi::new(screen, lock_timeout));
//!
//! spawner.must_spawn(render_task(RenderScheduler::new(shared, config.scheduler)));
//! spawner.must_spawn(clock_task(shared, ClockState::new(label, start)));
//! ```

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible in every module.
#[macro_use]
mod fmt;

#[cfg(feature = "board")]
pub mod board;
pub mod clock;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod shared;
pub mod touch;
pub mod ui;

pub use error::Error;

#[doc(hidden)]
pub use static_cell;

/// Allocate a value into a `static` exactly once, via `StaticCell`.
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: $crate::static_cell::StaticCell<$t> =
            $crate::static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}
