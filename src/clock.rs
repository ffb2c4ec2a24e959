//! Wall-clock-like time of day, kept independently of any real time source.

use core::fmt::{
    self,
    Write as _,
};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{
    Duration,
    Ticker,
};
use heapless::String;

use crate::{
    error::{
        Error,
        InvalidTime,
    },
    scheduler::StopSignal,
    shared::SharedUi,
    ui::{
        LabelId,
        UiRuntime,
    },
};

/// Length of the rendered `HH:MM:SS` string.
pub const TIME_TEXT_LEN: usize = 8;

pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// A time of day on a 24-hour dial, without date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self, Error> {
        if hour >= 24 {
            return Err(InvalidTime::Hour(hour).into());
        }
        if minute >= 60 {
            return Err(InvalidTime::Minute(minute).into());
        }
        if second >= 60 {
            return Err(InvalidTime::Second(second).into());
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    pub const fn hour(self) -> u8 {
        self.hour
    }

    pub const fn minute(self) -> u8 {
        self.minute
    }

    pub const fn second(self) -> u8 {
        self.second
    }

    pub const fn seconds_since_midnight(self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }

    /// One second later, carrying into minutes and hours and wrapping from
    /// 23:59:59 to 00:00:00.
    #[must_use]
    pub const fn succ(self) -> Self {
        let mut next = self;
        next.second += 1;
        if next.second == 60 {
            next.second = 0;
            next.minute += 1;
            if next.minute == 60 {
                next.minute = 0;
                next.hour += 1;
                if next.hour == 24 {
                    next.hour = 0;
                }
            }
        }
        next
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// The clock shown on screen.
///
/// Owned by the task that ticks it. Every mutation re-renders into the label,
/// so all methods take the UI runtime, which can only be reached through the
/// [`SharedUi`] lock.
pub struct ClockState {
    time: TimeOfDay,
    text: String<TIME_TEXT_LEN>,
    label: LabelId,
}

impl ClockState {
    /// A clock showing `time` in `label`. Call [`render`](Self::render) once
    /// the UI is reachable to put the initial text on screen.
    pub fn new(label: LabelId, time: TimeOfDay) -> Self {
        let mut clock = Self {
            time,
            text: String::new(),
            label,
        };
        clock.format();
        clock
    }

    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    /// The last rendered `HH:MM:SS`.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn label(&self) -> LabelId {
        self.label
    }

    /// Overwrite the time. Out-of-range parts are rejected and leave the clock
    /// untouched.
    pub fn set<U>(&mut self, ui: &mut U, hour: u8, minute: u8, second: u8) -> Result<(), Error>
    where
        U: UiRuntime + ?Sized,
    {
        self.time = TimeOfDay::new(hour, minute, second)?;
        self.render(ui)
    }

    /// Advance by one second.
    pub fn tick<U>(&mut self, ui: &mut U) -> Result<(), Error>
    where
        U: UiRuntime + ?Sized,
    {
        self.time = self.time.succ();
        self.render(ui)
    }

    /// Push the current time into the label.
    pub fn render<U>(&mut self, ui: &mut U) -> Result<(), Error>
    where
        U: UiRuntime + ?Sized,
    {
        self.format();
        ui.set_label_text(self.label, &self.text)
    }

    fn format(&mut self) {
        self.text.clear();
        // Always exactly TIME_TEXT_LEN bytes.
        let _ = write!(self.text, "{}", self.time);
    }
}

/// Tick `clock` once per `period` until `stop` is signalled.
///
/// The stop signal is checked after each wait, before ticking.
pub async fn run_ticker<M, U>(
    ui: &SharedUi<M, U>,
    clock: &mut ClockState,
    period: Duration,
    stop: Option<&StopSignal>,
) -> Result<(), Error>
where
    M: RawMutex,
    U: UiRuntime,
{
    info!("Clock producer started at {}", clock.text());
    let mut ticker = Ticker::every(period);
    loop {
        ticker.next().await;
        if stop.is_some_and(|s| s.signaled()) {
            info!("Clock producer stopped at {}", clock.text());
            return Ok(());
        }
        ui.with(|ui| clock.tick(ui)).await?;
        trace!("Clock {}", clock.text());
    }
}
