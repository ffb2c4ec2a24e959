//! The render loop.
//!
//! Gives the UI runtime a chance to run timers, poll input and redraw, then
//! sleeps for as long as the runtime asked, clamped into
//! `[min_delay_ms, max_delay_ms]`. The lower bound keeps the loop from
//! starving other tasks when the runtime asks for no delay at all; the upper
//! bound makes sure state changed by other tasks is picked up within
//! `max_delay_ms` even when the runtime reports nothing pending.

use embassy_sync::{
    blocking_mutex::raw::{
        CriticalSectionRawMutex,
        RawMutex,
    },
    signal::Signal,
};
use embassy_time::Timer;

pub use crate::config::SchedulerConfig;
use crate::{
    error::Error,
    shared::SharedUi,
    ui::UiRuntime,
};

/// Cooperative stop request, checked once per loop iteration.
pub type StopSignal = Signal<CriticalSectionRawMutex, ()>;

/// Clamp a recommended delay into `[MIN_DELAY_MS, MAX_DELAY_MS]`.
pub fn clamp_delay(recommended_ms: i64) -> u32 {
    SchedulerConfig::default().clamp(recommended_ms)
}

impl SchedulerConfig {
    /// `max(min_delay_ms, min(max_delay_ms, recommended_ms))`.
    pub fn clamp(&self, recommended_ms: i64) -> u32 {
        let clamped = recommended_ms
            .min(i64::from(self.max_delay_ms()))
            .max(i64::from(self.min_delay_ms()));
        // In range of u32 because both bounds are.
        clamped as u32
    }
}

/// Drives a [`SharedUi`] forever (or until stopped).
pub struct RenderScheduler<'a, M: RawMutex, U> {
    ui: &'a SharedUi<M, U>,
    config: SchedulerConfig,
    stop: Option<&'a StopSignal>,
}

impl<'a, M, U> RenderScheduler<'a, M, U>
where
    M: RawMutex,
    U: UiRuntime,
{
    pub fn new(ui: &'a SharedUi<M, U>, config: SchedulerConfig) -> Self {
        Self {
            ui,
            config,
            stop: None,
        }
    }

    /// Return from [`run`](Self::run) once `stop` is signalled.
    #[must_use]
    pub fn with_stop(mut self, stop: &'a StopSignal) -> Self {
        self.stop = Some(stop);
        self
    }

    /// One iteration without the sleep: process pending UI work under the
    /// lock and return the clamped delay.
    pub async fn step(&self) -> Result<u32, Error> {
        let recommended = {
            let mut ui = self.ui.lock().await?;
            ui.process_pending()?
        };
        Ok(self.config.clamp(i64::from(recommended)))
    }

    /// Loop `step` and sleep until stopped or until a step fails.
    pub async fn run(&self) -> Result<(), Error> {
        info!(
            "Render scheduler started, delay {}..={}ms",
            self.config.min_delay_ms(),
            self.config.max_delay_ms()
        );
        loop {
            if self.stop.is_some_and(|s| s.signaled()) {
                info!("Render scheduler stopped");
                return Ok(());
            }
            let delay = match self.step().await {
                Ok(delay) => delay,
                Err(e) => {
                    error!("Render step failed: {}", e);
                    return Err(e);
                }
            };
            Timer::after_millis(u64::from(delay)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        MAX_DELAY_MS,
        MIN_DELAY_MS,
    };

    #[test]
    fn clamps_into_band() {
        assert_eq!(clamp_delay(0), MIN_DELAY_MS);
        assert_eq!(clamp_delay(-5), MIN_DELAY_MS);
        assert_eq!(clamp_delay(i64::from(u32::MAX)), MAX_DELAY_MS);
        assert_eq!(clamp_delay(i64::MAX), MAX_DELAY_MS);
        assert_eq!(clamp_delay(100), 100u32.max(MIN_DELAY_MS));
    }

    #[test]
    fn custom_band() {
        let config = SchedulerConfig::new(10, 20).unwrap();
        assert_eq!(config.clamp(5), 10);
        assert_eq!(config.clamp(15), 15);
        assert_eq!(config.clamp(25), 20);
    }
}
