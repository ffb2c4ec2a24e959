//! Display backlight control.

use esp_hal::gpio::{
    Level,
    Output,
    OutputConfig,
};

use super::BacklightResources;

/// Controls the display backlight LED.
pub struct Backlight {
    pin: Output<'static>,
    on_level: Level,
}

impl Backlight {
    /// Starts with the backlight off, so the panel can be filled before it
    /// becomes visible.
    pub fn new(res: BacklightResources<'static>, on_high: bool) -> Self {
        let (on_level, off_level) = if on_high {
            (Level::High, Level::Low)
        } else {
            (Level::Low, Level::High)
        };
        Self {
            pin: Output::new(res.led, off_level, OutputConfig::default()),
            on_level,
        }
    }

    pub fn on(&mut self) {
        self.pin.set_level(self.on_level);
    }
}
