//! XPT2046 resistive touch controller as a UI input device.
//!
//! The controller answers each 8-bit command with a 12-bit conversion in the
//! following two bytes. Pressure is derived from the Z1/Z2 plates; a position
//! is only read while the pressure is above the configured threshold.

use embedded_graphics::prelude::{
    Point,
    Size,
};
use embedded_hal::spi::SpiDevice;

use crate::{
    config::TouchConfig,
    ui::{
        InputDevice,
        InputSample,
    },
};

/// Differential 12-bit conversions, powering down between them.
const READ_X: u8 = 0xd0;
const READ_Y: u8 = 0x90;
const READ_Z1: u8 = 0xb0;
const READ_Z2: u8 = 0xc0;

/// Full scale of a conversion.
pub const RAW_FULL_SCALE: u32 = 1 << 12;

/// Position conversions averaged per reading.
const SAMPLES: u32 = 4;

pub struct Xpt2046<SPI> {
    spi: SPI,
    config: TouchConfig,
    size: Size,
}

impl<SPI: SpiDevice> Xpt2046<SPI> {
    /// A controller reporting positions on a screen of `size` pixels.
    pub fn new(spi: SPI, config: TouchConfig, size: Size) -> Self {
        Self { spi, config, size }
    }

    pub fn into_inner(self) -> SPI {
        self.spi
    }

    fn convert(&mut self, command: u8) -> Result<u16, SPI::Error> {
        let mut rx = [0_u8; 3];
        self.spi.transfer(&mut rx, &[command, 0, 0])?;
        Ok((u16::from_be_bytes([rx[1], rx[2]]) >> 3) & 0x0fff)
    }

    /// 0 with nothing on the panel, growing with pressure.
    pub fn pressure(&mut self) -> Result<u16, SPI::Error> {
        let z1 = self.convert(READ_Z1)?;
        let z2 = self.convert(READ_Z2)?;
        Ok((z1 + 4095).saturating_sub(z2))
    }

    /// The touched point in screen coordinates.
    pub fn position(&mut self) -> Result<Point, SPI::Error> {
        let (mut x, mut y) = (0_u32, 0_u32);
        for _ in 0..SAMPLES {
            x += u32::from(self.convert(READ_X)?);
            y += u32::from(self.convert(READ_Y)?);
        }
        let (x, y) = (x / SAMPLES, y / SAMPLES);
        let (x, y) = if self.config.swap_xy { (y, x) } else { (x, y) };

        let (w, h) = (self.size.width, self.size.height);
        let mut px = x * w / RAW_FULL_SCALE;
        let mut py = y * h / RAW_FULL_SCALE;
        if self.config.mirror_x {
            px = w.saturating_sub(1) - px;
        }
        if self.config.mirror_y {
            py = h.saturating_sub(1) - py;
        }
        Ok(Point::new(px as i32, py as i32))
    }
}

impl<SPI: SpiDevice> InputDevice for Xpt2046<SPI> {
    fn read(&mut self) -> InputSample {
        let sample = match self.pressure() {
            Ok(z) if z < self.config.pressure_threshold => Ok(InputSample::Released),
            Ok(_) => self.position().map(InputSample::Pressed),
            Err(e) => Err(e),
        };
        // A failed read counts as a lifted pointer, which also ends any
        // gesture in progress.
        sample.unwrap_or_else(|_| {
            warn!("Touch controller read failed");
            InputSample::Released
        })
    }
}
