//! Host-side helpers shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use embedded_graphics::{
    Pixel,
    pixelcolor::Rgb565,
    prelude::*,
};
use lcd_clock::{
    Error,
    config::UiConfig,
    error::UiFault,
    ui::{
        FlushReady,
        InputDevice,
        InputSample,
        LabelId,
        Screen,
        UiRuntime,
        UiTicks,
    },
};

pub const WIDTH: u32 = 240;
pub const HEIGHT: u32 = 320;
pub const BACKGROUND: Rgb565 = Rgb565::new(0, 14, 10);
pub const FOREGROUND: Rgb565 = Rgb565::WHITE;

/// An in-memory RGB565 frame buffer.
pub struct Canvas {
    size: Size,
    pixels: Vec<Rgb565>,
    /// Make every draw call fail.
    pub broken: bool,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            pixels: vec![Rgb565::BLACK; (width * height) as usize],
            broken: false,
        }
    }

    pub fn pixel(&self, at: Point) -> Option<Rgb565> {
        self.index(at).map(|i| self.pixels[i])
    }

    pub fn count(&self, color: Rgb565) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }

    fn index(&self, at: Point) -> Option<usize> {
        let (x, y) = (u32::try_from(at.x).ok()?, u32::try_from(at.y).ok()?);
        (x < self.size.width && y < self.size.height).then(|| (y * self.size.width + x) as usize)
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb565;
    type Error = ();

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        if self.broken {
            return Err(());
        }
        for Pixel(at, color) in pixels {
            if let Some(i) = self.index(at) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }
}

pub type TestScreen<'a, I = lcd_clock::ui::NoInput> = Screen<'a, Canvas, I>;

pub fn screen<'a>(ticks: &'a UiTicks, flushed: &'a FlushReady) -> TestScreen<'a> {
    Screen::new(
        Canvas::new(WIDTH, HEIGHT),
        BACKGROUND,
        ticks,
        flushed,
        UiConfig::default(),
    )
}

/// Plays back a fixed list of samples, then reports `Released`.
pub struct Script(pub VecDeque<InputSample>);

impl Script {
    pub fn new(samples: impl IntoIterator<Item = InputSample>) -> Self {
        Self(samples.into_iter().collect())
    }
}

impl InputDevice for Script {
    fn read(&mut self) -> InputSample {
        self.0.pop_front().unwrap_or(InputSample::Released)
    }
}

/// A UI runtime that fails every call.
pub struct BrokenUi;

impl UiRuntime for BrokenUi {
    fn process_pending(&mut self) -> Result<u32, Error> {
        Err(UiFault::Draw.into())
    }

    fn set_label_text(&mut self, _label: LabelId, _text: &str) -> Result<(), Error> {
        Err(UiFault::Draw.into())
    }
}

/// Parse an `HH:MM:SS` label back into seconds since midnight.
pub fn parse_time(text: &str) -> Option<u32> {
    let bytes = text.as_bytes();
    if bytes.len() != 8 || bytes[2] != b':' || bytes[5] != b':' {
        return None;
    }
    let h: u8 = text[0..2].parse().ok()?;
    let m: u8 = text[3..5].parse().ok()?;
    let s: u8 = text[6..8].parse().ok()?;
    lcd_clock::clock::TimeOfDay::new(h, m, s)
        .ok()
        .map(|t| t.seconds_since_midnight())
}
