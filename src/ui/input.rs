//! Input devices feeding the UI runtime.

use embedded_graphics::prelude::Point;

/// Direction of a swipe or a navigation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
            Direction::Up => "UP",
            Direction::Down => "DOWN",
        }
    }
}

/// One reading from an input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputSample {
    /// Nothing is pressed.
    Released,
    /// A pointer is down at this screen position.
    Pressed(Point),
    /// A navigation key went down.
    Key(Direction),
}

/// Something the UI runtime polls for input.
pub trait InputDevice {
    fn read(&mut self) -> InputSample;
}

/// Placeholder for screens without an input device.
pub struct NoInput;

impl InputDevice for NoInput {
    fn read(&mut self) -> InputSample {
        InputSample::Released
    }
}
