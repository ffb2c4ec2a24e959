//! 4-way navigation buttons as a UI input device.

use esp_hal::gpio::{
    Input,
    InputConfig,
    Pull,
};

use super::ButtonResources;
use crate::ui::{
    Direction,
    InputDevice,
    InputSample,
};

/// Up/down/left/right buttons, active low.
///
/// Polled by the UI runtime every input period, which is longer than the
/// contact bounce, so a press is reported once on its first sample.
pub struct Buttons {
    up: Input<'static>,
    down: Input<'static>,
    left: Input<'static>,
    right: Input<'static>,
    held: Option<Direction>,
}

impl From<ButtonResources<'static>> for Buttons {
    fn from(res: ButtonResources<'static>) -> Self {
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        Self {
            up: Input::new(res.up, pull_up),
            down: Input::new(res.down, pull_up),
            left: Input::new(res.left, pull_up),
            right: Input::new(res.right, pull_up),
            held: None,
        }
    }
}

impl Buttons {
    fn pressed(&self) -> Option<Direction> {
        [
            (Direction::Up, &self.up),
            (Direction::Down, &self.down),
            (Direction::Left, &self.left),
            (Direction::Right, &self.right),
        ]
        .into_iter()
        .find(|(_, pin)| pin.is_low())
        .map(|(direction, _)| direction)
    }
}

impl InputDevice for Buttons {
    fn read(&mut self) -> InputSample {
        let pressed = self.pressed();
        let sample = match pressed {
            Some(direction) if self.held != Some(direction) => InputSample::Key(direction),
            _ => InputSample::Released,
        };
        self.held = pressed;
        sample
    }
}
