//! The board's input devices read as one.

use super::{
    Buttons,
    BusDevice,
};
use crate::{
    touch::Xpt2046,
    ui::{
        InputDevice,
        InputSample,
    },
};

pub type Touch = Xpt2046<BusDevice<'static>>;

/// Touch first, then the navigation buttons.
pub struct BoardInput {
    touch: Option<Touch>,
    buttons: Option<Buttons>,
}

impl BoardInput {
    pub(super) fn new(touch: Option<Touch>, buttons: Option<Buttons>) -> Self {
        Self { touch, buttons }
    }

    pub fn has_touch(&self) -> bool {
        self.touch.is_some()
    }
}

impl InputDevice for BoardInput {
    fn read(&mut self) -> InputSample {
        if let Some(touch) = self.touch.as_mut() {
            let sample = touch.read();
            if sample != InputSample::Released {
                return sample;
            }
        }
        self.buttons
            .as_mut()
            .map_or(InputSample::Released, |buttons| buttons.read())
    }
}
