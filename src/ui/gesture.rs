//! Swipe detection from a pointer press/move/release stream.

use embedded_graphics::prelude::Point;

use super::input::Direction;

/// Turns pointer samples into swipe directions.
///
/// A press becomes a gesture once it has travelled more than the limit along
/// its dominant axis. Each press yields at most one gesture.
pub struct GestureRecognizer {
    limit_px: u32,
    start: Option<Point>,
    fired: bool,
}

impl GestureRecognizer {
    pub const fn new(limit_px: u32) -> Self {
        Self {
            limit_px,
            start: None,
            fired: false,
        }
    }

    /// Feed a pointer position while pressed.
    pub fn pressed(&mut self, at: Point) -> Option<Direction> {
        let Some(start) = self.start else {
            self.start = Some(at);
            self.fired = false;
            return None;
        };
        if self.fired {
            return None;
        }

        let delta = at - start;
        let (dx, dy) = (delta.x.unsigned_abs(), delta.y.unsigned_abs());
        let direction = if dx >= dy && dx > self.limit_px {
            if delta.x > 0 { Direction::Right } else { Direction::Left }
        } else if dy > dx && dy > self.limit_px {
            // Screen y grows downwards.
            if delta.y > 0 { Direction::Down } else { Direction::Up }
        } else {
            return None;
        };

        self.fired = true;
        Some(direction)
    }

    /// The pointer was lifted.
    pub fn released(&mut self) {
        self.start = None;
        self.fired = false;
    }
}
