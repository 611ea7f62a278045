//! Pointer input, reduced to one snapshot per tick.
//!
//! Hosts feed raw press/move/release events into a [`PointerState`] as they arrive and call
//! [`PointerState::snapshot`] at the start of each tick. Any number of events between two ticks
//! collapse into a single [`SpawnRequest`].

use glam::vec2;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Whether particles should be spawned this tick, and where.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub active: bool,
    pub x: f32,
    pub y: f32,
}

impl SpawnRequest {
    pub const IDLE: SpawnRequest = SpawnRequest {
        active: false,
        x: 0.0,
        y: 0.0,
    };

    pub fn at(x: f32, y: f32) -> Self {
        Self { active: true, x, y }
    }

    pub fn origin(&self) -> Vec2 {
        vec2(self.x, self.y)
    }
}

/// The latest known pointer state.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    pressed: bool,
    position: Vec2,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A press doesn't move the spawn origin; the next move or release does.
    pub fn press(&mut self) {
        self.pressed = true;
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.position = vec2(x, y);
    }

    pub fn release(&mut self, x: f32, y: f32) {
        self.position = vec2(x, y);
        self.pressed = false;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn snapshot(&self) -> SpawnRequest {
        SpawnRequest {
            active: self.pressed,
            x: self.position.x,
            y: self.position.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_between_ticks_coalesce() {
        let mut pointer = PointerState::new();
        assert_eq!(pointer.snapshot(), SpawnRequest::IDLE);

        pointer.move_to(3.0, 4.0);
        pointer.press();
        pointer.move_to(10.0, 12.0);
        pointer.move_to(20.0, 22.0);
        assert_eq!(pointer.snapshot(), SpawnRequest::at(20.0, 22.0));
    }

    #[test]
    fn release_records_last_position() {
        let mut pointer = PointerState::new();
        pointer.press();
        pointer.release(7.0, 8.0);
        let request = pointer.snapshot();
        assert!(!request.active);
        assert_eq!(request.origin(), vec2(7.0, 8.0));
    }

    #[test]
    fn press_keeps_previous_origin() {
        let mut pointer = PointerState::new();
        pointer.move_to(5.0, 6.0);
        pointer.press();
        assert_eq!(pointer.snapshot(), SpawnRequest::at(5.0, 6.0));
    }
}
