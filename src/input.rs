//! Semantic input: polls the keyboard, mouse, and touch state once per
//! frame and emits game-level intents, so the orchestrator only ever
//! sees meaning, never raw device events.

use macroquad::prelude::*;

use crate::overlay::{Overlay, OverlayTarget};
use crate::utils::base::Point;

/// Game-level input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Jump (space press or tap); only honored during play.
    Jump,
    /// Confirm (space release): starts from ready, restarts from over.
    Confirm,
    DashOn,
    DashOff,
    PauseToggle,
    MuteToggle,
    /// A click, resolved to the overlay region it landed on.
    Click(OverlayTarget),
}

/// A resolved swipe direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Swipe decoding for one touch gesture. Built when the touch starts,
/// fed move samples, resolved at the end, then dropped.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    samples: Vec<Point>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self { samples: Vec::new() }
    }

    pub fn push(&mut self, x: f32, y: f32) {
        self.samples.push(Point::new(x, y));
    }

    /// Fold the gesture's net movement into a direction; too little
    /// movement is no swipe at all.
    pub fn resolve(&self) -> Option<SwipeDirection> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;
        let dx = last.x - first.x;
        let dy = last.y - first.y;
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        Some(if dx.abs() > dy.abs() {
            if dx > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            }
        } else if dy > 0.0 {
            SwipeDirection::Down
        } else {
            SwipeDirection::Up
        })
    }
}

/// Holds the live gesture between frames.
#[derive(Default)]
pub struct InputState {
    gesture: Option<SwipeTracker>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect this frame's semantic events.
    pub fn poll(&mut self, overlay: &Overlay) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if is_key_pressed(KeyCode::Space) {
            events.push(InputEvent::Jump);
        }
        if is_key_released(KeyCode::Space) {
            events.push(InputEvent::Confirm);
        }
        if is_key_pressed(KeyCode::LeftShift) || is_key_pressed(KeyCode::RightShift) {
            events.push(InputEvent::DashOn);
        }
        if is_key_released(KeyCode::LeftShift) || is_key_released(KeyCode::RightShift) {
            events.push(InputEvent::DashOff);
        }
        if is_key_pressed(KeyCode::P) {
            events.push(InputEvent::PauseToggle);
        }
        if is_key_pressed(KeyCode::M) {
            events.push(InputEvent::MuteToggle);
        }

        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            events.push(InputEvent::Click(overlay.hit_test(x, y)));
        }

        for touch in touches() {
            match touch.phase {
                TouchPhase::Started => {
                    self.gesture = Some(SwipeTracker::new());
                    // a tap is a jump, unless it lands on a toggle
                    match overlay.hit_test(touch.position.x, touch.position.y) {
                        OverlayTarget::Mute | OverlayTarget::Pause => {}
                        _ => events.push(InputEvent::Jump),
                    }
                }
                TouchPhase::Moved => {
                    if let Some(gesture) = &mut self.gesture {
                        gesture.push(touch.position.x, touch.position.y);
                    }
                }
                TouchPhase::Ended | TouchPhase::Cancelled => {
                    if let Some(gesture) = self.gesture.take() {
                        match gesture.resolve() {
                            Some(SwipeDirection::Right) => events.push(InputEvent::DashOn),
                            Some(_) => events.push(InputEvent::DashOff),
                            None => {}
                        }
                    }
                }
                TouchPhase::Stationary => {}
            }
        }

        events
    }
}
