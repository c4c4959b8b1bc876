//! Game phases, world state, screen geometry, and frame timing.

use crate::config::GameConfig;
use crate::utils::base::Bounds;

/// The orchestrator's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Loading,
    Ready,
    Play,
    Over,
}

/// World-level state reported to the overlay.
#[derive(Debug, Clone)]
pub struct GameState {
    pub current: GamePhase,
    pub prev: GamePhase,
    pub score: u32,
    pub lives: i32,
    /// World scroll speed; dashing raises it temporarily.
    pub speed: f32,
    pub gravity: f32,
    pub jump_power: f32,
    pub paused: bool,
    pub muted: bool,
}

impl GameState {
    pub fn new(config: &GameConfig, muted: bool) -> Self {
        Self {
            current: GamePhase::Loading,
            prev: GamePhase::Loading,
            score: 0,
            lives: config.lives,
            speed: config.speed,
            gravity: config.gravity,
            jump_power: config.jump_power,
            paused: false,
            muted,
        }
    }

    /// Advance the phase, remembering where we came from.
    pub fn set_phase(&mut self, next: GamePhase) {
        self.prev = self.current;
        self.current = next;
    }
}

/// Screen geometry. `scale` sizes entities relative to the viewport so
/// the game reads the same on any display.
#[derive(Debug, Clone, Copy)]
pub struct Screen {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

impl Screen {
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            top: 0.0,
            right: width,
            bottom: height,
            left: 0.0,
            center_x: width / 2.0,
            center_y: height / 2.0,
            width,
            height,
            scale: (width + height) / 2.0 * 0.003,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.top, self.right, self.bottom, self.left)
    }
}

/// Frame timing. `scale` normalizes motion to real elapsed time so speed
/// is frame-rate independent.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Monotonic frame counter; the authoritative frame count.
    pub count: u64,
    /// Wall-clock time of this frame, seconds.
    pub time: f64,
    /// Measured interval since the previous frame, milliseconds.
    pub rate: f64,
    /// Per-frame motion multiplier.
    pub scale: f32,
}

impl Frame {
    pub fn new(now: f64) -> Self {
        Self { count: 0, time: now, rate: 0.0, scale: 0.0 }
    }

    /// Advance to the next frame at wall-clock `now`. A resumed frame
    /// re-baselines the interval so time spent paused is not integrated
    /// into physics.
    pub fn advance(&mut self, now: f64, screen_scale: f32, resumed: bool) {
        self.count += 1;
        self.rate = if resumed { 0.0 } else { (now - self.time) * 1000.0 };
        self.time = now;
        self.scale = screen_scale * self.rate as f32 * 0.01;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_phase_tracks_previous() {
        let mut state = GameState::new(&GameConfig::default(), false);
        assert_eq!(state.current, GamePhase::Loading);
        state.set_phase(GamePhase::Ready);
        state.set_phase(GamePhase::Play);
        assert_eq!(state.current, GamePhase::Play);
        assert_eq!(state.prev, GamePhase::Ready);
    }

    #[test]
    fn test_screen_geometry() {
        let screen = Screen::from_size(800.0, 600.0);
        assert_eq!(screen.center_x, 400.0);
        assert_eq!(screen.center_y, 300.0);
        assert_eq!(screen.bounds().right, 800.0);
        assert!((screen.scale - 2.1).abs() < 1e-5);
    }

    #[test]
    fn test_frame_advance_measures_interval() {
        let mut frame = Frame::new(0.0);
        frame.advance(0.016, 2.0, false);
        assert_eq!(frame.count, 1);
        assert!((frame.rate - 16.0).abs() < 1e-9);
        assert!((frame.scale - 0.32).abs() < 1e-5);
    }

    #[test]
    fn test_resumed_frame_rebaselines() {
        let mut frame = Frame::new(0.0);
        frame.advance(0.016, 2.0, false);
        // a long pause, then resume: no interval is integrated
        frame.advance(60.0, 2.0, true);
        assert_eq!(frame.rate, 0.0);
        assert_eq!(frame.scale, 0.0);
        // and the baseline is fresh afterwards
        frame.advance(60.016, 2.0, false);
        assert!((frame.rate - 16.0).abs() < 1e-9);
    }
}
