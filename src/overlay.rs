//! The HUD overlay: score, lives, banner, button, instructions, and the
//! mute/pause toggles, with click hit-testing.
//!
//! One-way calls from the orchestrator set what is shown; clicks come
//! back as the region they landed on. All text is drawn at whole-pixel
//! positions.

use macroquad::prelude::*;

use crate::game::state::Screen;

/// Overlay regions a click can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTarget {
    Mute,
    Pause,
    Button,
    Other,
}

const MARGIN: f32 = 12.0;
const ICON_SIZE: f32 = 36.0;
const BUTTON_WIDTH: f32 = 200.0;
const BUTTON_HEIGHT: f32 = 48.0;

pub struct Overlay {
    screen: Screen,
    score: u32,
    lives: i32,
    banner: Option<String>,
    button: Option<String>,
    instructions: Option<String>,
    muted: bool,
    paused: bool,
    stats_visible: bool,
}

impl Overlay {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            score: 0,
            lives: 0,
            banner: None,
            button: None,
            instructions: None,
            muted: false,
            paused: false,
            stats_visible: false,
        }
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn set_lives(&mut self, lives: i32) {
        self.lives = lives;
    }

    pub fn set_banner(&mut self, text: impl Into<String>) {
        self.banner = Some(text.into());
    }

    pub fn hide_banner(&mut self) {
        self.banner = None;
    }

    pub fn set_button(&mut self, text: impl Into<String>) {
        self.button = Some(text.into());
    }

    pub fn hide_button(&mut self) {
        self.button = None;
    }

    pub fn set_instructions(&mut self, text: impl Into<String>) {
        self.instructions = Some(text.into());
    }

    pub fn hide_instructions(&mut self) {
        self.instructions = None;
    }

    pub fn show_stats(&mut self) {
        self.stats_visible = true;
    }

    pub fn set_mute(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn set_pause(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn mute_rect(&self) -> Rect {
        Rect::new(self.screen.right - MARGIN - ICON_SIZE, MARGIN, ICON_SIZE, ICON_SIZE)
    }

    fn pause_rect(&self) -> Rect {
        Rect::new(self.screen.right - (MARGIN + ICON_SIZE) * 2.0, MARGIN, ICON_SIZE, ICON_SIZE)
    }

    fn button_rect(&self) -> Rect {
        Rect::new(
            self.screen.center_x - BUTTON_WIDTH / 2.0,
            self.screen.center_y - BUTTON_HEIGHT / 2.0,
            BUTTON_WIDTH,
            BUTTON_HEIGHT,
        )
    }

    /// Map a click point to the overlay region it hit.
    pub fn hit_test(&self, x: f32, y: f32) -> OverlayTarget {
        let point = vec2(x, y);
        if self.mute_rect().contains(point) {
            return OverlayTarget::Mute;
        }
        if self.pause_rect().contains(point) {
            return OverlayTarget::Pause;
        }
        if self.button.is_some() && self.button_rect().contains(point) {
            return OverlayTarget::Button;
        }
        OverlayTarget::Other
    }

    pub fn draw(&self, font: Option<&Font>) {
        let text = |s: &str, x: f32, y: f32, size: u16, color: Color| {
            draw_text_ex(
                s,
                x.floor(),
                y.floor(),
                TextParams { font, font_size: size, color, ..Default::default() },
            );
        };

        if self.stats_visible {
            text(&format!("score {}", self.score), MARGIN, MARGIN + 24.0, 28, WHITE);
            text(
                &format!("lives {}", self.lives),
                MARGIN,
                MARGIN + 52.0,
                22,
                Color::new(1.0, 1.0, 1.0, 0.8),
            );
        }

        // toggle icons, top right
        let mute_rect = self.mute_rect();
        let mute_icon = if self.muted { "x" } else { "s" };
        text(mute_icon, mute_rect.x + 10.0, mute_rect.y + 26.0, 26, WHITE);

        let pause_rect = self.pause_rect();
        let pause_icon = if self.paused { ">" } else { "||" };
        text(pause_icon, pause_rect.x + 8.0, pause_rect.y + 26.0, 26, WHITE);

        if let Some(banner) = &self.banner {
            let dims = measure_text(banner, font, 48, 1.0);
            text(
                banner,
                self.screen.center_x - dims.width / 2.0,
                self.screen.center_y - BUTTON_HEIGHT * 1.5,
                48,
                WHITE,
            );
        }

        if let Some(button) = &self.button {
            let rect = self.button_rect();
            draw_rectangle(
                rect.x.floor(),
                rect.y.floor(),
                rect.w,
                rect.h,
                Color::new(0.0, 0.0, 0.0, 0.5),
            );
            let dims = measure_text(button, font, 30, 1.0);
            text(
                button,
                self.screen.center_x - dims.width / 2.0,
                rect.y + rect.h / 2.0 + 10.0,
                30,
                WHITE,
            );
        }

        if let Some(instructions) = &self.instructions {
            let dims = measure_text(instructions, font, 20, 1.0);
            text(
                instructions,
                self.screen.center_x - dims.width / 2.0,
                self.screen.center_y + BUTTON_HEIGHT * 1.5,
                20,
                Color::new(1.0, 1.0, 1.0, 0.8),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_overlay() -> Overlay {
        Overlay::new(Screen::from_size(800.0, 600.0))
    }

    #[test]
    fn test_hit_test_finds_toggles() {
        let overlay = test_overlay();
        assert_eq!(overlay.hit_test(800.0 - 30.0, 30.0), OverlayTarget::Mute);
        assert_eq!(overlay.hit_test(800.0 - 80.0, 30.0), OverlayTarget::Pause);
        assert_eq!(overlay.hit_test(400.0, 550.0), OverlayTarget::Other);
    }

    #[test]
    fn test_button_only_hit_while_shown() {
        let mut overlay = test_overlay();
        assert_eq!(overlay.hit_test(400.0, 300.0), OverlayTarget::Other);
        overlay.set_button("Start");
        assert_eq!(overlay.hit_test(400.0, 300.0), OverlayTarget::Button);
        overlay.hide_button();
        assert_eq!(overlay.hit_test(400.0, 300.0), OverlayTarget::Other);
    }
}
