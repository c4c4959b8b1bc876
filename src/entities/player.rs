//! The player: a renderable sprite with a damage counter and the
//! drain-clamped vertical force model that shapes the jump arc.
//!
//! The force value doubles as vertical intent: negative while ascending,
//! positive while descending, zero at rest. Each frame the gravity step
//! drains the ascent toward zero and then builds the descent toward a
//! terminal ceiling, so the arc is parabolic without an explicit
//! acceleration term and never overshoots either limit.

use crate::assets::ImageHandle;
use crate::utils::base::{drain_from, drain_to, Point};
use crate::utils::sprite::Collides;

use super::image_sprite::ImageSprite;
use super::sprite::SpriteConfig;

/// Per-frame force decay per unit gravity factor.
const FORCE_DECAY: f32 = 4.0;

/// Downward force ceiling while falling.
const TERMINAL_FORCE: f32 = 12.0;

/// Seconds the hit flash lasts after taking damage.
const FLASH_WINDOW: f64 = 0.2;

/// Force acting on the player. Negative y ascends.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Force {
    pub x: f32,
    pub y: f32,
}

pub struct Player {
    pub sprite: ImageSprite,
    /// Damage taken this session; resets only with the world.
    pub damage: u32,
    damage_time: f64,
    pub force: Force,
    gravity_factor: f32,
}

impl Player {
    pub fn new(image: ImageHandle, config: SpriteConfig) -> Self {
        Self {
            sprite: ImageSprite::new(image, config),
            damage: 0,
            damage_time: f64::NEG_INFINITY,
            force: Force::default(),
            gravity_factor: 0.0,
        }
    }

    /// Grow or shrink the sprite by `n`; the idle breathing pulse.
    /// The collision radius intentionally stays fixed.
    pub fn animate(&mut self, n: f32) {
        self.sprite.sprite.width += n;
        self.sprite.sprite.height += n;
    }

    /// Launch upward. The orchestrator only calls this when the player is
    /// grounded and the game is in play.
    pub fn jump(&mut self, impulse: f32, gravity_factor: f32) {
        self.force.y = -impulse;
        self.gravity_factor = gravity_factor;
    }

    /// One frame of movement: gravity reshapes the vertical force, which
    /// then feeds the sprite step as vertical intent.
    pub fn step(&mut self, dir_x: f32, dir_y: f32, frame_scale: f32) {
        let dx = dir_x + self.force.x;
        let dy = dir_y + self.apply_gravity(frame_scale);
        self.sprite.sprite.step(dx, dy, frame_scale);

        if self.force.y > 0.0 && !self.airborne() {
            // landed: the downward force has spent itself
            self.force.y = 0.0;
        }
    }

    // Ascent magnitude drains toward zero; whatever is left of the gravity
    // step spills into the descent, which builds toward the terminal
    // ceiling. Returns the vertical intent for this frame.
    fn apply_gravity(&mut self, frame_scale: f32) -> f32 {
        let mut step = self.gravity_factor * FORCE_DECAY * frame_scale;
        if step <= 0.0 {
            return self.force.y;
        }

        if self.force.y < 0.0 {
            let drained = drain_from(step, -self.force.y, 0.0);
            self.force.y = -drained.stock;
            step -= drained.flow;
        }

        if self.force.y >= 0.0 && step > 0.0 && self.airborne() {
            self.force.y = drain_to(step, self.force.y, TERMINAL_FORCE).stock;
        }

        self.force.y
    }

    /// Close enough to the resting line to jump from.
    pub fn grounded(&self) -> bool {
        let s = &self.sprite.sprite;
        s.y >= s.bounds.bottom - s.height * 1.2
    }

    /// Strictly above the resting line.
    fn airborne(&self) -> bool {
        let s = &self.sprite.sprite;
        s.y < s.bounds.bottom - s.height - 0.01
    }

    /// Take damage and restart the hit flash.
    pub fn add_damage(&mut self, n: u32, now: f64) {
        self.damage += n;
        self.damage_time = now;
    }

    /// Within the flash window the player renders translucent,
    /// alternating by damage parity.
    pub fn flash_alpha(&self, now: f64) -> Option<f32> {
        if now - self.damage_time < FLASH_WINDOW {
            Some(if self.damage % 4 == 0 { 0.5 } else { 0.75 })
        } else {
            None
        }
    }

    pub fn draw(&self, now: f64) {
        match self.flash_alpha(now) {
            Some(alpha) => self.sprite.draw_with_alpha(alpha),
            None => self.sprite.draw(),
        }
    }
}

impl Collides for Player {
    fn center(&self) -> Point {
        self.sprite.sprite.center()
    }
    fn radius(&self) -> f32 {
        self.sprite.sprite.radius
    }
}
