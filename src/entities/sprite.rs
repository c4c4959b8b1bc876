//! The moving entity base: a positioned, bounded rectangle with a
//! depth-scaled speed, per-move velocity, and a facing direction.
//!
//! Position is re-clamped into bounds after every step, so callers never
//! see an out-of-bounds sprite. Deeper sprites are drawn smaller and move
//! slower, which is what sells the parallax.

use crate::utils::base::{bounded, Bounds, Point};
use crate::utils::sprite::Collides;

/// Which way a sprite is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

/// Construction parameters for a sprite.
#[derive(Debug, Clone, Copy)]
pub struct SpriteConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub depth: u32,
    pub direction: Direction,
    pub bounds: Bounds,
}

impl SpriteConfig {
    pub fn new(x: f32, y: f32, width: f32, height: f32, bounds: Bounds) -> Self {
        Self {
            x,
            y,
            width,
            height,
            speed: 1.0,
            depth: 0,
            direction: Direction::Right,
            bounds,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }
}

/// A bounded, velocity-tracked rectangle.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    /// Previous position, kept for velocity.
    pub px: f32,
    pub py: f32,
    pub width: f32,
    pub height: f32,
    /// Center, maintained by the setters.
    pub cx: f32,
    pub cy: f32,
    /// Velocity: new position minus previous.
    pub vx: f32,
    pub vy: f32,
    /// Collision radius, fixed at construction.
    pub radius: f32,
    /// Base speed in units per frame-scale unit.
    pub speed: f32,
    /// Parallax layer; 0 is the foreground.
    pub depth: u32,
    pub direction: Direction,
    pub bounds: Bounds,
}

impl Sprite {
    pub fn new(config: SpriteConfig) -> Self {
        // deeper layers render slightly smaller
        let inset = config.depth as f32 * 2.0;
        let width = config.width - inset;
        let height = config.height - inset;
        Self {
            x: config.x,
            y: config.y,
            px: config.x,
            py: config.y,
            width,
            height,
            cx: config.x + width / 2.0,
            cy: config.y + height / 2.0,
            vx: 0.0,
            vy: 0.0,
            radius: (width + height) / 4.0,
            speed: config.speed,
            depth: config.depth,
            direction: config.direction,
            bounds: config.bounds,
        }
    }

    /// Advance one frame of movement. A zero direction leaves that axis
    /// untouched; the result is clamped into bounds either way.
    pub fn step(&mut self, dir_x: f32, dir_y: f32, frame_scale: f32) {
        let speed = self.speed / (self.depth as f32 + 1.0);
        let nx = if dir_x == 0.0 { self.x } else { self.x + dir_x * speed * frame_scale };
        let ny = if dir_y == 0.0 { self.y } else { self.y + dir_y * speed * frame_scale };

        self.set_x(nx);
        self.set_y(ny);

        // facing runs against the scroll: leftward intent faces right
        if dir_x < 0.0 {
            self.direction = Direction::Right;
        }
        if dir_x > 0.0 {
            self.direction = Direction::Left;
        }
    }

    /// Set x clamped into bounds, updating center and velocity.
    pub fn set_x(&mut self, nx: f32) {
        let x = bounded(nx, self.bounds.left, self.bounds.right - self.width);
        self.px = self.x;
        self.x = x;
        self.cx = self.x + self.width / 2.0;
        self.vx = self.x - self.px;
    }

    /// Set y clamped into bounds, updating center and velocity.
    pub fn set_y(&mut self, ny: f32) {
        let y = bounded(ny, self.bounds.top, self.bounds.bottom - self.height);
        self.py = self.y;
        self.y = y;
        self.cy = self.y + self.height / 2.0;
        self.vy = self.y - self.py;
    }

    pub fn center(&self) -> Point {
        Point::new(self.cx, self.cy)
    }
}

impl Collides for Sprite {
    fn center(&self) -> Point {
        Point::new(self.cx, self.cy)
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_sprite() -> Sprite {
        let bounds = Bounds::new(0.0, 100.0, 100.0, 0.0);
        Sprite::new(SpriteConfig::new(50.0, 50.0, 10.0, 10.0, bounds).with_speed(5.0))
    }

    #[test]
    fn test_step_clamps_into_bounds() {
        let mut sprite = test_sprite();
        for _ in 0..100 {
            sprite.step(1.0, 1.0, 10.0);
        }
        assert!(sprite.x >= sprite.bounds.left);
        assert!(sprite.x <= sprite.bounds.right - sprite.width);
        assert!(sprite.y >= sprite.bounds.top);
        assert!(sprite.y <= sprite.bounds.bottom - sprite.height);

        for _ in 0..100 {
            sprite.step(-1.0, -1.0, 10.0);
        }
        assert_eq!(sprite.x, sprite.bounds.left);
        assert_eq!(sprite.y, sprite.bounds.top);
    }

    #[test]
    fn test_zero_direction_holds_axis() {
        let mut sprite = test_sprite();
        sprite.step(0.0, 1.0, 1.0);
        assert_eq!(sprite.x, 50.0);
        assert_eq!(sprite.y, 55.0);
    }

    #[test]
    fn test_velocity_tracks_movement() {
        let mut sprite = test_sprite();
        sprite.step(-1.0, 0.0, 1.0);
        assert_eq!(sprite.vx, -5.0);
        assert_eq!(sprite.vy, 0.0);
        assert_eq!(sprite.px, 50.0);
    }

    #[test]
    fn test_depth_scales_speed_and_size() {
        let bounds = Bounds::new(0.0, 1000.0, 1000.0, 0.0);
        let mut sprite =
            Sprite::new(SpriteConfig::new(500.0, 500.0, 20.0, 20.0, bounds).with_speed(12.0).with_depth(2));
        assert_eq!(sprite.width, 16.0);
        assert_eq!(sprite.height, 16.0);

        sprite.step(-1.0, 0.0, 1.0);
        // speed / (depth + 1)
        assert_eq!(sprite.vx, -4.0);
    }

    #[test]
    fn test_direction_flips_on_horizontal_intent() {
        let mut sprite = test_sprite();
        sprite.step(-1.0, 0.0, 1.0);
        assert_eq!(sprite.direction, Direction::Right);
        sprite.step(1.0, 0.0, 1.0);
        assert_eq!(sprite.direction, Direction::Left);
        sprite.step(0.0, 1.0, 1.0);
        assert_eq!(sprite.direction, Direction::Left);
    }

    #[test]
    fn test_center_follows_position() {
        let mut sprite = test_sprite();
        sprite.step(1.0, 0.0, 2.0);
        assert_eq!(sprite.cx, sprite.x + sprite.width / 2.0);
        assert_eq!(sprite.cy, sprite.y + sprite.height / 2.0);
    }
}
