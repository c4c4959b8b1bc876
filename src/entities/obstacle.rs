//! A scrolling obstacle. Identity role only: all behavior lives in the
//! sprite base and the orchestrator.

use crate::assets::ImageHandle;
use crate::utils::base::Point;
use crate::utils::sprite::Collides;

use super::image_sprite::ImageSprite;
use super::sprite::SpriteConfig;

pub struct Obstacle {
    pub sprite: ImageSprite,
}

impl Obstacle {
    pub fn new(image: ImageHandle, config: SpriteConfig) -> Self {
        Self { sprite: ImageSprite::new(image, config) }
    }

    pub fn draw(&self) {
        self.sprite.draw();
    }
}

impl Collides for Obstacle {
    fn center(&self) -> Point {
        self.sprite.sprite.center()
    }
    fn radius(&self) -> f32 {
        self.sprite.sprite.radius
    }
}
