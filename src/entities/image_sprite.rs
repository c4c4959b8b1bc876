//! A sprite that can draw itself: an image blitted at the sprite's
//! current position and size.

use crate::assets::ImageHandle;
use crate::utils::base::Point;
use crate::utils::sprite::Collides;

use super::sprite::{Sprite, SpriteConfig};

/// A moving entity with an attached image.
#[derive(Debug, Clone)]
pub struct ImageSprite {
    pub sprite: Sprite,
    pub image: ImageHandle,
}

impl ImageSprite {
    pub fn new(image: ImageHandle, config: SpriteConfig) -> Self {
        Self { sprite: Sprite::new(config), image }
    }

    /// Blit the image over the sprite's rectangle.
    pub fn draw(&self) {
        self.image
            .draw(self.sprite.x, self.sprite.y, self.sprite.width, self.sprite.height);
    }

    /// Blit with transparency, for the player's hit flash.
    pub fn draw_with_alpha(&self, alpha: f32) {
        let color = macroquad::color::Color::new(1.0, 1.0, 1.0, alpha);
        self.image
            .draw_tinted(self.sprite.x, self.sprite.y, self.sprite.width, self.sprite.height, color);
    }
}

impl Collides for ImageSprite {
    fn center(&self) -> Point {
        self.sprite.center()
    }
    fn radius(&self) -> f32 {
        self.sprite.radius
    }
}
