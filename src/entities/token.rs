//! Collectible tokens: image sprites until collected, floating score
//! text afterwards.
//!
//! Collection is one-way. A collected token stops scrolling with the
//! world, drifts upward, and leaves collision checks for good; the
//! collision scan is responsible for never collecting twice.

use macroquad::prelude::*;

use crate::assets::ImageHandle;
use crate::utils::base::Point;
use crate::utils::sprite::Collides;

use super::image_sprite::ImageSprite;
use super::sprite::SpriteConfig;

pub struct Token {
    pub sprite: ImageSprite,
    /// Unique id, handy when debugging spawn cadence.
    pub key: String,
    pub collected: bool,
    pub collected_at: f64,
    /// Score value before the collection multiplier.
    pub value: u32,
    text: String,
    color: Color,
    font_size: u16,
}

impl Token {
    pub fn new(
        image: ImageHandle,
        config: SpriteConfig,
        key: String,
        value: u32,
        color: Color,
        font_size: u16,
    ) -> Self {
        Self {
            sprite: ImageSprite::new(image, config),
            key,
            collected: false,
            collected_at: 0.0,
            value,
            text: String::new(),
            color,
            font_size,
        }
    }

    /// One-way transition to collected. Returns the score delta.
    pub fn collect(&mut self, multiplier: u32, now: f64) -> u32 {
        self.collected = true;
        self.collected_at = now;
        let delta = multiplier * self.value;
        self.text = format!("+{}", delta);
        delta
    }

    pub fn draw(&self, font: Option<&Font>) {
        if self.collected {
            let s = &self.sprite.sprite;
            draw_text_ex(
                &self.text,
                s.x.floor(),
                s.y.floor(),
                TextParams {
                    font,
                    font_size: self.font_size,
                    color: self.color,
                    ..Default::default()
                },
            );
        } else {
            self.sprite.draw();
        }
    }
}

impl Collides for Token {
    fn center(&self) -> Point {
        self.sprite.sprite.center()
    }
    fn radius(&self) -> f32 {
        self.sprite.sprite.radius
    }
}
