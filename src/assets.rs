//! Image handles and the named asset store.
//!
//! Handles keep their intrinsic dimensions so entity sizes can derive
//! from the source aspect ratio. A handle without a texture (failed load,
//! headless test) draws nothing but keeps its dimensions, so a missing
//! image degrades the owning feature instead of crashing.

use macroquad::prelude::*;

/// A drawable image with its intrinsic size.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    texture: Option<Texture2D>,
    pub width: f32,
    pub height: f32,
}

impl ImageHandle {
    /// Load a texture from disk, logging and yielding `None` on failure.
    pub async fn load(path: &str) -> Option<Self> {
        match load_texture(path).await {
            Ok(texture) => {
                let width = texture.width();
                let height = texture.height();
                Some(Self { texture: Some(texture), width, height })
            }
            Err(err) => {
                eprintln!("failed to load image {}: {}", path, err);
                None
            }
        }
    }

    /// A handle with dimensions but no texture.
    pub fn sized(width: f32, height: f32) -> Self {
        Self { texture: None, width, height }
    }

    /// Width over height of the source image.
    pub fn aspect(&self) -> f32 {
        if self.height == 0.0 {
            1.0
        } else {
            self.width / self.height
        }
    }

    /// Blit at the given position and size.
    pub fn draw(&self, x: f32, y: f32, width: f32, height: f32) {
        self.draw_tinted(x, y, width, height, WHITE);
    }

    /// Blit with a tint. Positions and sizes are floored to whole pixels;
    /// sub-pixel placement blurs.
    pub fn draw_tinted(&self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let Some(texture) = &self.texture else {
            return;
        };
        draw_texture_ex(
            texture,
            x.floor(),
            y.floor(),
            color,
            DrawTextureParams {
                dest_size: Some(vec2(width.floor(), height.floor())),
                ..Default::default()
            },
        );
    }
}

/// Every image the game references, loaded once at startup.
pub struct AssetStore {
    pub player: Option<ImageHandle>,
    pub obstacle: Option<ImageHandle>,
    pub token_common: Option<ImageHandle>,
    pub token_rare: Option<ImageHandle>,
    pub sky: Option<ImageHandle>,
    pub horizon_a: Option<ImageHandle>,
    pub horizon_b: Option<ImageHandle>,
    pub floor: Option<ImageHandle>,
    pub font: Option<Font>,
}

impl AssetStore {
    pub async fn load() -> Self {
        let font = match load_ttf_font("assets/fonts/game.ttf").await {
            Ok(font) => Some(font),
            Err(err) => {
                eprintln!("failed to load font: {}; falling back to default", err);
                None
            }
        };

        Self {
            player: ImageHandle::load("assets/images/player.png").await,
            obstacle: ImageHandle::load("assets/images/obstacle.png").await,
            token_common: ImageHandle::load("assets/images/token_common.png").await,
            token_rare: ImageHandle::load("assets/images/token_rare.png").await,
            sky: ImageHandle::load("assets/images/sky.png").await,
            horizon_a: ImageHandle::load("assets/images/horizon_a.png").await,
            horizon_b: ImageHandle::load("assets/images/horizon_b.png").await,
            floor: ImageHandle::load("assets/images/floor.png").await,
            font,
        }
    }

    /// Texture-less store for headless tests.
    #[cfg(test)]
    pub fn headless() -> Self {
        Self {
            player: Some(ImageHandle::sized(32.0, 32.0)),
            obstacle: Some(ImageHandle::sized(32.0, 32.0)),
            token_common: Some(ImageHandle::sized(16.0, 16.0)),
            token_rare: Some(ImageHandle::sized(16.0, 16.0)),
            sky: Some(ImageHandle::sized(64.0, 32.0)),
            horizon_a: Some(ImageHandle::sized(64.0, 64.0)),
            horizon_b: Some(ImageHandle::sized(128.0, 64.0)),
            floor: Some(ImageHandle::sized(64.0, 16.0)),
            font: None,
        }
    }
}
