//! The recycling parallax background.
//!
//! Four layer archetypes (sky, two horizon bands, floor) spawn on fixed
//! frame cadences into one pool, capped per type. Every update runs the
//! same pipeline: cadence spawns, re-speed from the world speed, sort
//! farthest-depth-first so nearer layers occlude, step leftward, cull
//! whatever has fully left the screen.

use rand::Rng;

use crate::assets::ImageHandle;
use crate::config::{BackgroundConfig, LayerConfig};
use crate::game::state::{Frame, Screen};
use crate::utils::base::{random_int_between, Bounds};
use crate::utils::sprite::{pad_bounds, pick_location};

use super::image_sprite::ImageSprite;
use super::sprite::SpriteConfig;

/// Background layer archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Sky,
    HorizonA,
    HorizonB,
    Floor,
}

const ALL_LAYERS: [LayerKind; 4] =
    [LayerKind::Sky, LayerKind::HorizonA, LayerKind::HorizonB, LayerKind::Floor];

/// One pooled image, tagged with its archetype.
pub struct LayerImage {
    pub kind: LayerKind,
    pub sprite: ImageSprite,
}

/// Per-layer source images. `None` disables that layer's spawning.
#[derive(Clone, Default)]
pub struct LayerImages {
    pub sky: Option<ImageHandle>,
    pub horizon_a: Option<ImageHandle>,
    pub horizon_b: Option<ImageHandle>,
    pub floor: Option<ImageHandle>,
}

pub struct Background {
    screen: Screen,
    /// World scroll speed; the orchestrator refreshes this every frame.
    pub speed: f32,
    images: Vec<LayerImage>,
    sources: LayerImages,
    config: BackgroundConfig,
}

impl Background {
    pub fn new(
        screen: Screen,
        speed: f32,
        sources: LayerImages,
        config: BackgroundConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let mut background = Self { screen, speed, images: Vec::new(), sources, config };
        background.fresh_scene(rng);
        background
    }

    /// Pre-fill the starting scene so play doesn't open on empty sky.
    fn fresh_scene(&mut self, rng: &mut impl Rng) {
        let plan = [
            (LayerKind::HorizonB, 2),
            (LayerKind::Sky, 4),
            (LayerKind::HorizonA, 8),
            (LayerKind::Floor, 4),
        ];
        for (kind, count) in plan {
            for _ in 0..count {
                if let Some(image) = self.spawn(kind, false, rng) {
                    self.images.push(image);
                }
            }
        }
    }

    fn layer_config(&self, kind: LayerKind) -> LayerConfig {
        match kind {
            LayerKind::Sky => self.config.sky,
            LayerKind::HorizonA => self.config.horizon_a,
            LayerKind::HorizonB => self.config.horizon_b,
            LayerKind::Floor => self.config.floor,
        }
    }

    fn source(&self, kind: LayerKind) -> Option<&ImageHandle> {
        match kind {
            LayerKind::Sky => self.sources.sky.as_ref(),
            LayerKind::HorizonA => self.sources.horizon_a.as_ref(),
            LayerKind::HorizonB => self.sources.horizon_b.as_ref(),
            LayerKind::Floor => self.sources.floor.as_ref(),
        }
    }

    /// Create one layer image. `entering` places it at the right edge for
    /// live scroll-in; otherwise it lands somewhere across the screen.
    /// Returns `None` when the layer has no source image.
    pub fn spawn(&self, kind: LayerKind, entering: bool, rng: &mut impl Rng) -> Option<LayerImage> {
        let source = self.source(kind)?;
        let config = self.layer_config(kind);
        let screen = &self.screen;

        let depth = random_int_between(rng, config.depth_min as i32, config.depth_max as i32) as u32;
        let height = config.height_factor * screen.height / depth as f32;
        let width = height * source.aspect();

        let spawn_area = match kind {
            // sky drifts anywhere in the upper half
            LayerKind::Sky => Bounds {
                top: screen.top,
                right: screen.right,
                bottom: screen.center_y,
                left: if entering { screen.right } else { screen.left },
            },
            // horizon bands sit on the bottom edge
            LayerKind::HorizonA | LayerKind::HorizonB => Bounds {
                top: screen.bottom - height,
                bottom: screen.bottom - height,
                right: if entering { screen.right } else { screen.right - width / 2.0 },
                left: if entering { screen.right } else { screen.left - width / 2.0 },
            },
            LayerKind::Floor => Bounds {
                top: screen.bottom - height,
                bottom: screen.bottom - height,
                right: screen.right,
                left: if entering { screen.right } else { screen.left },
            },
        };
        let location = pick_location(rng, spawn_area);

        let sprite_config = SpriteConfig::new(
            location.x,
            location.y,
            width,
            height,
            pad_bounds(screen.bounds(), width, height),
        )
        .with_speed(self.speed / depth as f32)
        .with_depth(depth);

        Some(LayerImage { kind, sprite: ImageSprite::new(source.clone(), sprite_config) })
    }

    /// One frame: cadence spawns under the per-layer caps, then the fixed
    /// pipeline — re-speed, depth-sort, step left, cull off-screen.
    pub fn update(&mut self, frame: &Frame, rng: &mut impl Rng) {
        for kind in ALL_LAYERS {
            let config = self.layer_config(kind);
            if frame.count % config.period == 0 && self.count(kind) < config.cap {
                if let Some(image) = self.spawn(kind, true, rng) {
                    self.images.push(image);
                }
            }
        }

        let speed = self.speed;
        for image in &mut self.images {
            image.sprite.sprite.speed = speed / image.sprite.sprite.depth as f32;
        }

        // farthest first so nearer layers paint over
        self.images.sort_by(|a, b| b.sprite.sprite.depth.cmp(&a.sprite.sprite.depth));

        for image in &mut self.images {
            image.sprite.sprite.step(-1.0, 0.0, frame.scale);
        }

        self.images.retain(|image| image.sprite.sprite.x > -image.sprite.sprite.width);
    }

    /// Alive images of one archetype.
    pub fn count(&self, kind: LayerKind) -> usize {
        self.images.iter().filter(|image| image.kind == kind).count()
    }

    pub fn images(&self) -> &[LayerImage] {
        &self.images
    }

    /// Paint the pool in its current depth-sorted order.
    pub fn draw(&self) {
        for image in &self.images {
            image.sprite.draw();
        }
    }
}
