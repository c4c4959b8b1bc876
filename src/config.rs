//! Canonical gameplay tunables.
//!
//! Every cadence, cap, and scaling factor is named here once and
//! referenced everywhere, so behavior differences are config edits rather
//! than scattered magic numbers. `assets/config.ron` may override the
//! compiled defaults.

use serde::{Deserialize, Serialize};

/// Tunables for one background layer archetype.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Frames between spawn attempts.
    pub period: u64,
    /// Most images of this type alive at once.
    pub cap: usize,
    /// Inclusive parallax depth range.
    pub depth_min: u32,
    pub depth_max: u32,
    /// Screen-height multiple fed into `height = factor * screen.h / depth`.
    pub height_factor: f32,
}

/// The four parallax layers, farthest to nearest in feel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundConfig {
    pub sky: LayerConfig,
    pub horizon_a: LayerConfig,
    pub horizon_b: LayerConfig,
    pub floor: LayerConfig,
}

/// Token spawn and scoring tunables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Frames between spawn attempts.
    pub period: u64,
    /// Score value of the common archetype.
    pub common_value: u32,
    /// Score value of the rare archetype.
    pub rare_value: u32,
    /// Common entries per rare one in the spawn pool.
    pub common_weight: u32,
    /// Score multiplier applied on collection.
    pub multiplier: u32,
    /// Token height in screen-scale units.
    pub height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Starting lives.
    pub lives: i32,
    /// Base world scroll speed.
    pub speed: f32,
    /// World speed while dashing.
    pub dash_speed: f32,
    /// Gravity setting; feeds the jump gravity factor.
    pub gravity: f32,
    /// Jump power; feeds the jump impulse.
    pub jump_power: f32,
    /// Damage points per lost life.
    pub damage_per_life: u32,
    /// Player base speed.
    pub player_speed: f32,
    /// Player height in screen-scale units.
    pub player_height: f32,
    /// Obstacle height in screen-scale units.
    pub obstacle_height: f32,
    /// Candidate obstacle spawn periods (frames); one is drawn each frame.
    pub obstacle_periods: Vec<u64>,
    /// Most obstacles alive at once.
    pub obstacle_cap: usize,
    pub token: TokenConfig,
    pub background: BackgroundConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lives: 3,
            speed: 15.0,
            dash_speed: 30.0,
            gravity: 2.0,
            jump_power: 30.0,
            damage_per_life: 20,
            player_speed: 50.0,
            player_height: 45.0,
            obstacle_height: 40.0,
            obstacle_periods: vec![150, 200, 250, 300],
            obstacle_cap: 3,
            token: TokenConfig {
                period: 20,
                common_value: 1,
                rare_value: 10,
                common_weight: 3,
                multiplier: 1,
                height: 20.0,
            },
            background: BackgroundConfig {
                sky: LayerConfig {
                    period: 300,
                    cap: 5,
                    depth_min: 4,
                    depth_max: 8,
                    height_factor: 0.5,
                },
                horizon_a: LayerConfig {
                    period: 120,
                    cap: 15,
                    depth_min: 2,
                    depth_max: 3,
                    height_factor: 1.0,
                },
                horizon_b: LayerConfig {
                    period: 300,
                    cap: 3,
                    depth_min: 6,
                    depth_max: 7,
                    height_factor: 5.5,
                },
                floor: LayerConfig {
                    period: 120,
                    cap: 20,
                    depth_min: 2,
                    depth_max: 3,
                    height_factor: 1.0 / 6.0,
                },
            },
        }
    }
}

impl GameConfig {
    /// Load overrides from a RON file, falling back to the compiled
    /// defaults when the file is absent or malformed.
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match ron::from_str(&text) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("bad config {}: {}; using defaults", path, err);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_coherent() {
        let config = GameConfig::default();
        assert!(config.lives > 0);
        assert!(config.dash_speed > config.speed);
        assert!(config.damage_per_life > 0);
        assert!(!config.obstacle_periods.is_empty());
        for layer in [
            config.background.sky,
            config.background.horizon_a,
            config.background.horizon_b,
            config.background.floor,
        ] {
            assert!(layer.period > 0);
            assert!(layer.cap > 0);
            assert!(layer.depth_min >= 1, "depth 0 would break parallax speed");
            assert!(layer.depth_min <= layer.depth_max);
        }
    }

    #[test]
    fn test_config_round_trips_through_ron() {
        let config = GameConfig::default();
        let text = ron::to_string(&config).unwrap();
        let parsed: GameConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed.lives, config.lives);
        assert_eq!(parsed.obstacle_periods, config.obstacle_periods);
        assert_eq!(parsed.background.sky.cap, config.background.sky.cap);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = GameConfig::load_or_default("no/such/config.ron");
        assert_eq!(config.lives, GameConfig::default().lives);
    }
}
