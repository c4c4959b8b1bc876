//! Game orchestration: the state machine, frame sequencing, entity
//! pools, spawning, collision resolution, and scoring.
//!
//! All world state lives here and is mutated only inside `update`, once
//! per scheduled frame. External inputs land as intents and are consumed
//! at the next frame boundary, so nothing outside the frame callback
//! ever touches the pools directly.

pub mod state;

use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::SeedableRng;
use std::path::PathBuf;

use crate::assets::{AssetStore, ImageHandle};
use crate::audio::{AudioBank, Cue};
use crate::config::GameConfig;
use crate::entities::background::{Background, LayerImages};
use crate::entities::obstacle::Obstacle;
use crate::entities::player::Player;
use crate::entities::sprite::SpriteConfig;
use crate::entities::token::Token;
use crate::input::InputEvent;
use crate::overlay::{Overlay, OverlayTarget};
use crate::settings::Settings;
use crate::utils::base::{pick_from_list, Bounds, Point};
use crate::utils::sprite::{
    collide_distance, collisions_with, collisions_with_mut, pad_bounds, pick_location_away_from,
    DEFAULT_PLACEMENT_ATTEMPTS,
};

use state::{Frame, GamePhase, GameState, Screen};

const TITLE_BANNER: &str = "Bramble";
const START_BUTTON: &str = "Start";
const INSTRUCTIONS: &str = "space to jump - shift to dash";
const PAUSED_BANNER: &str = "Paused";
const GAME_OVER_BANNER: &str = "Game over";

const BACKGROUND_COLOR: Color = Color::new(0.36, 0.71, 0.86, 1.0);

/// Input intents queued for the next frame boundary.
#[derive(Debug, Default, Clone, Copy)]
struct Intents {
    jump: bool,
    confirm: bool,
    dash: Option<bool>,
    pause: bool,
    mute: bool,
    click: Option<OverlayTarget>,
}

pub struct Game {
    config: GameConfig,
    settings: Settings,
    settings_path: Option<PathBuf>,
    screen: Screen,
    pub state: GameState,
    frame: Frame,
    assets: AssetStore,
    audio: AudioBank,
    overlay: Overlay,
    intents: Intents,
    /// Set on unpause; the next frame re-baselines its interval.
    resumed: bool,
    player: Player,
    background: Background,
    obstacles: Vec<Obstacle>,
    tokens: Vec<Token>,
    rng: StdRng,
}

impl Game {
    pub fn new(
        config: GameConfig,
        settings: Settings,
        assets: AssetStore,
        audio: AudioBank,
        screen: Screen,
        now: f64,
    ) -> Self {
        let rng = StdRng::from_entropy();
        Self::build(config, settings, assets, audio, screen, now, rng, Settings::default_path())
    }

    /// Headless constructor with a seeded RNG and no settings persistence.
    #[cfg(test)]
    pub fn with_rng(
        config: GameConfig,
        settings: Settings,
        assets: AssetStore,
        audio: AudioBank,
        screen: Screen,
        now: f64,
        rng: StdRng,
    ) -> Self {
        Self::build(config, settings, assets, audio, screen, now, rng, None)
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        config: GameConfig,
        settings: Settings,
        assets: AssetStore,
        audio: AudioBank,
        screen: Screen,
        now: f64,
        mut rng: StdRng,
        settings_path: Option<PathBuf>,
    ) -> Self {
        let state = GameState::new(&config, settings.muted);
        let player = Self::create_player(&screen, &assets, &config);
        let background = Background::new(
            screen,
            state.speed,
            Self::layer_sources(&assets),
            config.background.clone(),
            &mut rng,
        );

        Self {
            config,
            settings,
            settings_path,
            screen,
            state,
            frame: Frame::new(now),
            assets,
            audio,
            overlay: Overlay::new(screen),
            intents: Intents::default(),
            resumed: false,
            player,
            background,
            obstacles: Vec::new(),
            tokens: Vec::new(),
            rng,
        }
    }

    fn layer_sources(assets: &AssetStore) -> LayerImages {
        LayerImages {
            sky: assets.sky.clone(),
            horizon_a: assets.horizon_a.clone(),
            horizon_b: assets.horizon_b.clone(),
            floor: assets.floor.clone(),
        }
    }

    fn create_player(screen: &Screen, assets: &AssetStore, config: &GameConfig) -> Player {
        let image = assets.player.clone().unwrap_or_else(|| ImageHandle::sized(64.0, 64.0));
        let height = config.player_height * screen.scale;
        let width = height * image.aspect();
        let sprite = SpriteConfig::new(
            screen.center_x / 2.0 - width * 0.75,
            screen.bottom,
            width,
            height,
            screen.bounds(),
        )
        .with_speed(config.player_speed);
        Player::new(image, sprite)
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Queue a semantic input; consumed at the next frame boundary.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Jump => self.intents.jump = true,
            InputEvent::Confirm => self.intents.confirm = true,
            InputEvent::DashOn => self.intents.dash = Some(true),
            InputEvent::DashOff => self.intents.dash = Some(false),
            InputEvent::PauseToggle => self.intents.pause = true,
            InputEvent::MuteToggle => self.intents.mute = true,
            InputEvent::Click(target) => self.intents.click = Some(target),
        }
    }

    /// Run one frame of simulation at wall-clock `now` (seconds).
    pub fn update(&mut self, now: f64) {
        let intents = std::mem::take(&mut self.intents);
        self.apply_intents(intents, now);

        // paused or over: the chain is broken, nothing advances
        if self.state.paused || self.state.current == GamePhase::Over {
            return;
        }

        let resumed = std::mem::take(&mut self.resumed);
        self.frame.advance(now, self.screen.scale, resumed);

        self.overlay.set_score(self.state.score);
        self.overlay.set_lives(self.state.lives);

        match self.state.current {
            GamePhase::Loading => {
                self.state.set_phase(GamePhase::Ready);
                self.prepare_ready();
            }
            GamePhase::Ready => self.tick_ready(),
            GamePhase::Play => self.tick_play(now),
            GamePhase::Over => {}
        }
    }

    /// Paint the current world. Draw order: background, obstacles,
    /// tokens, player, overlay.
    pub fn draw(&self) {
        clear_background(BACKGROUND_COLOR);
        self.background.draw();
        for obstacle in &self.obstacles {
            obstacle.draw();
        }
        let font = self.assets.font.as_ref();
        for token in &self.tokens {
            token.draw(font);
        }
        self.player.draw(self.frame.time);
        self.overlay.draw(font);
    }

    // =====================================================================
    // Intents
    // =====================================================================

    fn apply_intents(&mut self, intents: Intents, now: f64) {
        if let Some(target) = intents.click {
            match target {
                OverlayTarget::Mute => self.toggle_mute(),
                OverlayTarget::Pause => self.toggle_pause(),
                OverlayTarget::Button => match self.state.current {
                    GamePhase::Ready => self.start_play(),
                    GamePhase::Over => self.restart(now),
                    _ => {}
                },
                OverlayTarget::Other => {
                    if self.state.current == GamePhase::Over {
                        self.restart(now);
                    }
                }
            }
        }

        if intents.mute {
            self.toggle_mute();
        }
        if intents.pause {
            self.toggle_pause();
        }
        if let Some(on) = intents.dash {
            self.set_dash(on);
        }
        if intents.jump && self.state.current == GamePhase::Play {
            self.try_jump();
        }
        if intents.confirm {
            match self.state.current {
                GamePhase::Ready => self.start_play(),
                GamePhase::Over => self.restart(now),
                _ => {}
            }
        }
    }

    fn start_play(&mut self) {
        self.state.set_phase(GamePhase::Play);
        self.audio.play_music();
    }

    fn toggle_mute(&mut self) {
        if self.state.current == GamePhase::Loading {
            return;
        }
        self.settings.muted = !self.settings.muted;
        self.state.muted = self.settings.muted;
        self.audio.set_muted(self.state.muted);
        self.overlay.set_mute(self.state.muted);

        if let Some(path) = &self.settings_path {
            if let Err(err) = self.settings.save_to(path) {
                eprintln!("failed to save settings: {}", err);
            }
        }

        if !self.settings.muted && self.state.current == GamePhase::Play && !self.state.paused {
            self.audio.play_music();
        }
    }

    /// Orthogonal pause, valid only during play. Resuming re-baselines
    /// frame timing so physics doesn't jump across the gap.
    fn toggle_pause(&mut self) {
        if self.state.current != GamePhase::Play {
            return;
        }
        self.state.paused = !self.state.paused;
        self.overlay.set_pause(self.state.paused);

        if self.state.paused {
            self.audio.stop_music();
            self.overlay.set_banner(PAUSED_BANNER);
        } else {
            self.resumed = true;
            self.overlay.hide_banner();
            self.audio.play_music();
        }
    }

    fn set_dash(&mut self, on: bool) {
        if self.state.current != GamePhase::Play {
            return;
        }
        self.state.speed = if on { self.config.dash_speed } else { self.config.speed };
    }

    /// Jump only from (near) the ground while in play.
    fn try_jump(&mut self) {
        if self.state.current != GamePhase::Play || !self.player.grounded() {
            return;
        }
        let height = self.player.sprite.sprite.height;
        let impulse = self.state.jump_power * height / 1000.0;
        let gravity_factor = self.state.gravity * height / 7000.0;
        self.player.jump(impulse, gravity_factor);
        self.audio.play(Cue::Jump);
    }

    // =====================================================================
    // Phase ticks
    // =====================================================================

    fn prepare_ready(&mut self) {
        self.overlay.set_banner(TITLE_BANNER);
        self.overlay.set_button(START_BUTTON);
        self.overlay.set_instructions(INSTRUCTIONS);
        self.overlay.show_stats();
        self.overlay.set_mute(self.settings.muted);
        self.overlay.set_pause(false);
    }

    /// Idle scene: breathing pulse and gravity, no spawns or scoring.
    fn tick_ready(&mut self) {
        self.idle_player();
    }

    fn tick_play(&mut self, now: f64) {
        self.background.speed = self.state.speed;
        self.background.update(&self.frame, &mut self.rng);

        // coming in from the ready screen: clear its chrome
        if self.state.prev == GamePhase::Ready {
            self.overlay.hide_banner();
            self.overlay.hide_button();
            self.overlay.hide_instructions();
        }

        self.audio.play_music();

        self.update_obstacles(now);
        if self.state.current == GamePhase::Over {
            // the last contact spent the last life
            return;
        }
        self.update_tokens(now);
        self.idle_player();
    }

    fn idle_player(&mut self) {
        let pulse = (self.frame.count as f32 / 10.0).cos() / 4.0;
        self.player.animate(pulse * self.screen.scale);
        self.player.step(0.0, 0.0, self.frame.scale);
    }

    fn game_over(&mut self) {
        self.state.set_phase(GamePhase::Over);
        self.overlay.set_banner(GAME_OVER_BANNER);
        self.audio.stop_music();
        self.audio.play(Cue::GameOver);
    }

    /// Tear the world down and rebuild it from config; the restart path
    /// out of `Over`, and the response to a viewport change.
    pub fn restart(&mut self, now: f64) {
        self.state = GameState::new(&self.config, self.settings.muted);
        self.frame = Frame::new(now);
        self.player = Self::create_player(&self.screen, &self.assets, &self.config);
        self.background = Background::new(
            self.screen,
            self.state.speed,
            Self::layer_sources(&self.assets),
            self.config.background.clone(),
            &mut self.rng,
        );
        self.obstacles.clear();
        self.tokens.clear();
        self.audio.stop_music();
        self.overlay = Overlay::new(self.screen);
        self.resumed = false;
    }

    /// Viewport changed: rebuild the world against the new geometry.
    pub fn resize(&mut self, screen: Screen, now: f64) {
        self.screen = screen;
        self.restart(now);
    }

    // =====================================================================
    // Obstacles
    // =====================================================================

    fn update_obstacles(&mut self, now: f64) {
        // a candidate period is drawn fresh each frame
        if let Some(&period) = pick_from_list(&mut self.rng, &self.config.obstacle_periods) {
            if self.frame.count % period == 0 && self.obstacles.len() < self.config.obstacle_cap {
                self.spawn_obstacle();
            }
        }

        // cull, re-speed, then step
        self.obstacles
            .retain(|obstacle| obstacle.sprite.sprite.x > -obstacle.sprite.sprite.width);
        let speed = self.state.speed;
        for obstacle in &mut self.obstacles {
            obstacle.sprite.sprite.speed = speed;
            obstacle.sprite.sprite.step(-1.0, 0.0, self.frame.scale);
        }

        // contact damages every frame it persists
        let player = &self.player;
        let hit = collisions_with(&self.obstacles, |obstacle| collide_distance(obstacle, player));
        if hit {
            self.player.add_damage(1, now);
            if self.player.damage % self.config.damage_per_life == 0 {
                self.state.lives -= 1;
                self.audio.play(Cue::Hit);
                if self.state.lives < 1 {
                    self.game_over();
                }
            }
        }
    }

    fn spawn_obstacle(&mut self) {
        let Some(image) = self.assets.obstacle.clone() else {
            return;
        };
        let height = self.config.obstacle_height * self.screen.scale;
        let width = height * image.aspect();
        let sprite = SpriteConfig::new(
            self.screen.right,
            self.screen.bottom - height,
            width,
            height,
            pad_bounds(self.screen.bounds(), width, height),
        )
        .with_speed(self.state.speed);
        self.obstacles.push(Obstacle::new(image, sprite));
    }

    // =====================================================================
    // Tokens
    // =====================================================================

    fn update_tokens(&mut self, now: f64) {
        if self.frame.count % self.config.token.period == 0 {
            self.spawn_token();
        }

        // re-speed, cull, then step; collected tokens float up
        let speed = self.state.speed;
        for token in &mut self.tokens {
            token.sprite.sprite.speed = speed;
        }
        let cutoff = self.player.sprite.sprite.y - self.player.sprite.sprite.height;
        self.tokens.retain(|token| {
            let sprite = &token.sprite.sprite;
            sprite.x > -sprite.width && (sprite.y > cutoff || !token.collected)
        });
        for token in &mut self.tokens {
            if token.collected {
                token.sprite.sprite.step(0.0, -1.0, self.frame.scale);
            } else {
                token.sprite.sprite.step(-1.0, 0.0, self.frame.scale);
            }
        }

        // collect on contact, exactly once
        let player = &self.player;
        let multiplier = self.config.token.multiplier;
        let mut delta = 0u32;
        let collected = collisions_with_mut(&mut self.tokens, |token| {
            if token.collected {
                return false;
            }
            if collide_distance(token, player) {
                delta += token.collect(multiplier, now);
                return true;
            }
            false
        });

        if collected {
            self.state.score += delta;
            self.audio.play(Cue::Score);
        }
    }

    fn spawn_token(&mut self) {
        let token_config = self.config.token;
        let height = token_config.height * self.screen.scale;

        // archetype pool, common-weighted; missing images drop out
        let mut pool: Vec<(&ImageHandle, u32)> = Vec::new();
        if let Some(image) = &self.assets.token_common {
            for _ in 0..token_config.common_weight {
                pool.push((image, token_config.common_value));
            }
        }
        if let Some(image) = &self.assets.token_rare {
            pool.push((image, token_config.rare_value));
        }
        let Some(&(image, value)) = pick_from_list(&mut self.rng, &pool) else {
            return;
        };
        let image = image.clone();
        let width = height * image.aspect();

        // keep clear of the newest obstacle; exhaustion skips this frame
        let avoid = self
            .obstacles
            .last()
            .map(|obstacle| obstacle.sprite.sprite.center())
            .unwrap_or(Point::new(0.0, 0.0));
        let line = Bounds {
            top: self.screen.bottom - height,
            bottom: self.screen.bottom - height,
            right: self.screen.right,
            left: self.screen.right,
        };
        let Some(location) =
            pick_location_away_from(&mut self.rng, line, avoid, width, DEFAULT_PLACEMENT_ATTEMPTS)
        else {
            return;
        };

        // alternate between the ground line and a raised row
        let y = if self.tokens.len() % 2 == 0 { location.y } else { location.y - height * 4.0 };

        let sprite = SpriteConfig::new(
            location.x,
            y,
            width,
            height,
            pad_bounds(self.screen.bounds(), width, height),
        )
        .with_speed(self.state.speed);
        self.tokens.push(Token::new(
            image,
            sprite,
            format!("token-{}", self.frame.count),
            value,
            ORANGE,
            35,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_game() -> Game {
        Game::with_rng(
            GameConfig::default(),
            Settings::default(),
            AssetStore::headless(),
            AudioBank::silent(false),
            Screen::from_size(800.0, 600.0),
            0.0,
            StdRng::seed_from_u64(7),
        )
    }

    /// Advance to `Play` with two updates and a confirm.
    fn start_play(game: &mut Game) {
        game.update(0.016);
        assert_eq!(game.state.current, GamePhase::Ready);
        game.handle_event(InputEvent::Confirm);
        game.update(0.032);
        assert_eq!(game.state.current, GamePhase::Play);
    }

    fn park_obstacle_on_player(game: &mut Game) {
        let center = game.player.sprite.sprite.center();
        let bounds = pad_bounds(game.screen.bounds(), 400.0, 400.0);
        let sprite = SpriteConfig::new(center.x - 100.0, center.y - 100.0, 200.0, 200.0, bounds);
        game.obstacles.push(Obstacle::new(ImageHandle::sized(200.0, 200.0), sprite));
    }

    fn park_token_on_player(game: &mut Game, value: u32) {
        let center = game.player.sprite.sprite.center();
        let bounds = pad_bounds(game.screen.bounds(), 400.0, 400.0);
        let sprite = SpriteConfig::new(center.x - 8.0, center.y - 8.0, 16.0, 16.0, bounds);
        game.tokens.push(Token::new(
            ImageHandle::sized(16.0, 16.0),
            sprite,
            "token-test".to_string(),
            value,
            ORANGE,
            35,
        ));
    }

    #[test]
    fn test_loading_settles_into_ready() {
        let mut game = test_game();
        game.update(0.016);
        assert_eq!(game.state.current, GamePhase::Ready);
        // ready idles until a confirm arrives
        game.update(0.032);
        game.update(0.048);
        assert_eq!(game.state.current, GamePhase::Ready);
        assert_eq!(game.state.score, 0);
    }

    #[test]
    fn test_obstacle_contact_costs_a_life_and_ends_the_game() {
        let mut game = test_game();
        start_play(&mut game);

        game.state.lives = 1;
        game.player.damage = game.config.damage_per_life - 1;
        park_obstacle_on_player(&mut game);

        game.update(0.048);
        assert_eq!(game.state.lives, 0);
        assert_eq!(game.state.current, GamePhase::Over);
    }

    #[test]
    fn test_damage_accumulates_before_life_loss() {
        let mut game = test_game();
        start_play(&mut game);
        park_obstacle_on_player(&mut game);

        let lives = game.state.lives;
        game.update(0.048);
        assert_eq!(game.player.damage, 1);
        assert_eq!(game.state.lives, lives);
        assert_eq!(game.state.current, GamePhase::Play);
    }

    #[test]
    fn test_token_scores_exactly_once() {
        let mut game = test_game();
        start_play(&mut game);
        park_token_on_player(&mut game, 10);

        game.update(0.048);
        assert_eq!(game.state.score, 10);
        assert!(game.tokens[0].collected);
        assert!(game.tokens[0].key.starts_with("token-"));

        // still overlapping, but spent
        game.update(0.064);
        game.update(0.080);
        assert_eq!(game.state.score, 10);
    }

    #[test]
    fn test_jump_only_in_play_and_from_the_ground() {
        let mut game = test_game();
        game.update(0.016);

        // ready phase ignores jumps
        game.handle_event(InputEvent::Jump);
        game.update(0.032);
        assert_eq!(game.player.force.y, 0.0);

        game.handle_event(InputEvent::Confirm);
        game.update(0.048);
        game.handle_event(InputEvent::Jump);
        game.update(0.064);
        assert!(game.player.force.y < 0.0);
    }

    #[test]
    fn test_dash_raises_speed_only_in_play() {
        let mut game = test_game();
        game.update(0.016);

        game.handle_event(InputEvent::DashOn);
        game.update(0.032);
        assert_eq!(game.state.speed, game.config.speed);

        game.handle_event(InputEvent::Confirm);
        game.update(0.048);
        game.handle_event(InputEvent::DashOn);
        game.update(0.064);
        assert_eq!(game.state.speed, game.config.dash_speed);

        game.handle_event(InputEvent::DashOff);
        game.update(0.080);
        assert_eq!(game.state.speed, game.config.speed);
    }

    #[test]
    fn test_pause_freezes_the_frame_chain() {
        let mut game = test_game();
        start_play(&mut game);

        game.handle_event(InputEvent::PauseToggle);
        game.update(0.048);
        assert!(game.state.paused);
        let frozen_count = game.frame.count;

        game.update(0.064);
        game.update(0.080);
        assert_eq!(game.frame.count, frozen_count);

        // resuming re-baselines the interval: no physics jump
        game.handle_event(InputEvent::PauseToggle);
        game.update(10.0);
        assert!(!game.state.paused);
        assert_eq!(game.frame.rate, 0.0);
        assert_eq!(game.frame.count, frozen_count + 1);
    }

    #[test]
    fn test_pause_ignored_outside_play() {
        let mut game = test_game();
        game.update(0.016);
        game.handle_event(InputEvent::PauseToggle);
        game.update(0.032);
        assert!(!game.state.paused);
    }

    #[test]
    fn test_mute_toggle_flips_state_and_audio() {
        let mut game = test_game();
        game.update(0.016);
        game.handle_event(InputEvent::MuteToggle);
        game.update(0.032);
        assert!(game.state.muted);
        assert!(game.audio.muted());

        game.handle_event(InputEvent::MuteToggle);
        game.update(0.048);
        assert!(!game.state.muted);
    }

    #[test]
    fn test_restart_rebuilds_a_fresh_world() {
        let mut game = test_game();
        start_play(&mut game);

        game.state.lives = 1;
        game.player.damage = game.config.damage_per_life - 1;
        park_obstacle_on_player(&mut game);
        park_token_on_player(&mut game, 10);
        game.update(0.048);
        assert_eq!(game.state.current, GamePhase::Over);

        game.handle_event(InputEvent::Confirm);
        game.update(0.064);
        game.update(0.080);
        assert_eq!(game.state.current, GamePhase::Ready);
        assert_eq!(game.state.score, 0);
        assert_eq!(game.state.lives, game.config.lives);
        assert!(game.obstacles.is_empty());
        assert!(game.tokens.is_empty());
        assert_eq!(game.player.damage, 0);
    }

    #[test]
    fn test_over_freezes_simulation() {
        let mut game = test_game();
        start_play(&mut game);
        game.state.lives = 1;
        game.player.damage = game.config.damage_per_life - 1;
        park_obstacle_on_player(&mut game);
        game.update(0.048);
        assert_eq!(game.state.current, GamePhase::Over);

        let count = game.frame.count;
        game.update(0.064);
        game.update(0.080);
        assert_eq!(game.frame.count, count);
    }

    #[test]
    fn test_collected_token_floats_up() {
        let mut game = test_game();
        start_play(&mut game);
        park_token_on_player(&mut game, 1);
        game.update(0.048);
        assert!(game.tokens[0].collected);

        let y = game.tokens[0].sprite.sprite.y;
        let x = game.tokens[0].sprite.sprite.x;
        game.update(0.064);
        assert!(game.tokens[0].sprite.sprite.y < y);
        assert_eq!(game.tokens[0].sprite.sprite.x, x);
    }
}
