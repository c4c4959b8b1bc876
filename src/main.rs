//! BRAMBLE: a side-scrolling arcade runner
//!
//! One player, an endless parallax landscape, obstacles to jump and
//! tokens to grab. The loop below is the whole scheduler: poll inputs
//! into intents, run one simulation frame, paint it, yield for the next.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod assets;
mod audio;
mod config;
mod entities;
mod game;
mod input;
mod overlay;
mod settings;
mod utils;

use macroquad::prelude::*;

use assets::AssetStore;
use audio::AudioBank;
use config::GameConfig;
use game::state::Screen;
use game::Game;
use input::InputState;
use settings::Settings;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Bramble v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = GameConfig::load_or_default("assets/config.ron");
    let settings = Settings::load();

    // show something while the assets come in
    clear_background(BLACK);
    draw_text("Loading...", 40.0, 60.0, 32.0, WHITE);
    next_frame().await;

    let assets = AssetStore::load().await;
    let audio = AudioBank::load(settings.muted).await;

    let screen = Screen::from_size(screen_width(), screen_height());
    let mut game = Game::new(config, settings, assets, audio, screen, get_time());
    let mut input = InputState::new();

    loop {
        // a viewport change invalidates all derived geometry
        let (width, height) = (screen_width(), screen_height());
        if (width - game.screen().width).abs() > 1.0 || (height - game.screen().height).abs() > 1.0
        {
            game.resize(Screen::from_size(width, height), get_time());
        }

        for event in input.poll(game.overlay()) {
            game.handle_event(event);
        }

        game.update(get_time());
        game.draw();

        next_frame().await;
    }
}
