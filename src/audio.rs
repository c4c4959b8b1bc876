//! Sound cue playback with a global mute.
//!
//! Cues that fail to load become silent no-ops; the game never blocks on
//! audio. The bank owns the muted flag so every call site stays a plain
//! `play`.

use macroquad::audio::{load_sound, play_sound, play_sound_once, stop_sound, PlaySoundParams, Sound};

/// Named sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Jump,
    Score,
    Hit,
    GameOver,
}

pub struct AudioBank {
    music: Option<Sound>,
    jump: Option<Sound>,
    score: Option<Sound>,
    hit: Option<Sound>,
    game_over: Option<Sound>,
    muted: bool,
    music_playing: bool,
}

async fn cue(path: &str) -> Option<Sound> {
    match load_sound(path).await {
        Ok(sound) => Some(sound),
        Err(err) => {
            eprintln!("failed to load sound {}: {}", path, err);
            None
        }
    }
}

impl AudioBank {
    pub async fn load(muted: bool) -> Self {
        Self {
            music: cue("assets/sounds/music.ogg").await,
            jump: cue("assets/sounds/jump.ogg").await,
            score: cue("assets/sounds/score.ogg").await,
            hit: cue("assets/sounds/hit.ogg").await,
            game_over: cue("assets/sounds/game_over.ogg").await,
            muted,
            music_playing: false,
        }
    }

    /// A bank with no sounds, for headless use.
    pub fn silent(muted: bool) -> Self {
        Self {
            music: None,
            jump: None,
            score: None,
            hit: None,
            game_over: None,
            muted,
            music_playing: false,
        }
    }

    fn get(&self, cue: Cue) -> Option<&Sound> {
        match cue {
            Cue::Jump => self.jump.as_ref(),
            Cue::Score => self.score.as_ref(),
            Cue::Hit => self.hit.as_ref(),
            Cue::GameOver => self.game_over.as_ref(),
        }
    }

    /// Play a one-shot cue from the start. Muted or missing cues no-op.
    pub fn play(&self, cue: Cue) {
        if self.muted {
            return;
        }
        if let Some(sound) = self.get(cue) {
            play_sound_once(sound);
        }
    }

    /// Start the looped background music if it isn't already running.
    pub fn play_music(&mut self) {
        if self.muted || self.music_playing {
            return;
        }
        if let Some(sound) = &self.music {
            play_sound(sound, PlaySoundParams { looped: true, volume: 1.0 });
            self.music_playing = true;
        }
    }

    pub fn stop_music(&mut self) {
        if self.music_playing {
            if let Some(sound) = &self.music {
                stop_sound(sound);
            }
        }
        self.music_playing = false;
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Flip the mute flag; muting silences the music immediately.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.stop_music();
        }
    }
}
