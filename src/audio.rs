//! Sound cues
//!
//! The simulation never plays sound itself. It emits [`GameEvent`]s, which
//! the [`AudioManager`] maps to [`SoundEffect`]s and hands to an
//! [`AudioSink`] supplied by the host. Background music is started once per
//! level and loops until the host stops it.

use crate::sim::{GameEvent, Outcome};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Shooter fired
    Shot,
    /// Enemy stomped or fell out
    EnemyDefeated,
    /// Player caught, shot or fell
    PlayerHurt,
    Victory,
    GameOver,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::ShotFired { .. } => Some(SoundEffect::Shot),
            GameEvent::EnemyDefeated { .. } => Some(SoundEffect::EnemyDefeated),
            GameEvent::PlayerDefeated => Some(SoundEffect::PlayerHurt),
            GameEvent::GameOver(Outcome::Won) => Some(SoundEffect::Victory),
            GameEvent::GameOver(Outcome::Lost) => Some(SoundEffect::GameOver),
        }
    }
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    /// Level 1 theme
    LevelTheme,
}

impl MusicTrack {
    /// Asset the host streams for this track
    pub fn asset_path(self) -> &'static str {
        match self {
            MusicTrack::LevelTheme => "assets/who_likes_to_party.mp3",
        }
    }
}

/// Music plays quietly under the effects
pub const DEFAULT_MUSIC_VOLUME: f32 = 1.0 / 16.0;

/// Host-side audio backend
pub trait AudioSink {
    /// Play `effect` at `volume` (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, volume: f32);

    /// Start `track` at `volume`, replacing whatever music is playing
    fn play_music(&mut self, track: MusicTrack, volume: f32, looped: bool);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {:?} at volume {:.2}", effect, volume);
    }

    fn play_music(&mut self, track: MusicTrack, volume: f32, looped: bool) {
        log::info!("music {:?} at volume {:.3} (looped: {})", track, volume, looped);
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music: Option<MusicTrack>,
}

impl<S: AudioSink + Default> Default for AudioManager<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: DEFAULT_MUSIC_VOLUME,
            muted: false,
            music: None,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0). Takes effect on the next track start.
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Loop `track` from the start. Asking for the track already playing
    /// does nothing.
    pub fn start_music(&mut self, track: MusicTrack) {
        if self.music == Some(track) {
            return;
        }
        let vol = if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        };
        self.sink.play_music(track, vol, true);
        self.music = Some(track);
    }

    pub fn current_music(&self) -> Option<MusicTrack> {
        self.music
    }

    /// Play the cue for every event that has one, in order
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
