//! Runtime channel state
//!
//! The live counterpart to persisted settings: which channels are on right
//! now, and which music track was requested most recently. The remembered
//! track is what makes switching music back on resume the right clip.

use crate::playback::Channel;
use crate::settings::AudioSettings;

/// Per-channel switches plus the remembered music track
#[derive(Debug, Clone)]
pub struct ChannelState {
    sound_on: bool,
    music_on: bool,
    voice_on: bool,
    current_music: Option<String>,
}

impl ChannelState {
    /// Seed runtime state from persisted settings
    pub fn from_settings(settings: &AudioSettings) -> Self {
        Self {
            sound_on: settings.sound_on,
            music_on: settings.music_on,
            voice_on: settings.voice_on,
            current_music: None,
        }
    }

    /// Get the switch for a channel
    pub fn is_on(&self, channel: Channel) -> bool {
        match channel {
            Channel::Music => self.music_on,
            Channel::Voice => self.voice_on,
            Channel::Sound => self.sound_on,
        }
    }

    /// Set the switch for a channel
    pub fn set_on(&mut self, channel: Channel, on: bool) {
        match channel {
            Channel::Music => self.music_on = on,
            Channel::Voice => self.voice_on = on,
            Channel::Sound => self.sound_on = on,
        }
    }

    /// Check if every channel is on
    pub fn all_on(&self) -> bool {
        self.sound_on && self.music_on && self.voice_on
    }

    /// The most recently requested music track
    ///
    /// Survives stops and switch toggles; only a new music request
    /// replaces it.
    pub fn current_music(&self) -> Option<&str> {
        self.current_music.as_deref()
    }

    /// Remember a music track as the current one
    pub fn remember_music(&mut self, name: &str) {
        self.current_music = Some(name.to_string());
    }
}

impl Default for ChannelState {
    fn default() -> Self {
        Self {
            sound_on: true,
            music_on: true,
            voice_on: true,
            current_music: None,
        }
    }
}
