use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SettingsError;
use crate::playback::Channel;

fn default_max_sound_units() -> usize {
    10
}

/// Persisted audio settings
///
/// Channel switches and volumes survive restarts; runtime playback state
/// does not. Stored as JSON in the platform config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Sound effects channel enabled
    pub sound_on: bool,

    /// Music channel enabled
    pub music_on: bool,

    /// Voice channel enabled
    pub voice_on: bool,

    /// Sound effects volume (0.0-1.0)
    pub sound_volume: f32,

    /// Music volume (0.0-1.0)
    pub music_volume: f32,

    /// Voice volume (0.0-1.0)
    pub voice_volume: f32,

    /// Maximum simultaneous sound effect units
    #[serde(default = "default_max_sound_units")]
    pub max_sound_units: usize,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sound_on: true,
            music_on: true,
            voice_on: true,
            sound_volume: 1.0,
            music_volume: 1.0,
            voice_volume: 1.0,
            max_sound_units: default_max_sound_units(),
        }
    }
}

impl AudioSettings {
    /// Load settings from the platform-specific config directory.
    /// Creates default settings if the file doesn't exist.
    pub fn load() -> Result<Self, SettingsError> {
        let path = Self::settings_path()?;
        Self::load_from(&path)
    }

    /// Load settings from an explicit path, creating defaults if missing
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| SettingsError::LoadFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;
            let settings: AudioSettings =
                serde_json::from_str(&content).map_err(|e| SettingsError::LoadFailed {
                    path: path.display().to_string(),
                    source: Box::new(e),
                })?;

            tracing::debug!("Loaded audio settings from {}", path.display());
            Ok(settings)
        } else {
            let settings = AudioSettings::default();
            settings.save_to(path)?;
            tracing::info!("Created default audio settings at {}", path.display());
            Ok(settings)
        }
    }

    /// Save settings to the platform-specific config directory
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::settings_path()?;
        self.save_to(&path)
    }

    /// Save settings to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SettingsError::DirectoryCreationFailed {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let json =
            serde_json::to_string_pretty(self).map_err(|e| SettingsError::SaveFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;
        fs::write(path, json).map_err(|e| SettingsError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        Ok(())
    }

    /// Get the settings file path under the platform config directory
    pub fn settings_path() -> Result<PathBuf, SettingsError> {
        let config_dir = dirs::config_dir().ok_or(SettingsError::NoSettingsDir)?;
        Ok(config_dir.join("audio-director").join("settings.json"))
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

    /// Get the volume for a channel
    pub fn volume(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Music => self.music_volume,
            Channel::Voice => self.voice_volume,
            Channel::Sound => self.sound_volume,
        }
    }

    /// Set the volume for a channel (clamped to 0.0-1.0)
    pub fn set_volume(&mut self, channel: Channel, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        match channel {
            Channel::Music => self.music_volume = volume,
            Channel::Voice => self.voice_volume = volume,
            Channel::Sound => self.sound_volume = volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AudioSettings::default();
        assert!(settings.sound_on);
        assert!(settings.music_on);
        assert!(settings.voice_on);
        assert_eq!(settings.music_volume, 1.0);
        assert_eq!(settings.max_sound_units, 10);
    }

    #[test]
    fn test_settings_serialization() {
        let mut settings = AudioSettings::default();
        settings.music_volume = 0.4;
        settings.voice_on = false;

        let json = serde_json::to_string(&settings).unwrap();
        let deserialized: AudioSettings = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.music_volume, 0.4);
        assert!(!deserialized.voice_on);
        assert_eq!(deserialized.max_sound_units, 10);
    }

    #[test]
    fn test_missing_pool_size_falls_back_to_default() {
        // Settings written by older builds lack the pool size field
        let json = r#"{
            "sound_on": true,
            "music_on": false,
            "voice_on": true,
            "sound_volume": 0.5,
            "music_volume": 1.0,
            "voice_volume": 0.9
        }"#;

        let settings: AudioSettings = serde_json::from_str(json).unwrap();
        assert!(!settings.music_on);
        assert_eq!(settings.sound_volume, 0.5);
        assert_eq!(settings.max_sound_units, 10);
    }

    #[test]
    fn test_channel_accessors() {
        let mut settings = AudioSettings::default();

        settings.set_on(Channel::Voice, false);
        assert!(!settings.is_on(Channel::Voice));
        assert!(settings.is_on(Channel::Music));

        settings.set_volume(Channel::Sound, 0.3);
        assert_eq!(settings.volume(Channel::Sound), 0.3);
    }

    #[test]
    fn test_volume_clamping() {
        let mut settings = AudioSettings::default();

        settings.set_volume(Channel::Music, 1.5);
        assert_eq!(settings.volume(Channel::Music), 1.0);

        settings.set_volume(Channel::Music, -0.5);
        assert_eq!(settings.volume(Channel::Music), 0.0);
    }
}
