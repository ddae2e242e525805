//! Command types for the audio system
//!
//! Commands represent requests to perform actions (imperative). Each
//! operative command owns one id in the audio event block, so hosts with
//! integer-keyed event tables can route by number.

use std::fmt;

use crate::playback::{Channel, Listener};

/// Parameters for a play request
///
/// Built incrementally, then attached to a play command. The start and
/// finish listeners ride along and fire at most once each.
pub struct PlayParams {
    /// Clip name, resolved by the backend
    pub name: String,

    /// Restart the clip when it reaches the end
    pub looping: bool,

    /// Per-request volume override (channel volume applies when `None`)
    pub volume: Option<f32>,

    /// Play even when the channel switch is off (music only)
    pub even_if_off: bool,

    /// Event id broadcast when the clip finishes
    pub custom_event_id: Option<u16>,

    /// Fired when the clip becomes audible
    pub on_start: Option<Listener>,

    /// Fired when the clip runs to completion
    pub on_finish: Option<Listener>,
}

impl PlayParams {
    /// Start building a play request for a clip
    pub fn clip(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            looping: false,
            volume: None,
            even_if_off: false,
            custom_event_id: None,
            on_start: None,
            on_finish: None,
        }
    }

    /// Restart the clip when it ends
    pub fn looped(mut self) -> Self {
        self.looping = true;
        self
    }

    /// Set a per-request volume (clamped to 0.0-1.0)
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = Some(volume.clamp(0.0, 1.0));
        self
    }

    /// Play even when the channel switch is off
    pub fn even_if_off(mut self) -> Self {
        self.even_if_off = true;
        self
    }

    /// Broadcast this event id when the clip finishes
    pub fn with_custom_event_id(mut self, event_id: u16) -> Self {
        self.custom_event_id = Some(event_id);
        self
    }

    /// Attach a start listener
    pub fn with_on_start(mut self, listener: impl FnOnce() + Send + 'static) -> Self {
        self.on_start = Some(Box::new(listener));
        self
    }

    /// Attach a finish listener
    pub fn with_on_finish(mut self, listener: impl FnOnce() + Send + 'static) -> Self {
        self.on_finish = Some(Box::new(listener));
        self
    }
}

impl fmt::Debug for PlayParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayParams")
            .field("name", &self.name)
            .field("looping", &self.looping)
            .field("volume", &self.volume)
            .field("even_if_off", &self.even_if_off)
            .field("custom_event_id", &self.custom_event_id)
            .field("has_on_start", &self.on_start.is_some())
            .field("has_on_finish", &self.on_finish.is_some())
            .finish()
    }
}

/// Audio commands
#[derive(Debug)]
pub enum AudioCommand {
    /// Toggle the sound effects channel
    SoundSwitch { on: bool },

    /// Toggle the music channel
    MusicSwitch { on: bool },

    /// Toggle the voice channel
    VoiceSwitch { on: bool },

    /// Set sound effects volume
    SetSoundVolume { volume: f32 },

    /// Set music volume
    SetMusicVolume { volume: f32 },

    /// Set voice volume
    SetVoiceVolume { volume: f32 },

    /// Play a music track on the fixed music unit
    PlayMusic { params: PlayParams },

    /// Play a sound effect on a pooled unit
    PlaySound { params: PlayParams },

    /// Play a voice line on the fixed voice unit
    PlayVoice { params: PlayParams },

    /// Pause the music unit
    PauseMusic,

    /// Resume the music unit
    ResumeMusic,

    /// Stop the music unit
    StopMusic,

    /// Pause the voice unit
    PauseVoice,

    /// Stop the voice unit
    StopVoice,

    /// Stop every pooled sound unit
    StopAllSounds,

    /// Play clips back-to-back on one channel
    PlaySequence { channel: Channel, clips: Vec<String> },

    /// Add a clip to the retained set, loading it once
    AddRetained { name: String },

    /// Remove a clip from the retained set, releasing it
    RemoveRetained { name: String },
}

impl AudioCommand {
    /// Integer id of this command inside the audio event block
    pub fn event_id(&self) -> u16 {
        match self {
            AudioCommand::SoundSwitch { .. } => 401,
            AudioCommand::MusicSwitch { .. } => 402,
            AudioCommand::VoiceSwitch { .. } => 403,
            AudioCommand::SetSoundVolume { .. } => 404,
            AudioCommand::SetMusicVolume { .. } => 405,
            AudioCommand::SetVoiceVolume { .. } => 406,
            AudioCommand::PlayMusic { .. } => 407,
            AudioCommand::PlaySound { .. } => 408,
            AudioCommand::PlayVoice { .. } => 409,
            AudioCommand::PauseMusic => 410,
            AudioCommand::ResumeMusic => 411,
            AudioCommand::StopMusic => 412,
            AudioCommand::PauseVoice => 413,
            AudioCommand::StopVoice => 414,
            AudioCommand::StopAllSounds => 415,
            AudioCommand::PlaySequence { .. } => 416,
            AudioCommand::AddRetained { .. } => 417,
            AudioCommand::RemoveRetained { .. } => 418,
        }
    }

    /// Build a command from a bare event id
    ///
    /// Only commands that carry no payload can be built this way. Ids that
    /// need a payload, the block markers, and ids outside the block all
    /// return `None`.
    pub fn from_event_id(event_id: u16) -> Option<Self> {
        match event_id {
            410 => Some(AudioCommand::PauseMusic),
            411 => Some(AudioCommand::ResumeMusic),
            412 => Some(AudioCommand::StopMusic),
            413 => Some(AudioCommand::PauseVoice),
            414 => Some(AudioCommand::StopVoice),
            415 => Some(AudioCommand::StopAllSounds),
            _ => None,
        }
    }

    /// Get a human-readable description of the command
    pub fn description(&self) -> String {
        match self {
            AudioCommand::SoundSwitch { on } => {
                format!("Sound switch {}", if *on { "on" } else { "off" })
            }
            AudioCommand::MusicSwitch { on } => {
                format!("Music switch {}", if *on { "on" } else { "off" })
            }
            AudioCommand::VoiceSwitch { on } => {
                format!("Voice switch {}", if *on { "on" } else { "off" })
            }
            AudioCommand::SetSoundVolume { volume } => {
                format!("Set sound volume to {:.2}", volume)
            }
            AudioCommand::SetMusicVolume { volume } => {
                format!("Set music volume to {:.2}", volume)
            }
            AudioCommand::SetVoiceVolume { volume } => {
                format!("Set voice volume to {:.2}", volume)
            }
            AudioCommand::PlayMusic { params } => {
                format!("Play music: {}", params.name)
            }
            AudioCommand::PlaySound { params } => {
                format!("Play sound: {}", params.name)
            }
            AudioCommand::PlayVoice { params } => {
                format!("Play voice: {}", params.name)
            }
            AudioCommand::PauseMusic => "Pause music".to_string(),
            AudioCommand::ResumeMusic => "Resume music".to_string(),
            AudioCommand::StopMusic => "Stop music".to_string(),
            AudioCommand::PauseVoice => "Pause voice".to_string(),
            AudioCommand::StopVoice => "Stop voice".to_string(),
            AudioCommand::StopAllSounds => "Stop all sounds".to_string(),
            AudioCommand::PlaySequence { channel, clips } => {
                format!("Play sequence of {} clips on {}", clips.len(), channel)
            }
            AudioCommand::AddRetained { name } => {
                format!("Retain audio: {}", name)
            }
            AudioCommand::RemoveRetained { name } => {
                format!("Release retained audio: {}", name)
            }
        }
    }
}
