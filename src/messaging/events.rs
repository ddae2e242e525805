//! Notice types for the audio system
//!
//! Notices represent things that have happened (past tense).
//! They are broadcast to all subscribers.

use crate::playback::Channel;

/// First id of the audio event block (marker, never routed)
pub const EVENT_ID_BEGAN: u16 = 400;

/// Last id of the audio event block (marker, never routed)
pub const EVENT_ID_ENDED: u16 = 419;

/// Check if an id falls inside the audio event block, markers excluded
pub fn is_audio_event_id(event_id: u16) -> bool {
    event_id > EVENT_ID_BEGAN && event_id < EVENT_ID_ENDED
}

/// Audio notices
#[derive(Debug, Clone)]
pub enum AudioNotice {
    /// A clip became audible on a channel
    PlaybackStarted { channel: Channel, clip: String },

    /// A clip ran to completion on a channel
    PlaybackFinished { channel: Channel, clip: String },

    /// A host-chosen event id attached to a finished clip
    Custom { event_id: u16 },

    /// A channel switch was toggled
    SwitchChanged { channel: Channel, on: bool },

    /// A channel volume was changed
    VolumeChanged { channel: Channel, volume: f32 },
}

impl AudioNotice {
    /// Get a human-readable description of the notice
    pub fn description(&self) -> String {
        match self {
            AudioNotice::PlaybackStarted { channel, clip } => {
                format!("Playback started on {}: {}", channel, clip)
            }
            AudioNotice::PlaybackFinished { channel, clip } => {
                format!("Playback finished on {}: {}", channel, clip)
            }
            AudioNotice::Custom { event_id } => {
                format!("Custom notice {}", event_id)
            }
            AudioNotice::SwitchChanged { channel, on } => {
                format!("{} switch {}", channel, if *on { "on" } else { "off" })
            }
            AudioNotice::VolumeChanged { channel, volume } => {
                format!("{} volume {:.2}", channel, volume)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_description() {
        let notice = AudioNotice::PlaybackStarted {
            channel: Channel::Music,
            clip: "theme.mp3".to_string(),
        };
        assert_eq!(notice.description(), "Playback started on music: theme.mp3");

        let notice = AudioNotice::SwitchChanged {
            channel: Channel::Sound,
            on: false,
        };
        assert_eq!(notice.description(), "sound switch off");
    }

    #[test]
    fn test_event_id_block() {
        assert!(!is_audio_event_id(EVENT_ID_BEGAN));
        assert!(!is_audio_event_id(EVENT_ID_ENDED));
        assert!(is_audio_event_id(EVENT_ID_BEGAN + 1));
        assert!(is_audio_event_id(EVENT_ID_ENDED - 1));
        assert!(!is_audio_event_id(0));
        assert!(!is_audio_event_id(900));
    }
}
