//! Playback channels
//!
//! Defines the categories a playback request is routed through. The channel
//! decides which on/off switch and volume apply and whether the request
//! claims a fixed unit or draws one from the pool.

use std::fmt;

/// Playback channel categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Background music (one track at a time, usually looped)
    Music,

    /// Dialogue and announcer lines (one clip at a time)
    Voice,

    /// Short effects (many clips at once, pooled units)
    Sound,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Music => write!(f, "music"),
            Channel::Voice => write!(f, "voice"),
            Channel::Sound => write!(f, "sound"),
        }
    }
}

impl Channel {
    /// Check if units for this channel come from the shared pool
    pub fn is_pooled(&self) -> bool {
        match self {
            Channel::Music => false, // Dedicated unit, lives forever
            Channel::Voice => false, // Dedicated unit, lives forever
            Channel::Sound => true,
        }
    }

    /// Check if a new clip on this channel replaces the current one
    pub fn is_exclusive(&self) -> bool {
        match self {
            Channel::Music => true,
            Channel::Voice => true,
            Channel::Sound => false, // Effects stack freely
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_display() {
        assert_eq!(Channel::Music.to_string(), "music");
        assert_eq!(Channel::Sound.to_string(), "sound");
    }

    #[test]
    fn test_channel_pooling() {
        assert!(!Channel::Music.is_pooled());
        assert!(!Channel::Voice.is_pooled());
        assert!(Channel::Sound.is_pooled());
    }

    #[test]
    fn test_channel_exclusivity() {
        assert!(Channel::Music.is_exclusive());
        assert!(Channel::Voice.is_exclusive());
        assert!(!Channel::Sound.is_exclusive());
    }
}
