use thiserror::Error;

/// Library errors using thiserror for structured error handling.
///
/// These errors represent domain-specific failures that can occur while
/// coordinating playback. They provide context and can be chained with anyhow.

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Audio output is not available")]
    OutputUnavailable,

    #[error("Failed to initialize audio output stream")]
    StreamInitFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to load audio clip: {name}")]
    LoadFailed {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to decode audio clip: {name}")]
    DecodeFailed {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Audio playback failed")]
    PlaybackFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load settings from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save settings to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to create settings directory: {path}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine a settings directory for this platform")]
    NoSettingsDir,
}

/// Type alias for application Results using anyhow for context chaining
pub type AudioResult<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = AudioError::OutputUnavailable;
        assert_eq!(err.to_string(), "Audio output is not available");

        let err = SettingsError::NoSettingsDir;
        assert_eq!(
            err.to_string(),
            "Could not determine a settings directory for this platform"
        );
    }

    #[test]
    fn test_error_source_chain() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let load_err = AudioError::LoadFailed {
            name: "theme.mp3".to_string(),
            source: Box::new(io_err),
        };

        assert!(load_err.source().is_some());
        assert_eq!(load_err.to_string(), "Failed to load audio clip: theme.mp3");
    }
}
