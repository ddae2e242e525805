//! Host integration seams
//!
//! The director never talks to an audio library directly. Hosts implement
//! [`AudioBackend`] for playback control and [`AssetLoader`] for retained
//! asset lifetimes; a rodio-backed implementation ships in [`rodio`].

pub mod rodio;

pub use self::rodio::RodioBackend;

use crate::error::AudioError;

/// Handle to a clip started at the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipHandle(u32);

impl ClipHandle {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Observed state of a started clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipState {
    /// Asset still loading, nothing audible yet
    Loading,

    /// Clip is audible
    Playing,

    /// Paused mid-clip, position kept
    Paused,

    /// Ran to completion or was stopped
    Finished,

    /// Asset could not be loaded or decoded
    Failed,
}

/// Playback engine seam
///
/// Handles are the only currency between the director and the engine. The
/// director polls [`clip_state`](AudioBackend::clip_state) once per tick
/// and reacts to transitions; backends never call back into the director.
pub trait AudioBackend {
    /// Make sure an audio output exists, creating one if missing
    fn ensure_listener(&mut self) -> Result<(), AudioError>;

    /// Check whether an audio output exists
    fn has_listener(&self) -> bool;

    /// Start a clip by name, returning a handle for later control
    fn play_clip(&mut self, name: &str, looping: bool) -> Result<ClipHandle, AudioError>;

    /// Observe the state of a started clip
    ///
    /// Handles the backend no longer knows report `Finished`.
    fn clip_state(&self, handle: ClipHandle) -> ClipState;

    /// Stop a clip and release its resources. Safe on finished or
    /// unknown handles.
    fn stop_clip(&mut self, handle: ClipHandle);

    /// Pause a clip, keeping its position
    fn pause_clip(&mut self, handle: ClipHandle);

    /// Resume a paused clip
    fn resume_clip(&mut self, handle: ClipHandle);

    /// Set the playback volume of a clip (0.0-1.0)
    fn set_clip_volume(&mut self, handle: ClipHandle, volume: f32);
}

/// Asset lifetime seam for retained clips
///
/// Load requests are fire-and-forget: the loader resolves them in its own
/// time and playback of a name that is still loading simply starts late.
pub trait AssetLoader {
    /// Ask the host to load a clip's asset and keep it resident
    fn request_load(&mut self, name: &str);

    /// Tell the host a previously retained asset may be released
    fn release(&mut self, name: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_handle_identity() {
        let a = ClipHandle::new(1);
        let b = ClipHandle::new(1);
        let c = ClipHandle::new(2);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(c.id(), 2);
    }
}
