//! Rodio-backed playback
//!
//! Default backend for hosts without an engine of their own. Clips are read
//! from a root directory into an in-memory byte cache and decoded on play,
//! with one sink per active clip.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::error::AudioError;

use super::{AssetLoader, AudioBackend, ClipHandle, ClipState};

/// Rodio implementation of the backend seams
pub struct RodioBackend {
    root: PathBuf,
    _stream: Option<OutputStream>,
    stream_handle: Option<OutputStreamHandle>,
    cache: HashMap<String, Arc<Vec<u8>>>,
    active: HashMap<ClipHandle, Sink>,
    next_id: u32,
}

impl RodioBackend {
    /// Create a backend that resolves clip names under `root`
    ///
    /// The output stream is opened lazily on first use, so constructing a
    /// backend never touches audio hardware.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            _stream: None,
            stream_handle: None,
            cache: HashMap::new(),
            active: HashMap::new(),
            next_id: 0,
        }
    }

    /// Number of clips currently held by sinks
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of clip assets resident in the cache
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    fn clip_bytes(&mut self, name: &str) -> Result<Arc<Vec<u8>>, AudioError> {
        if let Some(bytes) = self.cache.get(name) {
            return Ok(Arc::clone(bytes));
        }

        let path = self.root.join(name);
        let data = std::fs::read(&path).map_err(|e| AudioError::LoadFailed {
            name: name.to_string(),
            source: Box::new(e),
        })?;

        tracing::info!("Loaded clip {}: {} bytes", name, data.len());
        let bytes = Arc::new(data);
        self.cache.insert(name.to_string(), Arc::clone(&bytes));
        Ok(bytes)
    }
}

impl AudioBackend for RodioBackend {
    fn ensure_listener(&mut self) -> Result<(), AudioError> {
        if self.stream_handle.is_some() {
            return Ok(());
        }

        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::StreamInitFailed(Box::new(e)))?;
        self._stream = Some(stream);
        self.stream_handle = Some(handle);

        tracing::info!("Audio output stream initialized");
        Ok(())
    }

    fn has_listener(&self) -> bool {
        self.stream_handle.is_some()
    }

    fn play_clip(&mut self, name: &str, looping: bool) -> Result<ClipHandle, AudioError> {
        self.ensure_listener()?;
        let bytes = self.clip_bytes(name)?;

        let stream_handle = self
            .stream_handle
            .as_ref()
            .ok_or(AudioError::OutputUnavailable)?;
        let sink =
            Sink::try_new(stream_handle).map_err(|e| AudioError::PlaybackFailed(Box::new(e)))?;

        // Decoder wants ownership of the bytes for 'static playback
        let cursor = Cursor::new((*bytes).clone());
        let decoder = Decoder::new(cursor).map_err(|e| AudioError::DecodeFailed {
            name: name.to_string(),
            source: Box::new(e),
        })?;

        if looping {
            sink.append(decoder.repeat_infinite());
        } else {
            sink.append(decoder);
        }

        let handle = ClipHandle::new(self.next_id);
        self.next_id += 1;
        self.active.insert(handle, sink);

        tracing::debug!("Started clip {} (handle {}, looping={})", name, handle.id(), looping);
        Ok(handle)
    }

    fn clip_state(&self, handle: ClipHandle) -> ClipState {
        match self.active.get(&handle) {
            Some(sink) if sink.empty() => ClipState::Finished,
            Some(sink) if sink.is_paused() => ClipState::Paused,
            Some(_) => ClipState::Playing,
            None => ClipState::Finished,
        }
    }

    fn stop_clip(&mut self, handle: ClipHandle) {
        if let Some(sink) = self.active.remove(&handle) {
            sink.stop();
            tracing::debug!("Stopped clip handle {}", handle.id());
        }
    }

    fn pause_clip(&mut self, handle: ClipHandle) {
        if let Some(sink) = self.active.get(&handle) {
            sink.pause();
        }
    }

    fn resume_clip(&mut self, handle: ClipHandle) {
        if let Some(sink) = self.active.get(&handle) {
            sink.play();
        }
    }

    fn set_clip_volume(&mut self, handle: ClipHandle, volume: f32) {
        if let Some(sink) = self.active.get(&handle) {
            sink.set_volume(volume.clamp(0.0, 1.0));
        }
    }
}

impl AssetLoader for RodioBackend {
    fn request_load(&mut self, name: &str) {
        // Loads happen inline; a miss is logged and playback will retry
        if let Err(e) = self.clip_bytes(name) {
            tracing::warn!("Retained load of {} failed: {}", name, e);
        }
    }

    fn release(&mut self, name: &str) {
        if self.cache.remove(name).is_some() {
            tracing::debug!("Released cached clip {}", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: Playback tests need actual audio hardware, so these stick to
    // the parts that run without an output stream.

    #[test]
    fn test_backend_starts_without_output() {
        let backend = RodioBackend::new("assets");
        assert!(!backend.has_listener());
        assert_eq!(backend.active_count(), 0);
        assert_eq!(backend.cached_count(), 0);
    }

    #[test]
    fn test_unknown_handle_reports_finished() {
        let backend = RodioBackend::new("assets");
        assert_eq!(backend.clip_state(ClipHandle::new(42)), ClipState::Finished);
    }

    #[test]
    fn test_stop_unknown_handle_is_safe() {
        let mut backend = RodioBackend::new("assets");
        backend.stop_clip(ClipHandle::new(42));
        backend.pause_clip(ClipHandle::new(42));
        backend.resume_clip(ClipHandle::new(42));
    }

    #[test]
    fn test_load_missing_clip_fails() {
        let mut backend = RodioBackend::new("/nonexistent");
        let err = backend.clip_bytes("missing.mp3").unwrap_err();
        assert!(matches!(err, AudioError::LoadFailed { .. }));
    }

    #[test]
    fn test_release_missing_clip_is_safe() {
        let mut backend = RodioBackend::new("assets");
        backend.release("never-loaded.mp3");
        assert_eq!(backend.cached_count(), 0);
    }
}
