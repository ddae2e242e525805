//! Playback units
//!
//! A playback unit is one slot of playback bookkeeping: the clip it was
//! armed with, the backend handle once started, and the one-shot start and
//! finish listeners attached to the request.

use std::fmt;

use crate::backend::ClipHandle;

use super::channel::Channel;

/// One-shot callback attached to a playback request
pub type Listener = Box<dyn FnOnce() + Send>;

/// Identifier for a playback unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId(u32);

impl UnitId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Lifecycle phase of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitPhase {
    /// Not bound to a clip
    Idle,

    /// Started at the backend, start listener not fired yet
    Pending,

    /// Observed playing, start listener fired
    Playing,
}

/// A single playback slot
///
/// Listeners are taken out exactly once when fired, so a unit reused for a
/// later clip can never re-invoke callbacks from an earlier request.
pub struct PlaybackUnit {
    id: UnitId,
    channel: Channel,
    pooled: bool,
    clip: Option<String>,
    handle: Option<ClipHandle>,
    looping: bool,
    volume: f32,
    custom_event_id: Option<u16>,
    on_start: Option<Listener>,
    on_finish: Option<Listener>,
    phase: UnitPhase,
}

impl PlaybackUnit {
    /// Create an idle unit bound to a channel
    pub fn new(id: UnitId, channel: Channel, pooled: bool) -> Self {
        Self {
            id,
            channel,
            pooled,
            clip: None,
            handle: None,
            looping: false,
            volume: 1.0,
            custom_event_id: None,
            on_start: None,
            on_finish: None,
            phase: UnitPhase::Idle,
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Check if this unit returns to the pool after its clip finishes
    pub fn is_pooled(&self) -> bool {
        self.pooled
    }

    /// Name of the clip the unit is currently bound to
    pub fn clip(&self) -> Option<&str> {
        self.clip.as_deref()
    }

    pub fn handle(&self) -> Option<ClipHandle> {
        self.handle
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn phase(&self) -> UnitPhase {
        self.phase
    }

    pub fn custom_event_id(&self) -> Option<u16> {
        self.custom_event_id
    }

    /// Check if the unit holds a live backend handle
    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Bind the unit to a new clip request
    ///
    /// Clears all state from any previous request first, including stale
    /// listeners that were never fired.
    pub fn arm(&mut self, clip: &str, looping: bool, volume: f32) {
        self.reset();
        self.clip = Some(clip.to_string());
        self.looping = looping;
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Record the backend handle after a successful start
    pub fn attach(&mut self, handle: ClipHandle) {
        self.handle = Some(handle);
        self.phase = UnitPhase::Pending;
    }

    /// Mark the start listener as fired
    pub fn mark_playing(&mut self) {
        self.phase = UnitPhase::Playing;
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_custom_event_id(&mut self, event_id: Option<u16>) {
        self.custom_event_id = event_id;
    }

    pub fn set_on_start(&mut self, listener: Listener) {
        self.on_start = Some(listener);
    }

    pub fn set_on_finish(&mut self, listener: Listener) {
        self.on_finish = Some(listener);
    }

    /// Take the start listener, leaving the slot empty
    pub fn take_on_start(&mut self) -> Option<Listener> {
        self.on_start.take()
    }

    /// Take the finish listener, leaving the slot empty
    pub fn take_on_finish(&mut self) -> Option<Listener> {
        self.on_finish.take()
    }

    /// Return the unit to its idle state
    ///
    /// Identity (id, channel, pooled flag) survives; everything tied to the
    /// last request is dropped, listeners included.
    pub fn reset(&mut self) {
        self.clip = None;
        self.handle = None;
        self.looping = false;
        self.volume = 1.0;
        self.custom_event_id = None;
        self.on_start = None;
        self.on_finish = None;
        self.phase = UnitPhase::Idle;
    }
}

impl fmt::Debug for PlaybackUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackUnit")
            .field("id", &self.id)
            .field("channel", &self.channel)
            .field("pooled", &self.pooled)
            .field("clip", &self.clip)
            .field("handle", &self.handle)
            .field("looping", &self.looping)
            .field("volume", &self.volume)
            .field("phase", &self.phase)
            .field("has_on_start", &self.on_start.is_some())
            .field("has_on_finish", &self.on_finish.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_unit_starts_idle() {
        let unit = PlaybackUnit::new(UnitId::new(0), Channel::Music, false);
        assert_eq!(unit.phase(), UnitPhase::Idle);
        assert!(!unit.is_active());
        assert!(unit.clip().is_none());
    }

    #[test]
    fn test_arm_and_attach() {
        let mut unit = PlaybackUnit::new(UnitId::new(1), Channel::Sound, true);
        unit.arm("hit.mp3", false, 0.8);
        assert_eq!(unit.clip(), Some("hit.mp3"));
        assert_eq!(unit.volume(), 0.8);
        assert_eq!(unit.phase(), UnitPhase::Idle);

        unit.attach(ClipHandle::new(7));
        assert_eq!(unit.phase(), UnitPhase::Pending);
        assert!(unit.is_active());
    }

    #[test]
    fn test_arm_clamps_volume() {
        let mut unit = PlaybackUnit::new(UnitId::new(1), Channel::Sound, true);
        unit.arm("hit.mp3", false, 1.5);
        assert_eq!(unit.volume(), 1.0);
    }

    #[test]
    fn test_take_listener_clears_slot() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = Arc::clone(&fired);

        let mut unit = PlaybackUnit::new(UnitId::new(2), Channel::Voice, false);
        unit.set_on_finish(Box::new(move || {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        }));

        let listener = unit.take_on_finish().unwrap();
        listener();
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // Slot is empty now, a second take returns nothing
        assert!(unit.take_on_finish().is_none());
    }

    #[test]
    fn test_arm_drops_stale_listeners() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = Arc::clone(&fired);

        let mut unit = PlaybackUnit::new(UnitId::new(3), Channel::Sound, true);
        unit.set_on_start(Box::new(move || {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        }));

        // Re-arming for a new clip must not carry the old listener over
        unit.arm("next.mp3", false, 1.0);
        assert!(unit.take_on_start().is_none());
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_reset_keeps_identity() {
        let mut unit = PlaybackUnit::new(UnitId::new(4), Channel::Sound, true);
        unit.arm("hit.mp3", true, 0.5);
        unit.attach(ClipHandle::new(1));
        unit.set_custom_event_id(Some(900));

        unit.reset();
        assert_eq!(unit.id(), UnitId::new(4));
        assert_eq!(unit.channel(), Channel::Sound);
        assert!(unit.is_pooled());
        assert!(unit.clip().is_none());
        assert!(!unit.is_active());
        assert!(unit.custom_event_id().is_none());
        assert_eq!(unit.phase(), UnitPhase::Idle);
    }
}
