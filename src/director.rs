//! Audio playback coordinator
//!
//! One director per host. It drains queued commands, owns the fixed music
//! and voice units plus the pooled sound units, and advances everything
//! from the host's update tick. No threads are spawned here: commands can
//! be posted from anywhere, but they only execute inside [`tick`], so
//! listeners always fire on the update thread.
//!
//! [`tick`]: AudioDirector::tick

use std::collections::VecDeque;

use crossbeam_channel::{Receiver, Sender};

use crate::backend::{AssetLoader, AudioBackend, ClipState};
use crate::error::SettingsError;
use crate::messaging::{
    AudioCommand, AudioNotice, MessageRouter, NoticeBus, PlayParams, SubscriberId,
};
use crate::playback::{Channel, PlaybackUnit, UnitId, UnitPhase, UnitPool};
use crate::retained::RetainedAudioSet;
use crate::settings::AudioSettings;
use crate::state::ChannelState;

/// A queue of clips playing back-to-back on one channel
struct SequenceState {
    channel: Channel,
    queue: VecDeque<String>,
    current: Option<UnitId>,
}

/// Audio playback coordinator
///
/// Generic over the host `H`, which supplies playback and asset loading.
/// The bundled [`RodioBackend`](crate::backend::RodioBackend) covers hosts
/// without an engine of their own.
pub struct AudioDirector<H> {
    host: H,
    settings: AudioSettings,
    state: ChannelState,
    router: MessageRouter,
    notices: NoticeBus,
    music: PlaybackUnit,
    voice: PlaybackUnit,
    pool: UnitPool,
    sounds: Vec<PlaybackUnit>,
    sequence: Option<SequenceState>,
    retained: RetainedAudioSet,
}

impl<H: AudioBackend + AssetLoader> AudioDirector<H> {
    /// Create a director driving the given host
    ///
    /// A missing audio output is not fatal: playback requests will fail
    /// and be skipped with a warning until one appears.
    pub fn new(mut host: H, settings: AudioSettings) -> Self {
        if let Err(e) = host.ensure_listener() {
            tracing::warn!("Audio output unavailable, playback will be skipped: {}", e);
        }

        let state = ChannelState::from_settings(&settings);
        let pool = UnitPool::new(settings.max_sound_units);

        Self {
            host,
            state,
            router: MessageRouter::new(),
            notices: NoticeBus::new(),
            music: PlaybackUnit::new(UnitId::new(0), Channel::Music, false),
            voice: PlaybackUnit::new(UnitId::new(1), Channel::Voice, false),
            pool,
            sounds: Vec::new(),
            sequence: None,
            retained: RetainedAudioSet::new(),
            settings,
        }
    }

    /// Queue a command for the next tick
    pub fn post(&self, command: AudioCommand) {
        self.router.post(command);
    }

    /// Queue a payload-less command by its event id
    ///
    /// Returns `false` for ids that cannot be routed; those are dropped
    /// without side effects.
    pub fn post_event_id(&self, event_id: u16) -> bool {
        self.router.post_id(event_id)
    }

    /// Get a sender for posting commands from other threads
    pub fn sender(&self) -> Sender<AudioCommand> {
        self.router.sender()
    }

    /// Subscribe to audio notices
    pub fn subscribe(&self) -> (Receiver<AudioNotice>, SubscriberId) {
        self.notices.subscribe()
    }

    /// Unsubscribe from audio notices
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.notices.unsubscribe(id);
    }

    /// Get a shared handle to the notice bus
    pub fn notice_bus(&self) -> NoticeBus {
        self.notices.clone()
    }

    /// Advance the director by one frame
    ///
    /// Drains queued commands, polls every active unit for started and
    /// finished clips, and moves sequences along. Hosts call this once
    /// per update from the thread that owns the director.
    pub fn tick(&mut self) {
        self.pump();
        self.poll_units();
        self.advance_sequence();
    }

    fn pump(&mut self) {
        for command in self.router.drain() {
            tracing::debug!("Handling command: {}", command.description());
            self.handle(command);
        }
    }

    /// Execute a command immediately, bypassing the queue
    pub fn handle(&mut self, command: AudioCommand) {
        match command {
            AudioCommand::SoundSwitch { on } => self.set_sound_on(on),
            AudioCommand::MusicSwitch { on } => self.set_music_on(on),
            AudioCommand::VoiceSwitch { on } => self.set_voice_on(on),
            AudioCommand::SetSoundVolume { volume } => self.set_sound_volume(volume),
            AudioCommand::SetMusicVolume { volume } => self.set_music_volume(volume),
            AudioCommand::SetVoiceVolume { volume } => self.set_voice_volume(volume),
            AudioCommand::PlayMusic { params } => self.play_music(params),
            AudioCommand::PlaySound { params } => {
                self.play_sound(params);
            }
            AudioCommand::PlayVoice { params } => self.play_voice(params),
            AudioCommand::PauseMusic => self.pause_music(),
            AudioCommand::ResumeMusic => self.resume_music(),
            AudioCommand::StopMusic => self.stop_music(),
            AudioCommand::PauseVoice => self.pause_voice(),
            AudioCommand::StopVoice => self.stop_voice(),
            AudioCommand::StopAllSounds => self.stop_all_sounds(),
            AudioCommand::PlaySequence { channel, clips } => self.play_sequence(channel, clips),
            AudioCommand::AddRetained { name } => self.add_retained(&name),
            AudioCommand::RemoveRetained { name } => self.remove_retained(&name),
        }
    }

    /// Play a music track on the fixed music unit
    ///
    /// The track is remembered before the switch check, so turning music
    /// back on later replays it. When music is off and the request does
    /// not insist, both listeners still fire and nothing plays.
    pub fn play_music(&mut self, mut params: PlayParams) {
        if params.name.is_empty() {
            tracing::warn!("Ignoring music request with empty clip name");
            return;
        }

        self.state.remember_music(&params.name);

        if !self.state.is_on(Channel::Music) && !params.even_if_off {
            tracing::debug!("Music is off, skipping {}", params.name);
            if let Some(listener) = params.on_start.take() {
                listener();
            }
            if let Some(listener) = params.on_finish.take() {
                listener();
            }
            return;
        }

        // A direct play commandeers the exclusive channel, sequence included
        self.cancel_sequence_on(Channel::Music);
        self.start_fixed(Channel::Music, params);
    }

    /// Play a sound effect on a pooled unit
    ///
    /// Returns the unit id, or `None` when the request was skipped: sound
    /// off, empty name, pool exhausted, or the backend refused the clip.
    pub fn play_sound(&mut self, mut params: PlayParams) -> Option<UnitId> {
        if !self.state.is_on(Channel::Sound) {
            tracing::debug!("Sound is off, skipping {}", params.name);
            return None;
        }

        if params.name.is_empty() {
            tracing::warn!("Ignoring sound request with empty clip name");
            return None;
        }

        let Some(mut unit) = self.pool.allocate() else {
            tracing::warn!(
                "Sound pool exhausted ({} units), skipping {}",
                self.pool.capacity(),
                params.name
            );
            return None;
        };

        let volume = params.volume.unwrap_or(self.settings.sound_volume);
        unit.arm(&params.name, params.looping, volume);

        match self.host.play_clip(&params.name, params.looping) {
            Ok(handle) => {
                unit.attach(handle);
                self.host.set_clip_volume(handle, unit.volume());
                unit.set_custom_event_id(params.custom_event_id);
                if let Some(listener) = params.on_start.take() {
                    unit.set_on_start(listener);
                }
                if let Some(listener) = params.on_finish.take() {
                    unit.set_on_finish(listener);
                }

                let id = unit.id();
                self.sounds.push(unit);
                Some(id)
            }
            Err(e) => {
                tracing::warn!("Could not start sound {}: {}", params.name, e);
                self.pool.release(unit);
                None
            }
        }
    }

    /// Play a voice line on the fixed voice unit
    pub fn play_voice(&mut self, params: PlayParams) {
        if params.name.is_empty() {
            tracing::warn!("Ignoring voice request with empty clip name");
            return;
        }

        if !self.state.is_on(Channel::Voice) {
            tracing::debug!("Voice is off, skipping {}", params.name);
            return;
        }

        self.cancel_sequence_on(Channel::Voice);
        self.start_fixed(Channel::Voice, params);
    }

    fn start_fixed(&mut self, channel: Channel, mut params: PlayParams) {
        let volume = params
            .volume
            .unwrap_or_else(|| self.settings.volume(channel));

        let host = &mut self.host;
        let unit = match channel {
            Channel::Music => &mut self.music,
            Channel::Voice => &mut self.voice,
            Channel::Sound => return, // Pooled requests go through play_sound
        };

        // One clip at a time on a fixed channel: the replaced clip stops
        // without ceremony, its listeners die with the reset inside arm
        if let Some(handle) = unit.handle() {
            host.stop_clip(handle);
        }

        unit.arm(&params.name, params.looping, volume);

        match host.play_clip(&params.name, params.looping) {
            Ok(handle) => {
                unit.attach(handle);
                host.set_clip_volume(handle, unit.volume());
                unit.set_custom_event_id(params.custom_event_id);
                if let Some(listener) = params.on_start.take() {
                    unit.set_on_start(listener);
                }
                if let Some(listener) = params.on_finish.take() {
                    unit.set_on_finish(listener);
                }

                tracing::info!("Playing {} on {}", params.name, channel);
            }
            Err(e) => {
                tracing::warn!("Could not start {} on {}: {}", params.name, channel, e);
                unit.reset();
            }
        }
    }

    /// Toggle the sound channel. Setting the same value again is a no-op.
    ///
    /// Clips already in flight keep playing; the switch only gates new
    /// requests.
    pub fn set_sound_on(&mut self, on: bool) {
        if self.state.is_on(Channel::Sound) == on {
            return;
        }

        self.state.set_on(Channel::Sound, on);
        self.settings.sound_on = on;
        self.notices.publish(AudioNotice::SwitchChanged {
            channel: Channel::Sound,
            on,
        });
    }

    /// Toggle the music channel. Setting the same value again is a no-op.
    ///
    /// Turning music off stops the current track; turning it back on
    /// replays the remembered one, looped.
    pub fn set_music_on(&mut self, on: bool) {
        if self.state.is_on(Channel::Music) == on {
            return;
        }

        self.state.set_on(Channel::Music, on);
        self.settings.music_on = on;
        self.notices.publish(AudioNotice::SwitchChanged {
            channel: Channel::Music,
            on,
        });

        if on {
            if let Some(name) = self.state.current_music() {
                let name = name.to_string();
                tracing::info!("Music back on, replaying {}", name);
                self.start_fixed(Channel::Music, PlayParams::clip(name).looped());
            }
        } else {
            self.cancel_sequence_on(Channel::Music);
            Self::stop_unit(&mut self.host, &mut self.music);
        }
    }

    /// Toggle the voice channel. Setting the same value again is a no-op.
    ///
    /// Clips already in flight keep playing; the switch only gates new
    /// requests.
    pub fn set_voice_on(&mut self, on: bool) {
        if self.state.is_on(Channel::Voice) == on {
            return;
        }

        self.state.set_on(Channel::Voice, on);
        self.settings.voice_on = on;
        self.notices.publish(AudioNotice::SwitchChanged {
            channel: Channel::Voice,
            on,
        });
    }

    /// Set the sound volume, applying it to every active pooled unit
    pub fn set_sound_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        if self.settings.sound_volume == volume {
            return;
        }

        self.settings.sound_volume = volume;
        for unit in self.sounds.iter_mut() {
            if let Some(handle) = unit.handle() {
                self.host.set_clip_volume(handle, volume);
            }
            unit.set_volume(volume);
        }

        self.notices.publish(AudioNotice::VolumeChanged {
            channel: Channel::Sound,
            volume,
        });
    }

    /// Set the music volume, applying it to the live track
    pub fn set_music_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        if self.settings.music_volume == volume {
            return;
        }

        self.settings.music_volume = volume;
        if let Some(handle) = self.music.handle() {
            self.host.set_clip_volume(handle, volume);
        }
        self.music.set_volume(volume);

        self.notices.publish(AudioNotice::VolumeChanged {
            channel: Channel::Music,
            volume,
        });
    }

    /// Set the voice volume, applying it to the live line
    pub fn set_voice_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        if self.settings.voice_volume == volume {
            return;
        }

        self.settings.voice_volume = volume;
        if let Some(handle) = self.voice.handle() {
            self.host.set_clip_volume(handle, volume);
        }
        self.voice.set_volume(volume);

        self.notices.publish(AudioNotice::VolumeChanged {
            channel: Channel::Voice,
            volume,
        });
    }

    /// Pause the music unit. No-op when nothing is playing.
    pub fn pause_music(&mut self) {
        if let Some(handle) = self.music.handle() {
            self.host.pause_clip(handle);
        }
    }

    /// Resume the music unit. No-op when nothing is paused.
    pub fn resume_music(&mut self) {
        if let Some(handle) = self.music.handle() {
            self.host.resume_clip(handle);
        }
    }

    /// Stop the music unit without firing its listeners
    ///
    /// The remembered track survives, so a later music-on still replays it.
    pub fn stop_music(&mut self) {
        self.cancel_sequence_on(Channel::Music);
        Self::stop_unit(&mut self.host, &mut self.music);
    }

    /// Pause the voice unit. No-op when nothing is playing.
    pub fn pause_voice(&mut self) {
        if let Some(handle) = self.voice.handle() {
            self.host.pause_clip(handle);
        }
    }

    /// Stop the voice unit without firing its listeners
    pub fn stop_voice(&mut self) {
        self.cancel_sequence_on(Channel::Voice);
        Self::stop_unit(&mut self.host, &mut self.voice);
    }

    /// Stop every pooled sound unit and return them to the pool
    pub fn stop_all_sounds(&mut self) {
        self.cancel_sequence_on(Channel::Sound);

        for unit in self.sounds.drain(..) {
            if let Some(handle) = unit.handle() {
                self.host.stop_clip(handle);
            }
            self.pool.release(unit);
        }

        tracing::debug!("Stopped all pooled sounds");
    }

    /// Play clips back-to-back on one channel
    ///
    /// The first clip starts immediately and each finish starts the next.
    /// Clips that cannot start (channel off, pool exhausted, backend
    /// refusal) are skipped. A new sequence replaces any active one.
    pub fn play_sequence(&mut self, channel: Channel, clips: Vec<String>) {
        let queue: VecDeque<String> = clips.into_iter().filter(|c| !c.is_empty()).collect();
        if queue.is_empty() {
            tracing::warn!("Ignoring empty sequence for {}", channel);
            return;
        }

        if self.sequence.is_some() {
            tracing::debug!("Replacing active sequence");
        }

        tracing::info!("Starting sequence of {} clips on {}", queue.len(), channel);
        self.sequence = Some(SequenceState {
            channel,
            queue,
            current: None,
        });
        self.advance_sequence();
    }

    /// Add a clip to the retained set, loading it on first insertion
    pub fn add_retained(&mut self, name: &str) {
        if name.is_empty() {
            tracing::warn!("Ignoring retain request with empty clip name");
            return;
        }

        self.retained.add(&mut self.host, name);
    }

    /// Remove a clip from the retained set, releasing it if present
    pub fn remove_retained(&mut self, name: &str) {
        if name.is_empty() {
            tracing::warn!("Ignoring release request with empty clip name");
            return;
        }

        self.retained.remove(&mut self.host, name);
    }

    /// Set every channel switch at once
    pub fn set_all_on(&mut self, on: bool) {
        self.set_sound_on(on);
        self.set_voice_on(on);
        self.set_music_on(on);
    }

    /// Persisted settings, reflecting switch and volume changes so far
    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    /// Write the current settings to disk
    pub fn save_settings(&self) -> Result<(), SettingsError> {
        self.settings.save()
    }

    /// Runtime channel state, remembered music track included
    pub fn state(&self) -> &ChannelState {
        &self.state
    }

    /// The host driving playback
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Clip bound to the music unit right now, if any
    pub fn music_clip(&self) -> Option<&str> {
        self.music.clip()
    }

    /// Clip bound to the voice unit right now, if any
    pub fn voice_clip(&self) -> Option<&str> {
        self.voice.clip()
    }

    /// Number of pooled sound units in flight
    pub fn active_sounds(&self) -> usize {
        self.sounds.len()
    }

    /// Check if a sequence is still working through its queue
    pub fn is_sequence_active(&self) -> bool {
        self.sequence.is_some()
    }

    /// Names currently held in the retained set
    pub fn retained_clips(&self) -> &[String] {
        self.retained.names()
    }

    fn stop_unit(host: &mut H, unit: &mut PlaybackUnit) {
        if let Some(handle) = unit.handle() {
            host.stop_clip(handle);
        }
        unit.reset();
    }

    fn cancel_sequence_on(&mut self, channel: Channel) {
        let matches = self
            .sequence
            .as_ref()
            .map(|s| s.channel == channel)
            .unwrap_or(false);

        if matches {
            tracing::debug!("Cancelling {} sequence", channel);
            self.sequence = None;
        }
    }

    fn poll_units(&mut self) {
        if Self::poll_unit(&mut self.host, &self.notices, &mut self.music) {
            self.note_sequence_finish(Channel::Music, self.music.id());
        }
        if Self::poll_unit(&mut self.host, &self.notices, &mut self.voice) {
            self.note_sequence_finish(Channel::Voice, self.voice.id());
        }

        // Walked backwards so swap_remove never skips an element
        let mut finished: Vec<UnitId> = Vec::new();
        let mut i = self.sounds.len();
        while i > 0 {
            i -= 1;
            if Self::poll_unit(&mut self.host, &self.notices, &mut self.sounds[i]) {
                let unit = self.sounds.swap_remove(i);
                finished.push(unit.id());
                self.pool.release(unit);
            }
        }

        for id in finished {
            self.note_sequence_finish(Channel::Sound, id);
        }
    }

    /// Poll one unit, firing listeners and notices for observed
    /// transitions. Returns `true` when the unit finished and was reset.
    fn poll_unit(host: &mut H, notices: &NoticeBus, unit: &mut PlaybackUnit) -> bool {
        let Some(handle) = unit.handle() else {
            return false;
        };

        match host.clip_state(handle) {
            ClipState::Loading | ClipState::Paused => false,
            ClipState::Playing => {
                if unit.phase() == UnitPhase::Pending {
                    Self::fire_started(notices, unit);
                }
                false
            }
            ClipState::Finished => {
                // A short clip can finish between polls; the start side
                // fires first so paired listeners never go missing
                if unit.phase() == UnitPhase::Pending {
                    Self::fire_started(notices, unit);
                }

                if let Some(listener) = unit.take_on_finish() {
                    listener();
                }
                if let Some(event_id) = unit.custom_event_id() {
                    notices.publish(AudioNotice::Custom { event_id });
                }
                notices.publish(AudioNotice::PlaybackFinished {
                    channel: unit.channel(),
                    clip: unit.clip().unwrap_or("").to_string(),
                });

                host.stop_clip(handle);
                unit.reset();
                true
            }
            ClipState::Failed => {
                tracing::warn!(
                    "Clip {} failed on {}, recycling unit",
                    unit.clip().unwrap_or(""),
                    unit.channel()
                );
                host.stop_clip(handle);
                unit.reset();
                true
            }
        }
    }

    fn fire_started(notices: &NoticeBus, unit: &mut PlaybackUnit) {
        unit.mark_playing();
        if let Some(listener) = unit.take_on_start() {
            listener();
        }
        notices.publish(AudioNotice::PlaybackStarted {
            channel: unit.channel(),
            clip: unit.clip().unwrap_or("").to_string(),
        });
    }

    fn advance_sequence(&mut self) {
        let Some(mut seq) = self.sequence.take() else {
            return;
        };

        if seq.current.is_none() {
            while let Some(clip) = seq.queue.pop_front() {
                match self.start_sequence_clip(seq.channel, &clip) {
                    Some(id) => {
                        seq.current = Some(id);
                        break;
                    }
                    None => tracing::debug!("Sequence clip {} skipped", clip),
                }
            }

            if seq.current.is_none() {
                tracing::debug!("Sequence on {} complete", seq.channel);
                return;
            }
        }

        self.sequence = Some(seq);
    }

    fn start_sequence_clip(&mut self, channel: Channel, clip: &str) -> Option<UnitId> {
        match channel {
            Channel::Music => {
                if !self.state.is_on(Channel::Music) {
                    return None;
                }
                self.state.remember_music(clip);
                self.start_fixed(Channel::Music, PlayParams::clip(clip));
                if self.music.is_active() {
                    Some(self.music.id())
                } else {
                    None
                }
            }
            Channel::Voice => {
                if !self.state.is_on(Channel::Voice) {
                    return None;
                }
                self.start_fixed(Channel::Voice, PlayParams::clip(clip));
                if self.voice.is_active() {
                    Some(self.voice.id())
                } else {
                    None
                }
            }
            Channel::Sound => self.play_sound(PlayParams::clip(clip)),
        }
    }

    fn note_sequence_finish(&mut self, channel: Channel, id: UnitId) {
        if let Some(seq) = self.sequence.as_mut() {
            if seq.channel == channel && seq.current == Some(id) {
                seq.current = None;
            }
        }
    }
}
