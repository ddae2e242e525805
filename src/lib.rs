//! Audio playback coordination for game hosts
//!
//! Routes integer-keyed commands to three playback channels (music, voice,
//! sound effects), recycles pooled playback units, keeps retained assets
//! resident, and reports clip lifecycle through a notice bus. Everything
//! advances from the host's own update tick; the crate spawns no threads.
//!
//! ## Architecture
//!
//! ```text
//!  any thread                     update thread
//! ┌──────────────┐   queue   ┌──────────────────────────────┐
//! │ AudioCommand │ ────────> │ AudioDirector::tick          │
//! │ (or bare id) │           │   1. drain + handle commands │
//! └──────────────┘           │   2. poll units, fire        │
//!                            │      listeners and notices   │
//!                            │   3. advance sequences       │
//!                            └──────────────┬───────────────┘
//!                                           │ AudioBackend +
//!                                           │ AssetLoader
//!                                           ▼
//!                                  host engine (rodio
//!                                  implementation bundled)
//! ```
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use audio_director::{AudioDirector, AudioSettings, PlayParams, RodioBackend};
//!
//! let backend = RodioBackend::new("assets/audio");
//! let mut director = AudioDirector::new(backend, AudioSettings::default());
//!
//! director.play_music(PlayParams::clip("theme.mp3").looped());
//!
//! loop {
//!     director.tick();
//!     // ... rest of the frame
//! }
//! ```

pub mod backend;
pub mod director;
pub mod error;
pub mod messaging;
pub mod playback;
pub mod retained;
pub mod settings;
pub mod state;

// Re-export the types hosts touch day to day
pub use backend::{AssetLoader, AudioBackend, ClipHandle, ClipState, RodioBackend};
pub use director::AudioDirector;
pub use error::{AudioError, AudioResult, SettingsError};
pub use messaging::{AudioCommand, AudioNotice, MessageRouter, NoticeBus, PlayParams, SubscriberId};
pub use playback::{Channel, UnitId};
pub use retained::RetainedAudioSet;
pub use settings::AudioSettings;
pub use state::ChannelState;
