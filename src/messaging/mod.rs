//! Messaging module for the command/notice architecture
//!
//! This module implements command/notice segregation:
//! - **Commands**: Requests to perform actions (imperative, queued)
//! - **Notices**: Notifications of things that happened (past tense, broadcast)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────┐    Command     ┌──────────┐    Notice     ┌────────────┐
//! │  Host   │ ─────────────> │ Director │ ────────────> │ Notice Bus │
//! │ modules │                │  (tick)  │               │            │
//! └─────────┘                └──────────┘               └────────────┘
//!                                                              │
//!                                                              │ Broadcasts
//!                                                              ▼
//!                                                       ┌─────────────┐
//!                                                       │ Subscribers │
//!                                                       │ (UI, game   │
//!                                                       │  systems)   │
//!                                                       └─────────────┘
//! ```
//!
//! Commands can be posted from any thread through a router sender, but
//! they only execute when the director drains the queue during its tick.
//!
//! ## Usage
//!
//! ```rust,ignore
//! // Queue commands, by value or by bare event id
//! director.post(AudioCommand::PlayMusic {
//!     params: PlayParams::clip("theme.mp3").looped(),
//! });
//! director.post_event_id(412); // StopMusic
//!
//! // Watch for notices
//! let (rx, _id) = director.subscribe();
//! while let Ok(notice) = rx.try_recv() {
//!     match notice {
//!         AudioNotice::PlaybackFinished { clip, .. } => { /* react */ }
//!         _ => {}
//!     }
//! }
//! ```

pub mod bus;
pub mod commands;
pub mod events;
pub mod router;

// Re-export commonly used types
pub use bus::{NoticeBus, SubscriberId};
pub use commands::{AudioCommand, PlayParams};
pub use events::{is_audio_event_id, AudioNotice, EVENT_ID_BEGAN, EVENT_ID_ENDED};
pub use router::MessageRouter;
