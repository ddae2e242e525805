//! Playback bookkeeping
//!
//! Channels, playback units, and the pool that recycles sound units.

pub mod channel;
pub mod pool;
pub mod unit;

pub use channel::Channel;
pub use pool::UnitPool;
pub use unit::{Listener, PlaybackUnit, UnitId, UnitPhase};
