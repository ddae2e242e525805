//! Message router
//!
//! Queues commands from any thread for the director to drain on its own
//! update thread. Unlike a worker setup there is no processing thread
//! here: execution always happens inside the host's tick.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::commands::AudioCommand;

/// Command queue between hosts and the director
pub struct MessageRouter {
    command_tx: Sender<AudioCommand>,
    command_rx: Receiver<AudioCommand>,
}

impl MessageRouter {
    /// Create a new router
    pub fn new() -> Self {
        let (tx, rx) = unbounded();

        Self {
            command_tx: tx,
            command_rx: rx,
        }
    }

    /// Get a sender for submitting commands from other threads
    pub fn sender(&self) -> Sender<AudioCommand> {
        self.command_tx.clone()
    }

    /// Queue a command for the next drain
    pub fn post(&self, command: AudioCommand) {
        // Queue outlives every sender, so this cannot fail
        let _ = self.command_tx.send(command);
    }

    /// Queue a command by bare event id
    ///
    /// Returns `false` for ids that cannot be routed: unknown ids, block
    /// markers, and commands that need a payload. Those are dropped
    /// without side effects.
    pub fn post_id(&self, event_id: u16) -> bool {
        match AudioCommand::from_event_id(event_id) {
            Some(command) => {
                self.post(command);
                true
            }
            None => {
                tracing::trace!("Dropping unroutable event id {}", event_id);
                false
            }
        }
    }

    /// Take every queued command, in posting order
    pub fn drain(&self) -> Vec<AudioCommand> {
        self.command_rx.try_iter().collect()
    }

    /// Number of commands waiting in the queue
    pub fn pending(&self) -> usize {
        self.command_rx.len()
    }
}

impl Default for MessageRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_drains_in_order() {
        let router = MessageRouter::new();
        router.post(AudioCommand::PauseMusic);
        router.post(AudioCommand::ResumeMusic);
        assert_eq!(router.pending(), 2);

        let drained = router.drain();
        assert_eq!(drained.len(), 2);
        assert!(matches!(drained[0], AudioCommand::PauseMusic));
        assert!(matches!(drained[1], AudioCommand::ResumeMusic));
        assert_eq!(router.pending(), 0);
    }

    #[test]
    fn test_post_by_event_id() {
        let router = MessageRouter::new();
        assert!(router.post_id(412));

        let drained = router.drain();
        assert_eq!(drained.len(), 1);
        assert!(matches!(drained[0], AudioCommand::StopMusic));
    }

    #[test]
    fn test_unroutable_ids_are_dropped() {
        let router = MessageRouter::new();
        assert!(!router.post_id(0));
        assert!(!router.post_id(407)); // Needs a payload
        assert!(!router.post_id(9999));
        assert_eq!(router.pending(), 0);
    }

    #[test]
    fn test_sender_posts_across_threads() {
        let router = MessageRouter::new();
        let sender = router.sender();

        let handle = std::thread::spawn(move || {
            sender.send(AudioCommand::StopAllSounds).unwrap();
        });
        handle.join().unwrap();

        let drained = router.drain();
        assert_eq!(drained.len(), 1);
        assert!(matches!(drained[0], AudioCommand::StopAllSounds));
    }

    #[test]
    fn test_drain_on_empty_queue() {
        let router = MessageRouter::new();
        assert!(router.drain().is_empty());
    }
}
