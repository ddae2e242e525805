//! Notice bus for pub/sub messaging
//!
//! Allows host modules to subscribe to audio notices and receive every
//! broadcast without the director knowing who listens.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;

use super::events::AudioNotice;

/// Subscriber ID for tracking subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

/// Notice subscriber
struct Subscriber {
    id: SubscriberId,
    sender: Sender<AudioNotice>,
}

/// Notice bus for broadcasting audio notices to subscribers
pub struct NoticeBus {
    subscribers: Arc<RwLock<Vec<Subscriber>>>,
    next_id: Arc<AtomicUsize>,
}

impl NoticeBus {
    /// Create a new notice bus
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Subscribe to notices, returns a receiver and subscription ID
    pub fn subscribe(&self) -> (Receiver<AudioNotice>, SubscriberId) {
        let (tx, rx) = unbounded();

        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let subscriber = Subscriber { id, sender: tx };

        self.subscribers.write().push(subscriber);

        (rx, id)
    }

    /// Unsubscribe from notices
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers.write().retain(|s| s.id != id);
    }

    /// Publish a notice to all subscribers
    ///
    /// Delivery is non-blocking. Subscribers whose receiver was dropped
    /// are pruned on the way through.
    pub fn publish(&self, notice: AudioNotice) {
        let mut dead: Vec<SubscriberId> = Vec::new();

        {
            let subscribers = self.subscribers.read();
            for subscriber in subscribers.iter() {
                // Unbounded channel, so a send only fails when the
                // receiver is gone
                if subscriber.sender.try_send(notice.clone()).is_err() {
                    dead.push(subscriber.id);
                }
            }
        }

        if !dead.is_empty() {
            self.subscribers.write().retain(|s| !dead.contains(&s.id));
        }
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Clear all subscribers
    pub fn clear(&self) {
        self.subscribers.write().clear();
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for NoticeBus {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::Channel;

    #[test]
    fn test_notice_bus_subscribe() {
        let bus = NoticeBus::new();
        let (_rx, _id) = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn test_notice_bus_unsubscribe() {
        let bus = NoticeBus::new();
        let (_rx, id) = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        bus.unsubscribe(id);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_notice_bus_publish() {
        let bus = NoticeBus::new();
        let (rx, _id) = bus.subscribe();

        bus.publish(AudioNotice::SwitchChanged {
            channel: Channel::Music,
            on: false,
        });

        let received = rx.try_recv().unwrap();
        match received {
            AudioNotice::SwitchChanged { channel, on } => {
                assert_eq!(channel, Channel::Music);
                assert!(!on);
            }
            _ => panic!("Wrong notice type received"),
        }
    }

    #[test]
    fn test_notice_bus_multiple_subscribers() {
        let bus = NoticeBus::new();
        let (rx1, _id1) = bus.subscribe();
        let (rx2, _id2) = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(AudioNotice::Custom { event_id: 900 });

        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_ok());
    }

    #[test]
    fn test_notice_bus_prunes_dropped_receivers() {
        let bus = NoticeBus::new();
        let (rx1, _id1) = bus.subscribe();
        let (rx2, _id2) = bus.subscribe();
        drop(rx2);

        bus.publish(AudioNotice::Custom { event_id: 900 });

        assert!(rx1.try_recv().is_ok());
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn test_notice_bus_clear() {
        let bus = NoticeBus::new();
        let (_rx1, _id1) = bus.subscribe();
        let (_rx2, _id2) = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);

        bus.clear();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_notice_bus_clone_shares_state() {
        let bus1 = NoticeBus::new();
        let bus2 = bus1.clone();

        let (_rx, _id) = bus1.subscribe();
        assert_eq!(bus1.subscriber_count(), 1);
        assert_eq!(bus2.subscriber_count(), 1);
    }
}
