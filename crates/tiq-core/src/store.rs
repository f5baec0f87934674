//! Store seam: the remote ticket store as seen by the board.
//!
//! The hosted store is an external collaborator; tiq only needs two
//! capabilities from it: a bulk fetch ordered by creation time, and a
//! stream of row-change events. The fetch is the [`TicketStore`]
//! trait; the stream is a [`Subscription`] over [`ChangeEvent`]s,
//! transport-agnostic so a push channel and the polling bridge are
//! interchangeable behind the same seam.

use crate::model::Ticket;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::time::Duration;

/// Failure talking to the remote ticket store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("ticket store request failed: {0}")]
    Request(String),

    #[error("ticket store returned malformed data: {0}")]
    Decode(String),
}

/// Read access to the remote ticket store.
pub trait TicketStore {
    /// Fetch every ticket, ordered by `created_at` descending.
    fn fetch_all(&self) -> Result<Vec<Ticket>, StoreError>;
}

/// A single row-change notification, carrying the full row payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    Inserted(Ticket),
    Updated(Ticket),
    Deleted(String),
}

/// Producer half of a change feed.
///
/// Held by the transport (poller or push listener). Publishing fails
/// once the subscriber side has been dropped, which is the signal to
/// stop producing.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: Sender<ChangeEvent>,
}

impl ChangeFeed {
    /// Publish one event. Returns `false` if the subscription is gone.
    pub fn publish(&self, event: ChangeEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Consumer half of a change feed.
///
/// Dropping the subscription tears down the feed: the producer's next
/// `publish` fails and it can shut down.
#[derive(Debug)]
pub struct Subscription {
    rx: Receiver<ChangeEvent>,
}

impl Subscription {
    /// Create a connected feed/subscription pair.
    #[must_use]
    pub fn channel() -> (ChangeFeed, Self) {
        let (tx, rx) = channel();
        (ChangeFeed { tx }, Self { rx })
    }

    /// Take the next event if one is already queued.
    #[must_use]
    pub fn try_next(&self) -> Option<ChangeEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next event.
    ///
    /// Returns `None` on timeout or once the producer side is gone.
    #[must_use]
    pub fn next_timeout(&self, timeout: Duration) -> Option<ChangeEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeEvent, Subscription};
    use std::time::Duration;

    #[test]
    fn publish_then_receive() {
        let (feed, sub) = Subscription::channel();
        assert!(feed.publish(ChangeEvent::Deleted("t1".into())));
        assert_eq!(sub.try_next(), Some(ChangeEvent::Deleted("t1".into())));
        assert_eq!(sub.try_next(), None);
    }

    #[test]
    fn dropping_subscription_stops_publisher() {
        let (feed, sub) = Subscription::channel();
        drop(sub);
        assert!(!feed.publish(ChangeEvent::Deleted("t1".into())));
    }

    #[test]
    fn next_timeout_returns_none_when_idle() {
        let (_feed, sub) = Subscription::channel();
        assert_eq!(sub.next_timeout(Duration::from_millis(5)), None);
    }
}
