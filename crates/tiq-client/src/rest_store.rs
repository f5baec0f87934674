//! Remote ticket store over a PostgREST-style endpoint.
//!
//! The hosted store pushes row changes over a websocket channel that
//! a plain HTTP client cannot consume, so the change feed is bridged
//! by polling: [`diff_tickets`] compares consecutive fetches and
//! synthesizes insert/update/delete events, and [`spawn_poller`]
//! drives the loop behind the transport-agnostic
//! [`Subscription`] seam. Dropping the subscription stops the poller
//! on its next publish.

use std::thread;
use std::time::Duration;
use tiq_core::model::Ticket;
use tiq_core::store::{ChangeEvent, ChangeFeed, StoreError, Subscription, TicketStore};
use tracing::{debug, warn};

/// HTTP client for the hosted `tickets` table.
#[derive(Debug, Clone)]
pub struct RestStore {
    agent: ureq::Agent,
    base_url: String,
    api_key: Option<String>,
}

impl RestStore {
    /// Create a store client against `base_url`, optionally sending
    /// an api-key header with every request.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            agent: ureq::Agent::new(),
            base_url,
            api_key,
        }
    }

    /// Fetch the current table state and diff it against `known`,
    /// synthesizing one event per added, changed, or removed row.
    pub fn poll_changes(&self, known: &[Ticket]) -> Result<Vec<ChangeEvent>, StoreError> {
        let fresh = self.fetch_all()?;
        Ok(diff_tickets(known, &fresh))
    }
}

impl TicketStore for RestStore {
    fn fetch_all(&self) -> Result<Vec<Ticket>, StoreError> {
        let url = format!(
            "{}/tickets?select=*&order=created_at.desc",
            self.base_url
        );
        debug!(%url, "ticket store fetch");

        let mut request = self.agent.get(&url).set("Accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request
                .set("apikey", key)
                .set("Authorization", &format!("Bearer {key}"));
        }

        let response = request
            .call()
            .map_err(|err| StoreError::Request(err.to_string()))?;

        response
            .into_json::<Vec<Ticket>>()
            .map_err(|err| StoreError::Decode(err.to_string()))
    }
}

/// Diff two table snapshots into change events.
///
/// Event order is deletes, then updates, then inserts oldest-first,
/// so that prepend-on-insert leaves the newest row at the front of
/// the board. Rows equal in both snapshots produce nothing.
#[must_use]
pub fn diff_tickets(known: &[Ticket], fresh: &[Ticket]) -> Vec<ChangeEvent> {
    let mut events = Vec::new();

    for old in known {
        if !fresh.iter().any(|t| t.id == old.id) {
            events.push(ChangeEvent::Deleted(old.id.clone()));
        }
    }

    for row in fresh {
        if let Some(old) = known.iter().find(|t| t.id == row.id) {
            if old != row {
                events.push(ChangeEvent::Updated(row.clone()));
            }
        }
    }

    for row in fresh.iter().rev() {
        if !known.iter().any(|t| t.id == row.id) {
            events.push(ChangeEvent::Inserted(row.clone()));
        }
    }

    events
}

/// Start a background poller publishing store changes into a fresh
/// subscription.
///
/// The thread fetches every `interval`, seeds itself with the first
/// snapshot it sees, and exits as soon as the returned subscription
/// is dropped. Fetch failures are logged and retried on the next
/// tick; they never tear down the feed.
#[must_use]
pub fn spawn_poller(store: RestStore, interval: Duration) -> Subscription {
    let (feed, subscription) = Subscription::channel();
    thread::spawn(move || poll_loop(&store, &feed, interval));
    subscription
}

fn poll_loop(store: &RestStore, feed: &ChangeFeed, interval: Duration) {
    let mut known: Option<Vec<Ticket>> = None;

    loop {
        match store.fetch_all() {
            Ok(fresh) => {
                if let Some(snapshot) = &known {
                    for event in diff_tickets(snapshot, &fresh) {
                        if !feed.publish(event) {
                            debug!("subscription dropped, poller exiting");
                            return;
                        }
                    }
                }
                known = Some(fresh);
            }
            Err(err) => warn!(error = %err, "store poll failed, will retry"),
        }

        thread::sleep(interval);
    }
}
