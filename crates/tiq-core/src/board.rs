//! The ticket board: the single owner of the canonical ticket list.
//!
//! Lifecycle: `new` → [`TicketBoard::load`] (bulk fetch) →
//! [`TicketBoard::apply`] per change event → drop. Nothing else
//! mutates the collection; every view the dashboard shows is derived
//! from the slice returned by [`TicketBoard::tickets`].
//!
//! Ordering: the initial load arrives sorted by `created_at`
//! descending and is never re-sorted afterwards. Inserts prepend,
//! updates replace in place, deletes remove. After an out-of-order
//! insert the list may no longer be globally sorted; callers that
//! need strict order must re-sort their derived view.

use crate::model::Ticket;
use crate::stats::{self, BoardStats, DayBucket, FilterCounts};
use crate::store::{ChangeEvent, StoreError, TicketStore};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

/// Owner of the canonical ticket collection.
#[derive(Debug, Default)]
pub struct TicketBoard {
    tickets: Vec<Ticket>,
    loading: bool,
    load_error: Option<String>,
}

impl TicketBoard {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the collection with a fresh bulk fetch.
    ///
    /// On failure the collection is left empty and the error message
    /// is retained for page-level display. The loading flag is set
    /// for the duration of the call, success or failure.
    pub fn load(&mut self, store: &dyn TicketStore) -> Result<(), StoreError> {
        self.loading = true;
        let result = store.fetch_all();
        self.loading = false;

        match result {
            Ok(tickets) => {
                info!(count = tickets.len(), "ticket board loaded");
                self.tickets = tickets;
                self.load_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "ticket board load failed");
                self.tickets.clear();
                self.load_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Apply one row-change event to the collection.
    pub fn apply(&mut self, event: ChangeEvent) {
        match event {
            ChangeEvent::Inserted(ticket) => self.on_insert(ticket),
            ChangeEvent::Updated(ticket) => self.on_update(ticket),
            ChangeEvent::Deleted(id) => self.on_delete(&id),
        }
    }

    /// Prepend a new ticket unless its id is already present.
    ///
    /// The initial fetch can race a realtime insert for the same row;
    /// re-delivery of an id already on the board is dropped so the
    /// row never appears twice.
    fn on_insert(&mut self, ticket: Ticket) {
        if self.tickets.iter().any(|t| t.id == ticket.id) {
            debug!(id = %ticket.id, "duplicate insert dropped");
            return;
        }
        self.tickets.insert(0, ticket);
    }

    /// Replace the matching row in place; drop the event if absent.
    ///
    /// An update for a row the board never saw (slow initial fetch,
    /// out-of-order delivery) is lost until the next full load.
    fn on_update(&mut self, ticket: Ticket) {
        match self.tickets.iter_mut().find(|t| t.id == ticket.id) {
            Some(slot) => *slot = ticket,
            None => debug!(id = %ticket.id, "update for absent ticket dropped"),
        }
    }

    /// Remove the matching row; a second delete for the same id is a
    /// no-op.
    fn on_delete(&mut self, id: &str) {
        let before = self.tickets.len();
        self.tickets.retain(|t| t.id != id);
        if self.tickets.len() == before {
            debug!(id, "delete for absent ticket dropped");
        }
    }

    /// The canonical collection, in board order.
    #[must_use]
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// True while a bulk fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error message from the last failed load, if any.
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Dashboard counters and week-over-week trends as of `now`.
    #[must_use]
    pub fn stats(&self, now: DateTime<Utc>) -> BoardStats {
        stats::compute(&self.tickets, now)
    }

    /// Per-filter-tab counts over the full collection.
    #[must_use]
    pub fn filter_counts(&self) -> FilterCounts {
        stats::filter_counts(&self.tickets)
    }

    /// Monday-to-Sunday buckets for the week containing `today`
    /// (local dates).
    #[must_use]
    pub fn weekly_series(&self, today: NaiveDate) -> [DayBucket; 7] {
        stats::weekly_series(&self.tickets, today)
    }
}
