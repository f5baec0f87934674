//! tiq-core library.
//!
//! Domain model and derivation logic for the ticket dashboard: the
//! [`board::TicketBoard`] aggregator owns the canonical ticket list,
//! [`filter`] derives filtered/searched views from it, and [`stats`]
//! computes the dashboard counters, week-over-week trends, and the
//! Monday-to-Sunday weekly series.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums at library seams, `anyhow::Result`
//!   where a readable context chain is the point (config loading).
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod board;
pub mod config;
pub mod filter;
pub mod model;
pub mod stats;
pub mod store;

pub use board::TicketBoard;
pub use filter::{Filter, FilterState};
pub use model::{Category, Sentiment, Ticket};
pub use store::{ChangeEvent, StoreError, Subscription, TicketStore};
