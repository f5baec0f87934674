//! Domain model types.

mod ticket;

pub use ticket::{Category, Sentiment, Ticket};
