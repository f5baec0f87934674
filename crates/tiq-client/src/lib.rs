//! tiq-client library.
//!
//! JSON-over-HTTP collaborators of the dashboard: [`api::ApiClient`]
//! talks to the classification service, [`rest_store::RestStore`]
//! reads the hosted ticket table and bridges its change feed via
//! polling.

pub mod api;
pub mod rest_store;

pub use api::{ApiClient, CreateTicketResponse, ProcessTicketResponse, RequestError};
pub use rest_store::RestStore;
