//! Classification service client.
//!
//! The service is an opaque collaborator: POST a ticket id or a
//! description, get back category/sentiment/processed. Failures carry
//! a `{ "detail": ... }` body whose detail string is the user-facing
//! message.

use serde::{Deserialize, Serialize};
use tiq_core::model::{Category, Sentiment};
use tracing::debug;

/// Failure of a classification-service request.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The request was rejected before it was sent.
    #[error("{0}")]
    Validation(String),

    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never completed (DNS, connect, timeout).
    #[error("classification service unreachable: {0}")]
    Transport(String),

    /// The 2xx response body could not be decoded.
    #[error("failed to decode classification service response: {0}")]
    Decode(String),
}

/// Response of `POST /process-ticket`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessTicketResponse {
    pub ticket_id: String,
    pub category: Category,
    pub sentiment: Sentiment,
    pub processed: bool,
    pub message: String,
}

/// Response of `POST /create-ticket`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTicketResponse {
    pub ticket_id: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub processed: bool,
    pub message: String,
}

/// Response of `POST /analyze-text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeTextResponse {
    pub category: Category,
    pub sentiment: Sentiment,
}

#[derive(Debug, Serialize)]
struct ProcessTicketRequest<'a> {
    ticket_id: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateTicketRequest<'a> {
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sentiment: Option<&'a Sentiment>,
}

#[derive(Debug, Serialize)]
struct AnalyzeTextRequest<'a> {
    text: &'a str,
}

/// Error body convention of the classification service.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Client for the classification service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ApiClient {
    /// Create a client against `base_url` (no trailing slash needed).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            agent: ureq::Agent::new(),
            base_url,
        }
    }

    /// Request classification of an existing ticket.
    ///
    /// The board receives the resulting row state via the change
    /// feed; the response here is for user feedback only.
    pub fn process_ticket(&self, ticket_id: &str) -> Result<ProcessTicketResponse, RequestError> {
        self.post("/process-ticket", &ProcessTicketRequest { ticket_id })
    }

    /// Create a ticket. Category and sentiment are optional; when
    /// omitted the service infers them later.
    ///
    /// The caller is responsible for inserting the returned record
    /// into its board (optimistic local insert, no re-fetch).
    pub fn create_ticket(
        &self,
        description: &str,
        category: Option<&Category>,
        sentiment: Option<&Sentiment>,
    ) -> Result<CreateTicketResponse, RequestError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(RequestError::Validation(
                "description must not be empty".to_string(),
            ));
        }

        self.post(
            "/create-ticket",
            &CreateTicketRequest {
                description,
                category,
                sentiment,
            },
        )
    }

    /// Classify a text without persisting anything.
    pub fn analyze_text(&self, text: &str) -> Result<AnalyzeTextResponse, RequestError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RequestError::Validation(
                "text must not be empty".to_string(),
            ));
        }
        self.post("/analyze-text", &AnalyzeTextRequest { text })
    }

    fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, RequestError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "classification service request");

        let response = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(body);

        match response {
            Ok(resp) => resp
                .into_json::<T>()
                .map_err(|err| RequestError::Decode(err.to_string())),
            Err(ureq::Error::Status(status, resp)) => {
                Err(status_error(status, resp.into_string().ok()))
            }
            Err(err) => Err(RequestError::Transport(err.to_string())),
        }
    }
}

/// Map a non-2xx response to a [`RequestError::Status`], preferring
/// the body's `detail` field and falling back to the status code.
fn status_error(status: u16, body: Option<String>) -> RequestError {
    let message = body
        .as_deref()
        .and_then(|raw| serde_json::from_str::<ErrorBody>(raw).ok())
        .map_or_else(
            || format!("classification service returned HTTP {status}"),
            |parsed| parsed.detail,
        );
    RequestError::Status { status, message }
}
