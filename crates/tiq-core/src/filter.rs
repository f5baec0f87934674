//! Filter/search engine: derives a view from the board's collection.
//!
//! [`apply`] is a pure function. It never mutates or re-sorts the
//! input; the returned view preserves the board's relative order.

use crate::model::{Sentiment, Ticket};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The filter tabs of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Pending,
    Processed,
    Positive,
    Negative,
}

impl Filter {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Processed => "processed",
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }

    fn matches(self, ticket: &Ticket) -> bool {
        match self {
            Self::All => true,
            Self::Pending => ticket.is_pending(),
            Self::Processed => ticket.processed,
            Self::Positive => ticket.has_sentiment(&Sentiment::Positive),
            Self::Negative => ticket.has_sentiment(&Sentiment::Negative),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a filter name from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid filter: '{0}' (expected all, pending, processed, positive, or negative)")]
pub struct ParseFilterError(String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "processed" => Ok(Self::Processed),
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

/// Active filter tab plus free-text search. A pure view selector,
/// never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub filter: Filter,
    pub search: String,
}

impl FilterState {
    /// State selecting everything.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// State for one tab with no search text.
    #[must_use]
    pub fn tab(filter: Filter) -> Self {
        Self {
            filter,
            search: String::new(),
        }
    }

    /// Add search text to this state.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }
}

/// Select the tickets matching `state`, preserving input order.
///
/// Tab selection first, then a trimmed case-insensitive substring
/// match of the search text against the description or the category
/// label. A ticket without a category never matches on category.
#[must_use]
pub fn apply<'a>(tickets: &'a [Ticket], state: &FilterState) -> Vec<&'a Ticket> {
    let query = state.search.trim().to_lowercase();

    tickets
        .iter()
        .filter(|t| state.filter.matches(t))
        .filter(|t| {
            if query.is_empty() {
                return true;
            }
            t.description.to_lowercase().contains(&query)
                || t.category
                    .as_ref()
                    .is_some_and(|c| c.as_str().to_lowercase().contains(&query))
        })
        .collect()
}
