use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Ticket subject classification.
///
/// The wire values are the Spanish labels used by both the store and
/// the classification service. Any value outside the closed set is
/// preserved verbatim in [`Category::Unknown`] so a newer service
/// vocabulary never drops data on round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Billing,
    TechnicalSupport,
    Sales,
    Returns,
    GeneralInfo,
    Complaints,
    Other,
    Unknown(String),
}

impl Category {
    /// All known categories, in the order the create form offers them.
    pub const KNOWN: [Self; 7] = [
        Self::Billing,
        Self::TechnicalSupport,
        Self::Sales,
        Self::Returns,
        Self::GeneralInfo,
        Self::Complaints,
        Self::Other,
    ];

    /// Wire label for this category.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Billing => "facturación",
            Self::TechnicalSupport => "soporte técnico",
            Self::Sales => "ventas",
            Self::Returns => "devoluciones",
            Self::GeneralInfo => "información general",
            Self::Complaints => "quejas",
            Self::Other => "otros",
            Self::Unknown(raw) => raw,
        }
    }

    /// Badge style for this category, with a muted fallback for
    /// values outside the known set.
    #[must_use]
    pub const fn badge_class(&self) -> &'static str {
        match self {
            Self::Billing => "badge-info",
            Self::TechnicalSupport => "badge-purple",
            Self::Sales => "badge-warning",
            Self::Returns => "badge-orange",
            Self::GeneralInfo => "badge-cyan",
            Self::Complaints => "badge-error",
            Self::Other | Self::Unknown(_) => "badge-muted",
        }
    }

    /// Accent color name for this category.
    #[must_use]
    pub const fn accent(&self) -> &'static str {
        match self {
            Self::Billing => "blue",
            Self::TechnicalSupport => "purple",
            Self::Sales => "yellow",
            Self::Returns => "orange",
            Self::GeneralInfo => "cyan",
            Self::Complaints => "red",
            Self::Other | Self::Unknown(_) => "muted",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "facturación" => Self::Billing,
            "soporte técnico" => Self::TechnicalSupport,
            "ventas" => Self::Sales,
            "devoluciones" => Self::Returns,
            "información general" => Self::GeneralInfo,
            "quejas" => Self::Complaints,
            "otros" => Self::Other,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

/// Classification of a ticket's tone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Unknown(String),
}

impl Sentiment {
    /// Wire label for this sentiment.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Positive => "positivo",
            Self::Negative => "negativo",
            Self::Neutral => "neutro",
            Self::Unknown(raw) => raw,
        }
    }

    /// Human display label (title case).
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Positive => "Positivo",
            Self::Negative => "Negativo",
            Self::Neutral => "Neutro",
            Self::Unknown(raw) => raw,
        }
    }

    /// Badge style, muted for anything outside the known set.
    #[must_use]
    pub const fn badge_class(&self) -> &'static str {
        match self {
            Self::Positive => "badge-success",
            Self::Negative => "badge-error",
            Self::Neutral | Self::Unknown(_) => "badge-muted",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Sentiment {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "positivo" => Self::Positive,
            "negativo" => Self::Negative,
            "neutro" => Self::Neutral,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<Sentiment> for String {
    fn from(sentiment: Sentiment) -> Self {
        match sentiment {
            Sentiment::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Sentiment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

/// A single support request record.
///
/// `id` is assigned by the store and unique within a board; `created_at`
/// never changes after creation. Mutations arrive only as whole-record
/// replacements, never partial patches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub processed: bool,
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    /// True if the ticket is still awaiting classification.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !self.processed
    }

    /// True if the ticket carries the given sentiment.
    #[must_use]
    pub fn has_sentiment(&self, sentiment: &Sentiment) -> bool {
        self.sentiment.as_ref() == Some(sentiment)
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, Sentiment, Ticket};
    use chrono::{TimeZone, Utc};
    use std::str::FromStr;

    #[test]
    fn category_wire_roundtrips() {
        for category in Category::KNOWN {
            let wire = String::from(category.clone());
            assert_eq!(Category::from(wire), category);
        }
        assert_eq!(
            serde_json::to_string(&Category::Billing).unwrap(),
            "\"facturación\""
        );
        assert_eq!(
            serde_json::from_str::<Category>("\"soporte técnico\"").unwrap(),
            Category::TechnicalSupport
        );
    }

    #[test]
    fn category_parse_is_case_and_space_insensitive() {
        assert_eq!(
            Category::from_str("  Facturación ").unwrap(),
            Category::Billing
        );
        assert_eq!(Category::from_str("VENTAS").unwrap(), Category::Sales);
    }

    #[test]
    fn unknown_category_preserves_raw_value() {
        let parsed = Category::from("reclamos legales".to_string());
        assert_eq!(parsed, Category::Unknown("reclamos legales".to_string()));
        assert_eq!(parsed.as_str(), "reclamos legales");
        assert_eq!(String::from(parsed), "reclamos legales");
        assert_eq!(
            Category::Unknown("reclamos legales".into()).badge_class(),
            "badge-muted"
        );
    }

    #[test]
    fn sentiment_wire_roundtrips() {
        assert_eq!(
            serde_json::from_str::<Sentiment>("\"negativo\"").unwrap(),
            Sentiment::Negative
        );
        assert_eq!(
            serde_json::to_string(&Sentiment::Neutral).unwrap(),
            "\"neutro\""
        );
        assert_eq!(Sentiment::Positive.label(), "Positivo");
    }

    #[test]
    fn badge_mapping_is_total() {
        for category in Category::KNOWN {
            assert!(!category.badge_class().is_empty());
            assert!(!category.accent().is_empty());
        }
        for sentiment in [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral] {
            assert!(!sentiment.badge_class().is_empty());
        }
    }

    #[test]
    fn ticket_json_roundtrips() {
        let ticket = Ticket {
            id: "550e8400-e29b-41d4-a716-446655440000".into(),
            description: "Problema de facturación".into(),
            category: Some(Category::Billing),
            sentiment: Some(Sentiment::Negative),
            processed: true,
            created_at: Utc.with_ymd_and_hms(2024, 3, 6, 23, 59, 0).unwrap(),
        };

        let json = serde_json::to_string(&ticket).unwrap();
        let back: Ticket = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ticket);
    }

    #[test]
    fn ticket_optional_fields_default_on_deserialize() {
        let json = r#"{
            "id": "t1",
            "description": "No puedo acceder a mi cuenta",
            "created_at": "2024-03-06T10:00:00Z"
        }"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert!(ticket.category.is_none());
        assert!(ticket.sentiment.is_none());
        assert!(ticket.is_pending());
    }
}
