//! Data models shared by both flows.
//!
//! These mirror the wire shapes of the bio-generation service exactly; the
//! client consumes them as-is and never normalizes service output.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Request side
// ────────────────────────────────────────────────────────────────────────────

/// Body of `POST /generate_bio`.
///
/// Derived from two free-text fields, not structured input: the lead name is
/// split on its first space (first token → `first`, the remainder's first
/// token → `last`, anything further is discarded) and the additional-info
/// field is trimmed into `company`. No validation beyond that — empty or
/// malformed input passes through as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadQuery {
    pub first: String,
    pub last: String,
    pub company: String,
}

impl LeadQuery {
    /// Builds a query from the raw "lead name" and "additional info" fields.
    pub fn from_free_text(lead_name: &str, additional_info: &str) -> Self {
        let name = lead_name.trim();
        let (first, last) = match name.split_once(' ') {
            Some((first, rest)) => (
                first.to_string(),
                rest.split_whitespace().next().unwrap_or("").to_string(),
            ),
            None => (name.to_string(), String::new()),
        };

        LeadQuery {
            first,
            last,
            company: additional_info.trim().to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response side
// ────────────────────────────────────────────────────────────────────────────

/// A generated lead as returned by the service. Consumed as-is.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedLead {
    pub bio: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Envelope of `POST /generate_bio`: exactly one of `output` / `error` is
/// expected. Both absent is treated as a service error by the client (never a
/// silent no-op).
#[derive(Debug, Deserialize)]
pub struct GenerateEnvelope {
    pub output: Option<GeneratedLead>,
    pub error: Option<String>,
}

/// One result row from `POST /generate_batch_bio`. Absent fields decode as
/// empty strings; the client never inspects or reorders rows.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: String,
}

/// Envelope of `POST /generate_batch_bio`.
#[derive(Debug, Deserialize)]
pub struct BatchEnvelope {
    pub results: Vec<BatchRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_space() {
        let q = LeadQuery::from_free_text("Ada Lovelace", "Analytical Engines ");
        assert_eq!(q.first, "Ada");
        assert_eq!(q.last, "Lovelace");
        assert_eq!(q.company, "Analytical Engines");
    }

    #[test]
    fn discards_tokens_beyond_the_second() {
        let q = LeadQuery::from_free_text("Ada King Lovelace III", "");
        assert_eq!(q.first, "Ada");
        assert_eq!(q.last, "King");
    }

    #[test]
    fn no_space_means_empty_last_name() {
        let q = LeadQuery::from_free_text("  Prince  ", "");
        assert_eq!(q.first, "Prince");
        assert_eq!(q.last, "");
    }

    #[test]
    fn empty_input_passes_through_as_empty_strings() {
        let q = LeadQuery::from_free_text("", "   ");
        assert_eq!(
            q,
            LeadQuery {
                first: String::new(),
                last: String::new(),
                company: String::new(),
            }
        );
    }

    #[test]
    fn query_serializes_all_three_fields() {
        let q = LeadQuery::from_free_text("Ada Lovelace", "Acme");
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "first": "Ada", "last": "Lovelace", "company": "Acme" })
        );
    }

    #[test]
    fn batch_row_defaults_absent_fields_to_empty() {
        let row: BatchRow = serde_json::from_str(r#"{ "name": "A" }"#).unwrap();
        assert_eq!(row.name, "A");
        assert_eq!(row.company, "");
        assert_eq!(row.email, "");
        assert_eq!(row.bio, "");
    }
}
