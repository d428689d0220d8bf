use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Party linkage
// ---------------------------------------------------------------------------

/// How an ad or contract refers to a company or client.
///
/// The id is informational only: nothing enforces that a `Linked` id still
/// resolves, and deleting the referenced record leaves the captured text
/// behind. Bulk import always produces `Unlinked`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyRef {
    /// Plain display text with no record association.
    Unlinked(String),
    /// A record id plus the display text captured when the link was made.
    Linked { id: i64, name: String },
}

impl PartyRef {
    /// Rebuild a reference from the stored (`*_id`, text) column pair.
    pub fn from_columns(id: Option<i64>, name: String) -> Self {
        match id {
            Some(id) => PartyRef::Linked { id, name },
            None => PartyRef::Unlinked(name),
        }
    }

    pub fn display(&self) -> &str {
        match self {
            PartyRef::Unlinked(name) => name,
            PartyRef::Linked { name, .. } => name,
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            PartyRef::Unlinked(_) => None,
            PartyRef::Linked { id, .. } => Some(*id),
        }
    }

    /// True when there is neither an id nor any display text.
    pub fn is_empty(&self) -> bool {
        self.id().is_none() && self.display().trim().is_empty()
    }
}

impl Default for PartyRef {
    fn default() -> Self {
        PartyRef::Unlinked(String::new())
    }
}

// ---------------------------------------------------------------------------
// Ad status
// ---------------------------------------------------------------------------

/// Canonical status labels for an ad booking.
///
/// The store keeps status as text (imported files carry it verbatim); this
/// enum is the label set the save/filter actions validate against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdStatus {
    #[default]
    Pending,
    Done,
    Cancelled,
}

impl AdStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdStatus::Pending => "pending",
            AdStatus::Done => "done",
            AdStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<AdStatus> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(AdStatus::Pending),
            "done" => Some(AdStatus::Done),
            "cancelled" | "canceled" => Some(AdStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for AdStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// An advertiser company. `name` is required (non-empty after trimming).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub notes: String,
    /// Logo file name under the uploads directory, if one was attached.
    pub logo: Option<String>,
}

/// A client (person). `name` is required (non-empty after trimming).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub phone: String,
    pub bank_number: String,
    pub check_name: String,
}

/// One advertisement booking.
///
/// `client` covers the stored (`client_id`, `name`) column pair — the `name`
/// column holds the client display text, which is also the field the import
/// skip rule checks together with `date`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    pub id: i64,
    pub company: PartyRef,
    pub client: PartyRef,
    pub location: String,
    pub bank_number: String,
    pub check_name: String,
    pub status: String,
    pub date: Option<NaiveDate>,
    pub amount: f64,
    pub notes: String,
    pub attachment: Option<String>,
}

/// One contract.
///
/// `invoke_number` is a human-facing counter suggested as `max + 1` at form
/// time; it is not guaranteed unique or gap-free.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: i64,
    pub invoke_number: i64,
    pub company: PartyRef,
    pub client: PartyRef,
    pub location: String,
    pub bank_number: String,
    pub check_name: String,
    pub date_start: Option<NaiveDate>,
    pub date_finish: Option<NaiveDate>,
    pub amount: f64,
    pub notes: String,
    pub attachment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_ref_column_roundtrip() {
        let linked = PartyRef::from_columns(Some(7), "Acme".into());
        assert_eq!(linked.id(), Some(7));
        assert_eq!(linked.display(), "Acme");

        let unlinked = PartyRef::from_columns(None, "Acme".into());
        assert_eq!(unlinked.id(), None);
        assert_eq!(unlinked.display(), "Acme");
    }

    #[test]
    fn party_ref_empty() {
        assert!(PartyRef::default().is_empty());
        assert!(PartyRef::Unlinked("   ".into()).is_empty());
        assert!(!PartyRef::Unlinked("x".into()).is_empty());
        // A linked id counts as non-empty even without text
        assert!(!PartyRef::Linked { id: 1, name: String::new() }.is_empty());
    }

    #[test]
    fn status_labels() {
        assert_eq!(AdStatus::parse("Pending"), Some(AdStatus::Pending));
        assert_eq!(AdStatus::parse("DONE"), Some(AdStatus::Done));
        assert_eq!(AdStatus::parse("canceled"), Some(AdStatus::Cancelled));
        assert_eq!(AdStatus::parse("archived"), None);
        assert_eq!(AdStatus::Cancelled.to_string(), "cancelled");
    }
}
