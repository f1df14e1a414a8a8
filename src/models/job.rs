use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Substituted when a posting carries no company name.
pub const UNKNOWN_COMPANY: &str = "Unknown company";

/// Substituted when a posting carries no title.
pub const UNTITLED_ROLE: &str = "(Untitled role)";

/// One posting as fetched from an external board, before normalization.
/// The payload keeps whatever shape the source produced; it is consumed
/// by a single refresh pass and discarded.
#[derive(Debug, Clone)]
pub struct RawPosting {
    /// Board kind identifier, e.g. "lever".
    pub source: String,
    /// Board slug the posting was fetched from, e.g. "vercel".
    pub board: String,
    pub payload: serde_json::Value,
}

/// Canonical job record served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub source: String,
    pub board: String,
    pub company: String,
    pub title: String,
    pub location: Option<String>,
    /// Identity key for dedup when present and non-empty.
    pub url: Option<String>,
    /// Tri-state: `Some(true)`/`Some(false)` when the source declares it,
    /// `None` when it does not.
    pub remote: Option<bool>,
    /// Raw source timestamp, as given. Display only.
    pub posted_at: Option<serde_json::Value>,
    /// Canonical Unix seconds, always >= 0; 0 when no timestamp was
    /// derivable. The only ordering key.
    pub ts: i64,
}

/// Remote-mode bucket for the list endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Any,
    Remote,
    /// Onsite or hybrid. Postings with undeclared remote status land here.
    Onsite,
}

/// Optional filter dimensions for the list endpoint. Absent or empty
/// fields impose no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    /// Substring match against title or company.
    #[serde(alias = "q")]
    pub search: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub mode: Option<Mode>,
}

/// A source that failed during a refresh pass. Recorded, never fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceError {
    pub source: String,
    pub error: String,
}

/// Outcome of one refresh pass. `job_count` and `source_errors` together
/// distinguish "no jobs" from "refresh failed".
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshReport {
    pub run_id: Uuid,
    pub job_count: usize,
    /// Raw postings that could not be interpreted as objects.
    pub skipped: usize,
    pub source_errors: Vec<SourceError>,
}
