//! Raw posting -> canonical [`Job`] mapping.
//!
//! Each supported board kind has its own field layout, handled as a closed
//! rule set dispatched on the source identifier; unrecognized sources go
//! through a generic key probe. Missing display fields get sentinels; a
//! posting is only dropped when its payload is not a JSON object at all.

use serde_json::Value;

use crate::feed::timestamp::to_epoch_seconds;
use crate::models::job::{Job, RawPosting, UNKNOWN_COMPANY, UNTITLED_ROLE};

/// Normalize one raw posting. Returns `None` when the payload is not an
/// object; the caller counts that as a skip. Pure: no I/O, no shared state.
pub fn normalize(raw: &RawPosting) -> Option<Job> {
    if !raw.payload.is_object() {
        return None;
    }

    let mapped = match raw.source.as_str() {
        "lever" => lever(&raw.payload),
        "greenhouse" => greenhouse(&raw.payload),
        _ => generic(&raw.payload),
    };

    let company = mapped
        .company
        .or_else(|| non_empty(&raw.board).map(String::from))
        .unwrap_or_else(|| UNKNOWN_COMPANY.to_string());

    Some(Job {
        source: raw.source.clone(),
        board: raw.board.clone(),
        company,
        title: mapped.title.unwrap_or_else(|| UNTITLED_ROLE.to_string()),
        location: mapped.location,
        url: mapped.url,
        remote: mapped.remote,
        posted_at: mapped.posted_at,
        ts: mapped.ts,
    })
}

struct Mapped {
    company: Option<String>,
    title: Option<String>,
    location: Option<String>,
    url: Option<String>,
    remote: Option<bool>,
    posted_at: Option<Value>,
    ts: i64,
}

/// Lever postings API item: `text`, `categories.location`, `hostedUrl`,
/// `workplaceType`, epoch-millis `createdAt`/`updatedAt`.
fn lever(payload: &Value) -> Mapped {
    let location = payload
        .get("categories")
        .and_then(|c| c.get("location"))
        .and_then(Value::as_str)
        .and_then(non_empty)
        .map(String::from);

    let remote = payload
        .get("workplaceType")
        .and_then(Value::as_str)
        .and_then(|w| match w.to_ascii_lowercase().as_str() {
            "remote" => Some(true),
            "onsite" | "on-site" | "hybrid" => Some(false),
            _ => None,
        });

    let (ts, posted_at) = derive_ts(payload, &["updatedAt", "createdAt"]);

    Mapped {
        company: str_field(payload, &["company"]),
        title: str_field(payload, &["text"]),
        location,
        url: str_field(payload, &["hostedUrl"]),
        remote,
        posted_at,
        ts,
    }
}

/// Greenhouse boards API item: `title`, `location.name` (or the first
/// office), `absolute_url`, ISO `updated_at`/`created_at`. Greenhouse never
/// declares remote status.
fn greenhouse(payload: &Value) -> Mapped {
    let location = payload
        .get("location")
        .and_then(|l| l.get("name"))
        .and_then(Value::as_str)
        .and_then(non_empty)
        .map(String::from)
        .or_else(|| {
            payload
                .get("offices")
                .and_then(Value::as_array)
                .and_then(|offices| offices.first())
                .and_then(|office| office.get("name"))
                .and_then(Value::as_str)
                .and_then(non_empty)
                .map(String::from)
        });

    let (ts, posted_at) = derive_ts(payload, &["updated_at", "created_at"]);

    Mapped {
        company: str_field(payload, &["company_name"]),
        title: str_field(payload, &["title"]),
        location,
        url: str_field(payload, &["absolute_url"]),
        remote: None,
        posted_at,
        ts,
    }
}

/// Key probe for sources without a dedicated rule set.
fn generic(payload: &Value) -> Mapped {
    let location = str_field(payload, &["location"]).or_else(|| {
        payload
            .get("location")
            .and_then(|l| l.get("name"))
            .and_then(Value::as_str)
            .and_then(non_empty)
            .map(String::from)
    });

    let (ts, posted_at) = derive_ts(
        payload,
        &["ts", "updatedAt", "updated_at", "createdAt", "created_at", "posted_at"],
    );

    Mapped {
        company: str_field(payload, &["company", "company_name"]),
        title: str_field(payload, &["title"]),
        location,
        url: str_field(payload, &["url", "apply_url"]),
        remote: payload.get("remote").and_then(Value::as_bool),
        posted_at,
        ts,
    }
}

/// First key whose value coerces to a nonzero canonical timestamp wins and
/// is carried verbatim as `posted_at`. When nothing coerces, the first
/// present value is still kept for display and the timestamp falls back to 0.
fn derive_ts(payload: &Value, keys: &[&str]) -> (i64, Option<Value>) {
    for key in keys {
        if let Some(value) = payload.get(*key).filter(|v| !v.is_null()) {
            let ts = to_epoch_seconds(value);
            if ts > 0 {
                return (ts, Some(value.clone()));
            }
        }
    }
    let shown = keys
        .iter()
        .find_map(|key| payload.get(*key).filter(|v| !v.is_null()).cloned());
    (0, shown)
}

fn str_field(payload: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        payload
            .get(*key)
            .and_then(Value::as_str)
            .and_then(non_empty)
            .map(String::from)
    })
}

fn non_empty(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
