//! Snapshot filtering.
//!
//! Every call starts from the full published snapshot, so filters are
//! independent of each other and of any previous call. Output keeps the
//! snapshot's order.

use crate::models::job::{FilterParams, Job, Mode};

/// Apply the optional filter dimensions to a snapshot. Pure; the input is
/// never mutated.
pub fn filter(jobs: &[Job], params: &FilterParams) -> Vec<Job> {
    jobs.iter()
        .filter(|job| matches(job, params))
        .cloned()
        .collect()
}

fn matches(job: &Job, params: &FilterParams) -> bool {
    if let Some(needle) = non_empty(&params.search)
        && !contains_ci(&job.title, needle)
        && !contains_ci(&job.company, needle)
    {
        return false;
    }

    if let Some(needle) = non_empty(&params.company)
        && !contains_ci(&job.company, needle)
    {
        return false;
    }

    if let Some(needle) = non_empty(&params.location) {
        match &job.location {
            Some(location) if contains_ci(location, needle) => {}
            _ => return false,
        }
    }

    match params.mode.unwrap_or_default() {
        Mode::Any => true,
        Mode::Remote => job.remote == Some(true),
        // Undeclared remote status lands in the onsite/hybrid bucket.
        Mode::Onsite => job.remote != Some(true),
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|needle| !needle.is_empty())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
