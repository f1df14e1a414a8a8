//! The fetch -> normalize -> dedup -> sort -> publish cycle.
//!
//! Per-source failures and per-posting skips are aggregated into the
//! refresh report, never fatal; even an all-sources-failed pass publishes
//! an (empty) snapshot so callers are never left on silently stale data.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::error::AppError;
use crate::feed::normalize::normalize;
use crate::feed::store::FeedStore;
use crate::models::job::{Job, RawPosting, RefreshReport, SourceError};
use crate::sources::JobSource;

/// Owns the configured sources and serializes refresh passes. At most one
/// pass runs at a time; a call arriving while one is in flight gets
/// [`AppError::RefreshBusy`] instead of queueing.
pub struct Refresher {
    sources: Vec<Arc<dyn JobSource>>,
    store: Arc<FeedStore>,
    client: reqwest::Client,
    fetch_timeout: Duration,
    gate: Mutex<()>,
}

impl Refresher {
    pub fn new(
        sources: Vec<Arc<dyn JobSource>>,
        store: Arc<FeedStore>,
        client: reqwest::Client,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            sources,
            store,
            client,
            fetch_timeout,
            gate: Mutex::new(()),
        }
    }

    /// Pull every configured source, rebuild the snapshot, and publish it.
    pub async fn refresh(&self) -> Result<RefreshReport, AppError> {
        let Ok(_guard) = self.gate.try_lock() else {
            return Err(AppError::RefreshBusy);
        };

        let run_id = Uuid::new_v4();
        tracing::info!(%run_id, sources = self.sources.len(), "refresh started, fetching");

        let (raw, source_errors) = self.fetch_all(run_id).await?;

        tracing::debug!(%run_id, postings = raw.len(), "normalizing");
        let (jobs, skipped) = build_snapshot(raw);

        tracing::debug!(%run_id, "publishing");
        let snapshot = self.store.replace(jobs);

        tracing::info!(
            %run_id,
            job_count = snapshot.len(),
            skipped,
            failed_sources = source_errors.len(),
            "refresh published"
        );

        Ok(RefreshReport {
            run_id,
            job_count: snapshot.len(),
            skipped,
            source_errors,
        })
    }

    /// Fetch all sources concurrently, each under its own timeout. Results
    /// are re-assembled in configured-source order so the downstream dedup
    /// pass (and therefore tie order) is deterministic.
    async fn fetch_all(
        &self,
        run_id: Uuid,
    ) -> Result<(Vec<RawPosting>, Vec<SourceError>), AppError> {
        let mut set = JoinSet::new();
        for (idx, source) in self.sources.iter().enumerate() {
            let source = Arc::clone(source);
            let client = self.client.clone();
            let timeout = self.fetch_timeout;
            set.spawn(async move {
                let result = match tokio::time::timeout(timeout, source.fetch(&client)).await {
                    Ok(result) => result,
                    Err(_) => Err(AppError::SourceFetch(format!(
                        "timed out after {}s",
                        timeout.as_secs()
                    ))),
                };
                (idx, source.label(), result)
            });
        }

        let mut outcomes: Vec<Option<(String, Result<Vec<RawPosting>, AppError>)>> =
            (0..self.sources.len()).map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            let (idx, label, result) = joined
                .map_err(|e| AppError::Internal(format!("source fetch task panicked: {e}")))?;
            outcomes[idx] = Some((label, result));
        }

        let mut raw = Vec::new();
        let mut source_errors = Vec::new();
        for outcome in outcomes.into_iter().flatten() {
            match outcome {
                (label, Ok(postings)) => {
                    tracing::info!(%run_id, source = %label, count = postings.len(), "source fetched");
                    raw.extend(postings);
                }
                (label, Err(e)) => {
                    tracing::warn!(%run_id, source = %label, error = %e, "source failed, excluded from pass");
                    source_errors.push(SourceError {
                        source: label,
                        error: e.to_string(),
                    });
                }
            }
        }
        Ok((raw, source_errors))
    }
}

/// Normalize, dedup, and sort one pass worth of raw postings. Returns the
/// snapshot contents and the count of postings that could not be
/// interpreted at all.
pub fn build_snapshot(raw: impl IntoIterator<Item = RawPosting>) -> (Vec<Job>, usize) {
    let mut jobs: Vec<Job> = Vec::new();
    let mut index: HashMap<DedupKey, usize> = HashMap::new();
    let mut skipped = 0usize;

    for posting in raw {
        let Some(job) = normalize(&posting) else {
            skipped += 1;
            continue;
        };
        match index.entry(DedupKey::of(&job)) {
            Entry::Occupied(slot) => {
                let held = &mut jobs[*slot.get()];
                // Most recent wins; equal timestamps keep the incumbent.
                if job.ts > held.ts {
                    *held = job;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(jobs.len());
                jobs.push(job);
            }
        }
    }

    // Stable: ties keep their dedup-pass order.
    jobs.sort_by_key(|job| std::cmp::Reverse(job.ts));
    (jobs, skipped)
}

/// Identity of a job for dedup: its URL when present and non-empty,
/// otherwise the (source, company, title) tuple.
#[derive(Debug, Hash, PartialEq, Eq)]
enum DedupKey {
    Url(String),
    Fields(String, String, String),
}

impl DedupKey {
    fn of(job: &Job) -> Self {
        match job.url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => DedupKey::Url(url.to_string()),
            None => DedupKey::Fields(
                job.source.clone(),
                job.company.clone(),
                job.title.clone(),
            ),
        }
    }
}
