//! Publish/read point for the current snapshot.
//!
//! The store performs no normalization or dedup; snapshot content is
//! produced entirely by the refresh pass. Keeping it to a single pointer
//! swap is what gives readers consistent, non-blocking views.

use std::sync::{Arc, RwLock};

use crate::models::job::Job;

/// An immutable, deduplicated sequence of jobs sorted descending by
/// canonical timestamp. Cheap to hand out; replaced wholesale by the
/// next refresh, never mutated in place.
pub type Snapshot = Arc<Vec<Job>>;

/// Holds exactly one published [`Snapshot`] at a time. Readers clone the
/// inner `Arc` and keep whatever they obtained across any concurrent
/// replace; the write lock is held only for the pointer swap.
#[derive(Debug)]
pub struct FeedStore {
    current: RwLock<Snapshot>,
}

impl FeedStore {
    /// Starts with an empty snapshot, so the list endpoint is well-formed
    /// before the first refresh.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Current snapshot. O(1); never observes a partial replace.
    pub fn read(&self) -> Snapshot {
        self.current.read().expect("feed store lock poisoned").clone()
    }

    /// Atomically publish a new snapshot, returning it.
    pub fn replace(&self, jobs: Vec<Job>) -> Snapshot {
        let snapshot: Snapshot = Arc::new(jobs);
        *self.current.write().expect("feed store lock poisoned") = Arc::clone(&snapshot);
        snapshot
    }
}

impl Default for FeedStore {
    fn default() -> Self {
        Self::new()
    }
}
