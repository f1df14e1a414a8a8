pub mod jobs;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::feed::refresh::Refresher;
use crate::feed::store::FeedStore;

/// Shared state injected into the feed handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FeedStore>,
    pub refresher: Arc<Refresher>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/jobs", get(jobs::list))
        .route("/jobs/refresh", post(jobs::refresh))
        .with_state(state)
}
