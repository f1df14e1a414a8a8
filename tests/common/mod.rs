#![allow(dead_code)]
//! Shared fixtures for the feed harness: in-process fake board sources and
//! an app builder wired the way `main` wires the real service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tokio::sync::Notify;
use tower::ServiceExt;

use jobfeed::error::AppError;
use jobfeed::feed::refresh::Refresher;
use jobfeed::feed::store::FeedStore;
use jobfeed::models::job::RawPosting;
use jobfeed::routes::api::{self, AppState};
use jobfeed::sources::JobSource;

/// Fake board that returns a fixed batch of payloads.
pub struct StaticBoard {
    source: String,
    board: String,
    payloads: Vec<Value>,
}

impl StaticBoard {
    pub fn new(source: &str, board: &str, payloads: Vec<Value>) -> Arc<dyn JobSource> {
        Arc::new(Self {
            source: source.to_string(),
            board: board.to_string(),
            payloads,
        })
    }
}

#[async_trait]
impl JobSource for StaticBoard {
    fn source(&self) -> &str {
        &self.source
    }

    fn board(&self) -> &str {
        &self.board
    }

    async fn fetch(&self, _client: &reqwest::Client) -> Result<Vec<RawPosting>, AppError> {
        Ok(self
            .payloads
            .iter()
            .map(|payload| RawPosting {
                source: self.source.clone(),
                board: self.board.clone(),
                payload: payload.clone(),
            })
            .collect())
    }
}

/// Fake board that always fails its fetch.
pub struct DownBoard {
    source: String,
    board: String,
}

impl DownBoard {
    pub fn new(source: &str, board: &str) -> Arc<dyn JobSource> {
        Arc::new(Self {
            source: source.to_string(),
            board: board.to_string(),
        })
    }
}

#[async_trait]
impl JobSource for DownBoard {
    fn source(&self) -> &str {
        &self.source
    }

    fn board(&self) -> &str {
        &self.board
    }

    async fn fetch(&self, _client: &reqwest::Client) -> Result<Vec<RawPosting>, AppError> {
        Err(AppError::SourceFetch(format!(
            "{} returned 503",
            self.source
        )))
    }
}

/// Fake board that signals entry and parks until released, to hold a
/// refresh in flight.
pub struct ParkedBoard {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl ParkedBoard {
    pub fn new() -> (Arc<dyn JobSource>, Arc<Notify>, Arc<Notify>) {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let board: Arc<dyn JobSource> = Arc::new(Self {
            entered: Arc::clone(&entered),
            release: Arc::clone(&release),
        });
        (board, entered, release)
    }
}

#[async_trait]
impl JobSource for ParkedBoard {
    fn source(&self) -> &str {
        "lever"
    }

    fn board(&self) -> &str {
        "parked"
    }

    async fn fetch(&self, _client: &reqwest::Client) -> Result<Vec<RawPosting>, AppError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(Vec::new())
    }
}

/// Build the API router over the given sources, with a fresh empty store.
pub fn test_app(sources: Vec<Arc<dyn JobSource>>) -> Router {
    let store = Arc::new(FeedStore::new());
    let refresher = Arc::new(Refresher::new(
        sources,
        Arc::clone(&store),
        reqwest::Client::new(),
        Duration::from_secs(5),
    ));
    api::router(AppState { store, refresher })
}

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

/// A Lever-shaped posting payload (epoch-millis timestamps).
pub fn lever_posting(title: &str, url: &str, updated_ms: i64) -> Value {
    serde_json::json!({
        "text": title,
        "hostedUrl": url,
        "categories": {"location": "Berlin, Germany"},
        "workplaceType": "remote",
        "createdAt": updated_ms - 86_400_000,
        "updatedAt": updated_ms
    })
}

/// A Greenhouse-shaped posting payload (ISO timestamps).
pub fn greenhouse_posting(title: &str, url: &str, updated_iso: &str) -> Value {
    serde_json::json!({
        "title": title,
        "absolute_url": url,
        "location": {"name": "Dublin"},
        "updated_at": updated_iso
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri).await
}

pub async fn post_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "POST", uri).await
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
