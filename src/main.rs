use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use jobfeed::config::Config;
use jobfeed::feed::refresh::Refresher;
use jobfeed::feed::store::FeedStore;
use jobfeed::routes;
use jobfeed::routes::api::AppState;
use jobfeed::sources;

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jobfeed=info,tower_http=info")),
        )
        .init();

    let config = Config::parse();

    let board_sources = sources::from_config(&config);
    tracing::info!("Configured {} job board sources", board_sources.len());

    let client = reqwest::Client::builder()
        .user_agent("jobfeed/0.1 (+feed-aggregator)")
        .build()?;

    let store = Arc::new(FeedStore::new());
    let refresher = Arc::new(Refresher::new(
        board_sources,
        Arc::clone(&store),
        client,
        Duration::from_secs(config.fetch_timeout_secs),
    ));

    let app = Router::new()
        .route("/healthz", get(healthz))
        .merge(routes::api::router(AppState { store, refresher }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Listening on {}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
