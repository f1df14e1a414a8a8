use axum::Json;
use axum::extract::{Query, State};

use crate::error::AppError;
use crate::feed::query;
use crate::models::job::{FilterParams, Job, RefreshReport};
use crate::routes::api::AppState;

/// GET /jobs
///
/// Current snapshot, optionally narrowed by search/company/location/mode.
/// Filters always apply to the full published snapshot, never to a prior
/// filtered result.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Json<Vec<Job>> {
    let snapshot = state.store.read();
    Json(query::filter(&snapshot, &params))
}

/// POST /jobs/refresh
///
/// Re-pull every configured board and atomically publish the new snapshot.
/// Returns 409 when a refresh is already in flight.
pub async fn refresh(State(state): State<AppState>) -> Result<Json<RefreshReport>, AppError> {
    let report = state.refresher.refresh().await?;
    Ok(Json(report))
}
