//! Score submission, leaderboard, deletion, and dashboard statistics.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use scoring::{DashboardStats, NewSession, Page, Session, SessionWithDetails};

use crate::service::extract::{ApiJson, ApiPath, ApiQuery};
use crate::service::requests::{BulkDeleteRequest, PageParams};
use crate::service::{ApiError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/score", post(create).get(find_all))
        .route("/score/bulk-delete", post(remove_bulk))
        .route("/score/dashboard/stats", get(dashboard_stats))
        .route("/score/:id", get(find_one).delete(remove))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewSession>,
) -> Result<(StatusCode, Json<SessionWithDetails>), ApiError> {
    tracing::info!(details = new.details.len(), "POST /score");
    let stored = state.scores.create(new).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

async fn find_all(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<Page<Session>>, ApiError> {
    tracing::debug!(page = ?params.page, limit = ?params.limit, "GET /score");
    Ok(Json(state.scores.find_all(params.into()).await?))
}

/// Missing sessions answer `200 null`.
async fn find_one(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Option<SessionWithDetails>>, ApiError> {
    tracing::debug!(session_id = id, "GET /score/:id");
    Ok(Json(state.scores.find_one(id).await?))
}

async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Option<SessionWithDetails>>, ApiError> {
    tracing::info!(session_id = id, "DELETE /score/:id");
    Ok(Json(state.scores.remove(id).await?))
}

async fn remove_bulk(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<BulkDeleteRequest>,
) -> Result<Json<Vec<SessionWithDetails>>, ApiError> {
    let ids = req.ids.unwrap_or_default();
    tracing::info!(ids = ids.len(), delete_all = req.delete_all, "POST /score/bulk-delete");
    Ok(Json(state.scores.remove_bulk(&ids, req.delete_all).await?))
}

async fn dashboard_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, ApiError> {
    tracing::debug!("GET /score/dashboard/stats");
    Ok(Json(state.scores.dashboard_stats().await?))
}
