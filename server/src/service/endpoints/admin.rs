//! Administrator management.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use crate::persistence::AdminAccount;
use crate::service::extract::{ApiJson, ApiPath};
use crate::service::requests::{ChangePasswordRequest, Credentials};
use crate::service::{ApiError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(list).post(create))
        .route("/admin/:id", delete(remove))
        .route("/admin/:id/password", post(change_password))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<AdminAccount>>, ApiError> {
    Ok(Json(state.admins.list().await?))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<Credentials>,
) -> Result<(StatusCode, Json<AdminAccount>), ApiError> {
    tracing::info!(username = %req.username, "POST /admin");
    let account = state.admins.create(&req.username, &req.password).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    tracing::info!(admin_id = id, "DELETE /admin/:id");
    state.admins.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn change_password(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    tracing::info!(admin_id = id, "POST /admin/:id/password");
    if state.admins.change_password(id, &req.password).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::AdminNotFound(id))
    }
}
