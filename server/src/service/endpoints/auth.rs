//! Dashboard login. Credentials are checked, no session or token is issued.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::service::extract::ApiJson;
use crate::service::requests::{Credentials, LoginResponse};
use crate::service::{ApiError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<Credentials>,
) -> Result<Json<LoginResponse>, ApiError> {
    match state.admins.authenticate(&req.username, &req.password).await? {
        Some(account) => Ok(Json(LoginResponse {
            message: "Login successful",
            user: account.into(),
        })),
        None => Err(ApiError::InvalidCredentials),
    }
}
