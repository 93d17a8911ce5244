//! HTTP facade.
//!
//! Thin axum handlers translating JSON requests into [`ScoreService`] and
//! [`AdminService`] calls, split by domain:
//! - `endpoints::scores`: submissions, leaderboard, deletion, dashboard stats
//! - `endpoints::admin`: administrator management
//! - `endpoints::auth`: credential check for the dashboard login
//!
//! Request bodies and query strings are parsed by axum's extractors; malformed
//! input is rejected there with a 4xx before any service call.

mod error;
mod extract;
mod requests;
pub mod endpoints;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::Router;

use crate::admin::AdminService;
use crate::persistence::sqlite::{
    Database, SqliteAdminRepository, SqliteScoreRepository, SqliteStatsRepository,
};
use crate::scores::ScoreService;

pub use error::ApiError;

pub type SqliteScoreService = ScoreService<SqliteScoreRepository, SqliteStatsRepository>;
pub type SqliteAdminService = AdminService<SqliteAdminRepository>;

/// Shared handler state. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub scores: Arc<SqliteScoreService>,
    pub admins: Arc<SqliteAdminService>,
}

impl AppState {
    pub fn new(db: &Database) -> Self {
        let pool = db.pool();
        Self {
            scores: Arc::new(ScoreService::new(
                SqliteScoreRepository::new(pool.clone()),
                SqliteStatsRepository::new(pool.clone()),
            )),
            admins: Arc::new(AdminService::new(SqliteAdminRepository::new(pool.clone()))),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(endpoints::scores::routes())
        .merge(endpoints::admin::routes())
        .merge(endpoints::auth::routes())
        .with_state(state)
}
