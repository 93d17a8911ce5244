//! Async repository trait definitions for the persistence layer.
//!
//! Each trait abstracts over one aggregate so services can be generic over
//! the backend (static dispatch) and tested against stand-ins.
//!
//! Methods return `impl Future + Send` rather than using `async fn` so that
//! the futures are guaranteed `Send`, which axum handlers require.

use super::{AdminAccount, PersistenceError, StoredAdmin};
use chrono::{DateTime, Utc};
use scoring::{
    NewSession, Overview, PerformanceBreakdown, QuestionStat, Session, SessionWithDetails,
    TrendPoint,
};
use std::future::Future;

/// Repository for game sessions and their details.
///
/// A session and its details are written together and removed together:
/// implementations must never leave details behind for a deleted session,
/// whatever the store's foreign-key configuration.
pub trait ScoreRepository: Send + Sync {
    fn insert_session(
        &self,
        session: &NewSession,
        created_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<SessionWithDetails, PersistenceError>> + Send;

    /// Sessions ordered by total score descending, ties in insertion order,
    /// together with the total number of sessions.
    fn list_sessions(
        &self,
        offset: u64,
        limit: u32,
    ) -> impl Future<Output = Result<(Vec<Session>, u64), PersistenceError>> + Send;

    fn load_session(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<SessionWithDetails>, PersistenceError>> + Send;

    /// Load the sessions whose id is in `ids`. Unknown ids are ignored.
    fn load_sessions(
        &self,
        ids: &[i64],
    ) -> impl Future<Output = Result<Vec<SessionWithDetails>, PersistenceError>> + Send;

    fn load_all_sessions(
        &self,
    ) -> impl Future<Output = Result<Vec<SessionWithDetails>, PersistenceError>> + Send;

    /// Delete the given sessions and their details. Returns the number of
    /// sessions removed.
    fn delete_sessions(
        &self,
        ids: &[i64],
    ) -> impl Future<Output = Result<u64, PersistenceError>> + Send;
}

/// Read-only aggregate queries backing the dashboard.
pub trait StatsRepository: Send + Sync {
    fn overview(&self) -> impl Future<Output = Result<Overview, PersistenceError>> + Send;

    fn performance(
        &self,
    ) -> impl Future<Output = Result<PerformanceBreakdown, PersistenceError>> + Send;

    /// Per-day mean total score, ascending by day, limited to the first
    /// `max_days` days with data.
    fn daily_trend(
        &self,
        max_days: u32,
    ) -> impl Future<Output = Result<Vec<TrendPoint>, PersistenceError>> + Send;

    fn question_analysis(
        &self,
    ) -> impl Future<Output = Result<Vec<QuestionStat>, PersistenceError>> + Send;
}

/// Repository for dashboard administrators.
///
/// Implementations store password hashes only; hashing happens above this layer.
pub trait AdminRepository: Send + Sync {
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<StoredAdmin>, PersistenceError>> + Send;

    fn list_admins(
        &self,
    ) -> impl Future<Output = Result<Vec<AdminAccount>, PersistenceError>> + Send;

    /// Fails with [`PersistenceError::DuplicateUsername`] if the name is taken.
    fn insert_admin(
        &self,
        username: &str,
        password_hash: &str,
        created_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<AdminAccount, PersistenceError>> + Send;

    fn delete_admin(&self, id: i64)
        -> impl Future<Output = Result<(), PersistenceError>> + Send;

    /// Returns `false` when no admin has this id.
    fn update_password(
        &self,
        id: i64,
        password_hash: &str,
    ) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
}
