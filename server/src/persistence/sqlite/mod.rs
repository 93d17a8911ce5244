//! SQLite-backed repository implementations.
//!
//! ## Database setup
//!
//! [`Database`] wraps a `sqlx::SqlitePool` configured with:
//! - **WAL mode**: one writer and multiple concurrent readers.
//! - **Foreign keys enabled**: `choice_results.session_id` cascades on delete.
//! - **Embedded migrations**: `sqlx::migrate!` applies `server/migrations/*.sql`
//!   in order when [`Database::open`] is called. Each schema change is a new
//!   numbered file; applied files are never edited.
//!
//! ## Repository types
//!
//! | Type | Trait |
//! |------|-------|
//! | [`SqliteScoreRepository`] | `ScoreRepository` |
//! | [`SqliteStatsRepository`] | `StatsRepository` |
//! | [`SqliteAdminRepository`] | `AdminRepository` |
//!
//! Timestamps are stored as unix seconds in `INTEGER` columns and converted
//! by the helpers in [`helpers`].

mod admin_repo;
mod database;
mod score_repo;
mod stats_repo;
pub(crate) mod helpers;

pub use admin_repo::SqliteAdminRepository;
pub use database::Database;
pub use score_repo::SqliteScoreRepository;
pub use stats_repo::SqliteStatsRepository;
