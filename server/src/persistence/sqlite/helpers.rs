//! Shared encode/decode helpers for SQLite ↔ domain type conversions.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{QueryBuilder, Sqlite};

use crate::persistence::PersistenceError;

/// Maximum number of ids bound into a single `IN (...)` list. Kept well below
/// SQLite's host-parameter limit.
pub const ID_CHUNK_SIZE: usize = 500;

/// Format produced by SQLite's `date()` function.
const DAY_FORMAT: &str = "%Y-%m-%d";

// ── Timestamps ─────────────────────────────────────────────────────────

/// Encode a timestamp as unix seconds for `created_at` columns.
pub fn encode_timestamp(ts: DateTime<Utc>) -> i64 {
    ts.timestamp()
}

/// Decode unix seconds from a `created_at` column.
pub fn decode_timestamp(secs: i64) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| PersistenceError::InvalidRow(format!("timestamp out of range: {secs}")))
}

/// Decode a `YYYY-MM-DD` day string produced by `date(created_at, 'unixepoch')`.
pub fn decode_day(day: &str) -> Result<NaiveDate, PersistenceError> {
    NaiveDate::parse_from_str(day, DAY_FORMAT)
        .map_err(|e| PersistenceError::InvalidRow(format!("invalid day {day:?}: {e}")))
}

// ── Counts ─────────────────────────────────────────────────────────────

/// SQLite counts come back as `i64`; they are never negative.
pub fn decode_count(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

// ── Id lists ───────────────────────────────────────────────────────────

/// Build `<prefix> (?, ?, ...)<suffix>` with every id bound as a parameter.
///
/// Callers are expected to pass at most [`ID_CHUNK_SIZE`] ids and never an
/// empty slice (`IN ()` is a syntax error in SQLite).
pub fn id_list_query<'args>(
    prefix: &str,
    ids: &'args [i64],
    suffix: &str,
) -> QueryBuilder<'args, Sqlite> {
    debug_assert!(!ids.is_empty());
    let mut builder = QueryBuilder::new(prefix);
    builder.push(" (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
    builder.push(suffix);
    builder
}
