//! Domain types and pure statistics for game-session scoring.
//!
//! Nothing in this crate performs I/O. The server crate feeds rows loaded from
//! the record store through the folds defined here, so every scoring rule
//! (participant counting, bucket thresholds, averaging) lives in one place.

pub mod buckets;
pub mod pagination;
pub mod participants;
pub mod stats;
pub mod types;

pub use buckets::{PerformanceBreakdown, ScoreBucket, AVERAGE_THRESHOLD, EXCELLENT_THRESHOLD};
pub use pagination::{Page, PageRequest, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use participants::count_participants;
pub use stats::{
    rounded_mean, DashboardStats, Overview, OverviewAccumulator, QuestionStat, TrendPoint,
    TREND_DAY_LIMIT,
};
pub use types::{Detail, NewDetail, NewSession, Session, SessionWithDetails, DEFAULT_PATIENT_INDEX};
