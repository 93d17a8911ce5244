//! Dashboard statistics.
//!
//! The dashboard combines four independent aggregates:
//!
//! | Aggregate | Built from |
//! |-----------|------------|
//! | [`Overview`] | every session's name, time and question score ([`OverviewAccumulator`]) |
//! | [`PerformanceBreakdown`] | every session's total score |
//! | [`TrendPoint`] | per-day mean total score, earliest [`TREND_DAY_LIMIT`] days |
//! | [`QuestionStat`] | details with a question text, grouped by scenario and question |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::buckets::PerformanceBreakdown;
use crate::participants::count_participants;

/// Number of distinct days reported in the trend, counted from the earliest
/// day with data.
pub const TREND_DAY_LIMIT: u32 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_participants: u64,
    pub avg_time: i64,
    pub avg_question_score: i64,
}

/// Single-pass accumulator for [`Overview`].
///
/// Sums are kept in `i128`, which cannot overflow for fewer than 2^64 rows of
/// `i64` values.
#[derive(Debug, Clone, Default)]
pub struct OverviewAccumulator {
    sessions: u64,
    participants: u64,
    time_sum: i128,
    question_score_sum: i128,
}

impl OverviewAccumulator {
    pub fn record(&mut self, name: &str, time: i64, question_score: i64) {
        self.sessions += 1;
        self.participants += count_participants(name);
        self.time_sum += i128::from(time);
        self.question_score_sum += i128::from(question_score);
    }

    pub fn finish(&self) -> Overview {
        Overview {
            total_participants: self.participants,
            avg_time: rounded_mean(self.time_sum, self.sessions),
            avg_question_score: rounded_mean(self.question_score_sum, self.sessions),
        }
    }
}

/// Mean of `count` values summing to `sum`, rounded to the nearest integer
/// (halves round up). Zero when there are no values.
pub fn rounded_mean(sum: i128, count: u64) -> i64 {
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64 + 0.5).floor() as i64
}

/// Mean total score of all sessions created on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub avg_score: f64,
}

/// Correct/wrong answer counts for one question within a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStat {
    pub scenario: Option<String>,
    pub question: String,
    pub correct: u64,
    pub wrong: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub overview: Overview,
    pub performance: PerformanceBreakdown,
    pub trend: Vec<TrendPoint>,
    pub question_analysis: Vec<QuestionStat>,
}
