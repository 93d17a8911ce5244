//! Session and detail records as submitted by clients and returned by the store.
//!
//! Field names serialize in camelCase, which is the shape the dashboard and the
//! game clients exchange over HTTP.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Patient index stored when a submission omits it.
pub const DEFAULT_PATIENT_INDEX: i64 = 0;

/// One answered choice inside a submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewDetail {
    pub choice_id: String,
    pub choice_text: String,
    #[serde(default)]
    pub question_text: Option<String>,
    #[serde(default)]
    pub scenario: Option<String>,
    #[serde(default)]
    pub patient_index: Option<i64>,
    pub is_correct: bool,
    pub was_clicked: bool,
    pub attempt_no: i64,
}

/// A completed game or quiz attempt as submitted by a client.
///
/// Scores are trusted as given: `total_score` is expected to equal
/// `time_score + question_score` but nothing checks it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    /// Participant name, or several names joined with commas for a team attempt.
    pub name: String,
    /// Elapsed seconds.
    pub time: i64,
    pub time_score: i64,
    pub question_score: i64,
    pub total_score: i64,
    #[serde(default)]
    pub details: Vec<NewDetail>,
}

/// A stored session without its details, as listed on the leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i64,
    pub name: String,
    pub time: i64,
    pub time_score: i64,
    pub question_score: i64,
    pub total_score: i64,
    pub created_at: DateTime<Utc>,
}

/// A stored answered choice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Detail {
    pub id: i64,
    pub choice_id: String,
    pub choice_text: String,
    pub question_text: Option<String>,
    pub scenario: Option<String>,
    pub patient_index: Option<i64>,
    pub is_correct: bool,
    pub was_clicked: bool,
    pub attempt_no: i64,
}

/// A stored session together with all of its details, ordered by detail id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionWithDetails {
    #[serde(flatten)]
    pub session: Session,
    pub details: Vec<Detail>,
}

impl SessionWithDetails {
    pub fn id(&self) -> i64 {
        self.session.id
    }
}
