//! Fixed score-range classification used by the dashboard.

use serde::{Deserialize, Serialize};

/// Lowest total score classified as [`ScoreBucket::Excellent`].
pub const EXCELLENT_THRESHOLD: i64 = 800;

/// Lowest total score classified as [`ScoreBucket::Average`].
pub const AVERAGE_THRESHOLD: i64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreBucket {
    /// `total_score >= 800`
    Excellent,
    /// `500 <= total_score < 800`
    Average,
    /// `total_score < 500`
    NeedImprove,
}

impl ScoreBucket {
    pub fn classify(total_score: i64) -> Self {
        if total_score >= EXCELLENT_THRESHOLD {
            ScoreBucket::Excellent
        } else if total_score >= AVERAGE_THRESHOLD {
            ScoreBucket::Average
        } else {
            ScoreBucket::NeedImprove
        }
    }
}

/// Session counts per bucket. The three counts always sum to the number of
/// scores recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceBreakdown {
    pub excellent: u64,
    pub average: u64,
    pub need_improve: u64,
}

impl PerformanceBreakdown {
    pub fn record(&mut self, total_score: i64) {
        match ScoreBucket::classify(total_score) {
            ScoreBucket::Excellent => self.excellent += 1,
            ScoreBucket::Average => self.average += 1,
            ScoreBucket::NeedImprove => self.need_improve += 1,
        }
    }

    /// Number of scores recorded.
    pub fn total(&self) -> u64 {
        self.excellent + self.average + self.need_improve
    }
}
