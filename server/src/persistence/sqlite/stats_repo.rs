//! SQLite-backed dashboard aggregates.
//!
//! Overview and performance stream every session row through the folds in the
//! `scoring` crate, so participant counting and bucket thresholds are defined
//! once. Trend and question analysis are plain `GROUP BY` queries.

use futures::TryStreamExt;
use scoring::{Overview, OverviewAccumulator, PerformanceBreakdown, QuestionStat, TrendPoint};
use sqlx::SqlitePool;

use super::helpers::{decode_count, decode_day};
use crate::persistence::traits::StatsRepository;
use crate::persistence::PersistenceError;

/// SQLite implementation of [`StatsRepository`].
pub struct SqliteStatsRepository {
    pool: SqlitePool,
}

impl SqliteStatsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl StatsRepository for SqliteStatsRepository {
    async fn overview(&self) -> Result<Overview, PersistenceError> {
        let mut rows = sqlx::query_as::<_, (String, i64, i64)>(
            "SELECT player_name, play_time, question_score FROM game_sessions",
        )
        .fetch(&self.pool);

        let mut acc = OverviewAccumulator::default();
        while let Some((name, time, question_score)) = rows.try_next().await? {
            acc.record(&name, time, question_score);
        }
        Ok(acc.finish())
    }

    async fn performance(&self) -> Result<PerformanceBreakdown, PersistenceError> {
        let mut rows =
            sqlx::query_as::<_, (i64,)>("SELECT total_score FROM game_sessions").fetch(&self.pool);

        let mut breakdown = PerformanceBreakdown::default();
        while let Some((total_score,)) = rows.try_next().await? {
            breakdown.record(total_score);
        }
        tracing::debug!(sessions = breakdown.total(), "Performance breakdown computed");
        Ok(breakdown)
    }

    async fn daily_trend(&self, max_days: u32) -> Result<Vec<TrendPoint>, PersistenceError> {
        let rows: Vec<(String, f64)> = sqlx::query_as(
            r#"
            SELECT date(created_at, 'unixepoch') AS day,
                   AVG(total_score) AS avg_score
            FROM game_sessions
            GROUP BY day
            ORDER BY day ASC
            LIMIT ?
            "#,
        )
        .bind(i64::from(max_days))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(day, avg_score)| {
                Ok(TrendPoint {
                    date: decode_day(&day)?,
                    avg_score,
                })
            })
            .collect()
    }

    async fn question_analysis(&self) -> Result<Vec<QuestionStat>, PersistenceError> {
        let rows: Vec<(Option<String>, String, i64, i64)> = sqlx::query_as(
            r#"
            SELECT scenario,
                   question_text,
                   SUM(CASE WHEN is_correct THEN 1 ELSE 0 END) AS correct,
                   SUM(CASE WHEN is_correct THEN 0 ELSE 1 END) AS wrong
            FROM choice_results
            WHERE question_text IS NOT NULL
            GROUP BY scenario, question_text
            ORDER BY scenario, question_text
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(scenario, question, correct, wrong)| QuestionStat {
                scenario,
                question,
                correct: decode_count(correct),
                wrong: decode_count(wrong),
            })
            .collect())
    }
}
