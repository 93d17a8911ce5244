//! SQLite-backed repository for game sessions and their choice details.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use scoring::{
    Detail, NewSession, Session, SessionWithDetails, DEFAULT_PATIENT_INDEX,
};
use sqlx::SqlitePool;

use super::helpers::{
    decode_count, decode_timestamp, encode_timestamp, id_list_query, ID_CHUNK_SIZE,
};
use crate::persistence::traits::ScoreRepository;
use crate::persistence::PersistenceError;

const SESSION_COLUMNS: &str = "SELECT id, player_name, play_time, time_score, question_score, \
     total_score, created_at FROM game_sessions";

const DETAIL_COLUMNS: &str = "SELECT id, session_id, choice_id, choice_text, question_text, \
     scenario, patient_index, is_correct, was_clicked, attempt_no FROM choice_results";

/// Row type for session queries, mapped via `sqlx::FromRow`.
#[derive(sqlx::FromRow)]
struct SessionRow {
    id: i64,
    player_name: String,
    play_time: i64,
    time_score: i64,
    question_score: i64,
    total_score: i64,
    created_at: i64,
}

impl SessionRow {
    fn into_session(self) -> Result<Session, PersistenceError> {
        Ok(Session {
            id: self.id,
            name: self.player_name,
            time: self.play_time,
            time_score: self.time_score,
            question_score: self.question_score,
            total_score: self.total_score,
            created_at: decode_timestamp(self.created_at)?,
        })
    }
}

/// Row type for detail queries, mapped via `sqlx::FromRow`.
#[derive(sqlx::FromRow)]
struct DetailRow {
    id: i64,
    session_id: i64,
    choice_id: String,
    choice_text: String,
    question_text: Option<String>,
    scenario: Option<String>,
    patient_index: Option<i64>,
    is_correct: bool,
    was_clicked: bool,
    attempt_no: i64,
}

impl From<DetailRow> for Detail {
    fn from(r: DetailRow) -> Self {
        Self {
            id: r.id,
            choice_id: r.choice_id,
            choice_text: r.choice_text,
            question_text: r.question_text,
            scenario: r.scenario,
            patient_index: r.patient_index,
            is_correct: r.is_correct,
            was_clicked: r.was_clicked,
            attempt_no: r.attempt_no,
        }
    }
}

/// SQLite implementation of [`ScoreRepository`].
pub struct SqliteScoreRepository {
    pool: SqlitePool,
}

impl SqliteScoreRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ScoreRepository for SqliteScoreRepository {
    async fn insert_session(
        &self,
        session: &NewSession,
        created_at: DateTime<Utc>,
    ) -> Result<SessionWithDetails, PersistenceError> {
        let created_at_secs = encode_timestamp(created_at);

        let mut tx = self.pool.begin().await?;

        let session_id = sqlx::query(
            r#"
            INSERT INTO game_sessions
                (player_name, play_time, time_score, question_score, total_score, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&session.name)
        .bind(session.time)
        .bind(session.time_score)
        .bind(session.question_score)
        .bind(session.total_score)
        .bind(created_at_secs)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let mut details = Vec::with_capacity(session.details.len());
        for detail in &session.details {
            let patient_index = detail.patient_index.unwrap_or(DEFAULT_PATIENT_INDEX);
            let detail_id = sqlx::query(
                r#"
                INSERT INTO choice_results
                    (choice_id, choice_text, question_text, scenario, patient_index,
                     is_correct, was_clicked, attempt_no, session_id)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&detail.choice_id)
            .bind(&detail.choice_text)
            .bind(&detail.question_text)
            .bind(&detail.scenario)
            .bind(patient_index)
            .bind(detail.is_correct)
            .bind(detail.was_clicked)
            .bind(detail.attempt_no)
            .bind(session_id)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

            details.push(Detail {
                id: detail_id,
                choice_id: detail.choice_id.clone(),
                choice_text: detail.choice_text.clone(),
                question_text: detail.question_text.clone(),
                scenario: detail.scenario.clone(),
                patient_index: Some(patient_index),
                is_correct: detail.is_correct,
                was_clicked: detail.was_clicked,
                attempt_no: detail.attempt_no,
            });
        }

        tx.commit().await?;

        Ok(SessionWithDetails {
            session: Session {
                id: session_id,
                name: session.name.clone(),
                time: session.time,
                time_score: session.time_score,
                question_score: session.question_score,
                total_score: session.total_score,
                created_at: decode_timestamp(created_at_secs)?,
            },
            details,
        })
    }

    async fn list_sessions(
        &self,
        offset: u64,
        limit: u32,
    ) -> Result<(Vec<Session>, u64), PersistenceError> {
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let rows: Vec<SessionRow> = sqlx::query_as(&format!(
            "{SESSION_COLUMNS} ORDER BY total_score DESC, id ASC LIMIT ? OFFSET ?"
        ))
        .bind(i64::from(limit))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM game_sessions")
            .fetch_one(&self.pool)
            .await?;

        let sessions = rows
            .into_iter()
            .map(SessionRow::into_session)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((sessions, decode_count(total)))
    }

    async fn load_session(&self, id: i64) -> Result<Option<SessionWithDetails>, PersistenceError> {
        let row: Option<SessionRow> = sqlx::query_as(&format!("{SESSION_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            None => Ok(None),
            Some(r) => {
                let mut details = load_details_for_sessions(&self.pool, &[r.id]).await?;
                let details = details.remove(&r.id).unwrap_or_default();
                Ok(Some(SessionWithDetails {
                    session: r.into_session()?,
                    details,
                }))
            }
        }
    }

    async fn load_sessions(&self, ids: &[i64]) -> Result<Vec<SessionWithDetails>, PersistenceError> {
        let mut rows: Vec<SessionRow> = Vec::new();
        for chunk in ids.chunks(ID_CHUNK_SIZE) {
            let mut query = id_list_query(&format!("{SESSION_COLUMNS} WHERE id IN"), chunk, "");
            rows.extend(
                query
                    .build_query_as::<SessionRow>()
                    .fetch_all(&self.pool)
                    .await?,
            );
        }
        rows.sort_by_key(|r| r.id);
        rows.dedup_by_key(|r| r.id);

        attach_details(&self.pool, rows).await
    }

    async fn load_all_sessions(&self) -> Result<Vec<SessionWithDetails>, PersistenceError> {
        let rows: Vec<SessionRow> = sqlx::query_as(&format!("{SESSION_COLUMNS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        attach_details(&self.pool, rows).await
    }

    async fn delete_sessions(&self, ids: &[i64]) -> Result<u64, PersistenceError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut removed = 0;
        let mut tx = self.pool.begin().await?;

        for chunk in ids.chunks(ID_CHUNK_SIZE) {
            // Details go first so nothing is orphaned even without FK enforcement.
            id_list_query("DELETE FROM choice_results WHERE session_id IN", chunk, "")
                .build()
                .execute(&mut *tx)
                .await?;

            removed += id_list_query("DELETE FROM game_sessions WHERE id IN", chunk, "")
                .build()
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        tx.commit().await?;
        Ok(removed)
    }
}

/// Pair each session row with its details, preserving row order.
async fn attach_details(
    pool: &SqlitePool,
    rows: Vec<SessionRow>,
) -> Result<Vec<SessionWithDetails>, PersistenceError> {
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut details = load_details_for_sessions(pool, &ids).await?;

    rows.into_iter()
        .map(|r| {
            let session_details = details.remove(&r.id).unwrap_or_default();
            Ok(SessionWithDetails {
                session: r.into_session()?,
                details: session_details,
            })
        })
        .collect()
}

/// Load the details of the given sessions, grouped by session id and ordered
/// by detail id within each group.
async fn load_details_for_sessions(
    pool: &SqlitePool,
    session_ids: &[i64],
) -> Result<HashMap<i64, Vec<Detail>>, PersistenceError> {
    let mut grouped: HashMap<i64, Vec<Detail>> = HashMap::new();

    for chunk in session_ids.chunks(ID_CHUNK_SIZE) {
        let mut query = id_list_query(
            &format!("{DETAIL_COLUMNS} WHERE session_id IN"),
            chunk,
            " ORDER BY id",
        );
        let rows = query
            .build_query_as::<DetailRow>()
            .fetch_all(pool)
            .await?;

        for row in rows {
            grouped.entry(row.session_id).or_default().push(row.into());
        }
    }

    Ok(grouped)
}
