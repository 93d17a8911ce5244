//! Score aggregation: leaderboard, history, deletion, and dashboard statistics.
//!
//! [`ScoreService`] issues one or more repository calls per operation and holds
//! no locks of its own. Multi-query operations (`remove_bulk`,
//! `dashboard_stats`) are not atomic: a write landing between two of their
//! queries can show up in one aggregate and not in another.

use scoring::{
    DashboardStats, NewSession, Page, PageRequest, Session, SessionWithDetails, TREND_DAY_LIMIT,
};

use crate::persistence::traits::{ScoreRepository, StatsRepository};
use crate::persistence::{now_timestamp, PersistenceError};

pub struct ScoreService<R, S> {
    sessions: R,
    stats: S,
}

impl<R: ScoreRepository, S: StatsRepository> ScoreService<R, S> {
    pub fn new(sessions: R, stats: S) -> Self {
        Self { sessions, stats }
    }

    /// Store a submitted session with its details. Scores are stored as given.
    #[tracing::instrument(skip_all, fields(details = new.details.len()))]
    pub async fn create(&self, new: NewSession) -> Result<SessionWithDetails, PersistenceError> {
        let stored = self.sessions.insert_session(&new, now_timestamp()).await?;
        tracing::info!(
            session_id = stored.id(),
            total_score = stored.session.total_score,
            "Session recorded"
        );
        Ok(stored)
    }

    /// One leaderboard page, highest total score first.
    pub async fn find_all(&self, request: PageRequest) -> Result<Page<Session>, PersistenceError> {
        let (data, total) = self
            .sessions
            .list_sessions(request.offset(), request.limit)
            .await?;
        Ok(Page::new(data, total, request))
    }

    pub async fn find_one(&self, id: i64) -> Result<Option<SessionWithDetails>, PersistenceError> {
        self.sessions.load_session(id).await
    }

    /// Delete one session and its details. Unknown ids are a no-op returning `None`.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: i64) -> Result<Option<SessionWithDetails>, PersistenceError> {
        let Some(session) = self.sessions.load_session(id).await? else {
            tracing::debug!("Session not found, nothing to delete");
            return Ok(None);
        };

        self.sessions.delete_sessions(&[session.id()]).await?;
        tracing::info!(details = session.details.len(), "Session deleted");
        Ok(Some(session))
    }

    /// Delete several sessions, or every session when `delete_all` is set.
    ///
    /// With `delete_all`, every session is loaded with its details before
    /// deletion, so memory grows with the table size. Without it, an empty
    /// `ids` list deletes nothing. Returns the sessions that were removed.
    #[tracing::instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn remove_bulk(
        &self,
        ids: &[i64],
        delete_all: bool,
    ) -> Result<Vec<SessionWithDetails>, PersistenceError> {
        let sessions = if delete_all {
            self.sessions.load_all_sessions().await?
        } else if ids.is_empty() {
            return Ok(Vec::new());
        } else {
            self.sessions.load_sessions(ids).await?
        };

        let found: Vec<i64> = sessions.iter().map(SessionWithDetails::id).collect();
        let removed = self.sessions.delete_sessions(&found).await?;
        tracing::info!(removed, "Sessions deleted");
        Ok(sessions)
    }

    /// Compute every dashboard aggregate. Any failing query fails the call.
    #[tracing::instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, PersistenceError> {
        let overview = self.stats.overview().await?;
        let performance = self.stats.performance().await?;
        let trend = self.stats.daily_trend(TREND_DAY_LIMIT).await?;
        let question_analysis = self.stats.question_analysis().await?;

        Ok(DashboardStats {
            overview,
            performance,
            trend,
            question_analysis,
        })
    }
}
