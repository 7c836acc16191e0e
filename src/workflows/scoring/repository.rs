use serde::Serialize;

use super::domain::{
    Classroom, ClassroomId, MatchAttempt, MatchScore, Player, PlayerId, PlayerSummary,
};

/// Roster lookups plus attempt storage, abstracted so the service module can
/// be exercised in isolation.
pub trait RosterRepository: Send + Sync {
    fn find_player(&self, external_ref: &str) -> Result<Option<Player>, RepositoryError>;
    fn find_classroom(&self, code: &str) -> Result<Option<Classroom>, RepositoryError>;
    fn fetch_attempt(
        &self,
        player: &PlayerId,
        classroom: &ClassroomId,
        match_number: u32,
    ) -> Result<Option<MatchAttempt>, RepositoryError>;
    fn record_attempt(&self, attempt: MatchAttempt) -> Result<(), RepositoryError>;
}

/// Storage for scored results and the recomputed player summaries.
pub trait ScoreRepository: Send + Sync {
    /// Insert or replace the score row for its `(player, classroom,
    /// match_number)` key. Last writer wins.
    fn upsert_score(&self, score: MatchScore) -> Result<(), RepositoryError>;
    fn scores_for(
        &self,
        player: &PlayerId,
        classroom: &ClassroomId,
    ) -> Result<Vec<MatchScore>, RepositoryError>;
    fn save_summary(&self, summary: PlayerSummary) -> Result<(), RepositoryError>;
    fn fetch_summary(
        &self,
        player: &PlayerId,
        classroom: &ClassroomId,
    ) -> Result<Option<PlayerSummary>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of a freshly scored match for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreView {
    pub player_ref: String,
    pub class_code: String,
    pub match_number: u32,
    pub profit: i64,
    pub satisfaction_percent: i64,
    pub bonus: i64,
}

/// Sanitized summary view, pairing the business identifiers with the
/// recomputed aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryView {
    pub player_ref: String,
    pub class_code: String,
    pub total_matches: u32,
    pub avg_score: i64,
}
