use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::warn;

use super::codec::{decode_run, FormatError};
use super::domain::{ClassroomId, MatchScore, PlayerId, PlayerSummary};
use super::engine::score_run;
use super::repository::{
    RepositoryError, RosterRepository, ScoreRepository, ScoreView, SummaryView,
};

/// Business identifiers naming one match attempt to (re)score.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScoreMatchRequest {
    pub player_ref: String,
    pub class_code: String,
    pub match_number: u32,
}

/// Service orchestrating decode, scoring, and idempotent persistence for one
/// match attempt at a time.
pub struct MatchScoringService<R, S> {
    roster: Arc<R>,
    scores: Arc<S>,
}

impl<R, S> MatchScoringService<R, S>
where
    R: RosterRepository + 'static,
    S: ScoreRepository + 'static,
{
    pub fn new(roster: Arc<R>, scores: Arc<S>) -> Self {
        Self { roster, scores }
    }

    /// Resolve the attempt, decode and score its stored log, upsert the score
    /// row, and refresh the player's class summary.
    ///
    /// Reprocessing the same key is safe: scoring is a pure function of the
    /// raw log and the upsert replaces rather than appends. A summary write
    /// failure is reported through the log but does not undo the committed
    /// score; the next successful write rebuilds the summary in full.
    pub fn process(&self, request: &ScoreMatchRequest) -> Result<ScoreView, ScoringServiceError> {
        let player = self
            .roster
            .find_player(&request.player_ref)?
            .ok_or_else(|| ScoringServiceError::PlayerNotFound(request.player_ref.clone()))?;
        let classroom = self
            .roster
            .find_classroom(&request.class_code)?
            .ok_or_else(|| ScoringServiceError::ClassroomNotFound(request.class_code.clone()))?;
        let attempt = self
            .roster
            .fetch_attempt(&player.id, &classroom.id, request.match_number)?
            .ok_or_else(|| ScoringServiceError::AttemptNotFound {
                class_code: classroom.code.clone(),
                match_number: request.match_number,
            })?;

        let record = decode_run(&attempt.raw_log)?;
        let breakdown = score_run(&record);

        let score = MatchScore {
            player: player.id.clone(),
            classroom: classroom.id.clone(),
            match_number: request.match_number,
            profit: breakdown.profit,
            satisfaction_percent: breakdown.satisfaction_percent,
            bonus: breakdown.bonus,
            scored_at: Utc::now(),
        };
        self.scores.upsert_score(score)?;

        if let Err(error) = self.refresh_summary(&player.id, &classroom.id) {
            warn!(
                player = %player.external_ref,
                class = %classroom.code,
                %error,
                "summary refresh failed after committed score"
            );
        }

        Ok(ScoreView {
            player_ref: player.external_ref,
            class_code: classroom.code,
            match_number: request.match_number,
            profit: breakdown.profit,
            satisfaction_percent: breakdown.satisfaction_percent,
            bonus: breakdown.bonus,
        })
    }

    /// Fetch the recomputed summary for a player within a class.
    pub fn summary(
        &self,
        player_ref: &str,
        class_code: &str,
    ) -> Result<SummaryView, ScoringServiceError> {
        let player = self
            .roster
            .find_player(player_ref)?
            .ok_or_else(|| ScoringServiceError::PlayerNotFound(player_ref.to_string()))?;
        let classroom = self
            .roster
            .find_classroom(class_code)?
            .ok_or_else(|| ScoringServiceError::ClassroomNotFound(class_code.to_string()))?;

        let summary = self
            .scores
            .fetch_summary(&player.id, &classroom.id)?
            .ok_or_else(|| ScoringServiceError::SummaryNotFound {
                player_ref: player_ref.to_string(),
                class_code: class_code.to_string(),
            })?;

        Ok(SummaryView {
            player_ref: player.external_ref,
            class_code: classroom.code,
            total_matches: summary.total_matches,
            avg_score: summary.avg_score,
        })
    }

    // Full recompute from the pair's stored rows. Matches are counted by
    // distinct match number, so replays of one attempt never inflate the
    // total.
    fn refresh_summary(
        &self,
        player: &PlayerId,
        classroom: &ClassroomId,
    ) -> Result<(), RepositoryError> {
        let scores = self.scores.scores_for(player, classroom)?;
        let match_numbers: BTreeSet<u32> = scores.iter().map(|score| score.match_number).collect();
        let total_matches = match_numbers.len() as u32;
        if total_matches == 0 {
            return Ok(());
        }

        let total: i64 = scores.iter().map(MatchScore::total).sum();
        let avg_score = (total as f64 / f64::from(total_matches)).round() as i64;

        self.scores.save_summary(PlayerSummary {
            player: player.clone(),
            classroom: classroom.clone(),
            total_matches,
            avg_score,
        })
    }
}

/// Error raised by the match scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringServiceError {
    #[error("player '{0}' is not registered")]
    PlayerNotFound(String),
    #[error("class '{0}' does not exist")]
    ClassroomNotFound(String),
    #[error("no attempt {match_number} recorded in class '{class_code}'")]
    AttemptNotFound { class_code: String, match_number: u32 },
    #[error("no summary yet for player '{player_ref}' in class '{class_code}'")]
    SummaryNotFound {
        player_ref: String,
        class_code: String,
    },
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
