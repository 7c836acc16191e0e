use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};

use crate::workflows::scoring::domain::{
    Classroom, ClassroomId, MatchAttempt, MatchScore, Player, PlayerId, PlayerSummary,
};
use crate::workflows::scoring::repository::{
    RepositoryError, RosterRepository, ScoreRepository,
};

pub(super) const PLAYER_REF: &str = "unit-07";
pub(super) const CLASS_CODE: &str = "LOG-101";

#[derive(Default)]
pub(super) struct MemoryRoster {
    players: Mutex<HashMap<String, Player>>,
    classrooms: Mutex<HashMap<String, Classroom>>,
    attempts: Mutex<HashMap<(PlayerId, ClassroomId, u32), MatchAttempt>>,
}

impl MemoryRoster {
    pub(super) fn add_player(&self, external_ref: &str, display_name: &str) -> PlayerId {
        let id = PlayerId(format!("player-{external_ref}"));
        let player = Player {
            id: id.clone(),
            external_ref: external_ref.to_string(),
            display_name: display_name.to_string(),
        };
        self.players
            .lock()
            .expect("roster mutex poisoned")
            .insert(external_ref.to_string(), player);
        id
    }

    pub(super) fn add_classroom(&self, code: &str, title: &str) -> ClassroomId {
        let id = ClassroomId(format!("class-{code}"));
        let classroom = Classroom {
            id: id.clone(),
            code: code.to_string(),
            title: title.to_string(),
        };
        self.classrooms
            .lock()
            .expect("roster mutex poisoned")
            .insert(code.to_string(), classroom);
        id
    }
}

impl RosterRepository for MemoryRoster {
    fn find_player(&self, external_ref: &str) -> Result<Option<Player>, RepositoryError> {
        let guard = self.players.lock().expect("roster mutex poisoned");
        Ok(guard.get(external_ref).cloned())
    }

    fn find_classroom(&self, code: &str) -> Result<Option<Classroom>, RepositoryError> {
        let guard = self.classrooms.lock().expect("roster mutex poisoned");
        Ok(guard.get(code).cloned())
    }

    fn fetch_attempt(
        &self,
        player: &PlayerId,
        classroom: &ClassroomId,
        match_number: u32,
    ) -> Result<Option<MatchAttempt>, RepositoryError> {
        let guard = self.attempts.lock().expect("roster mutex poisoned");
        Ok(guard
            .get(&(player.clone(), classroom.clone(), match_number))
            .cloned())
    }

    fn record_attempt(&self, attempt: MatchAttempt) -> Result<(), RepositoryError> {
        let key = (
            attempt.player.clone(),
            attempt.classroom.clone(),
            attempt.match_number,
        );
        self.attempts
            .lock()
            .expect("roster mutex poisoned")
            .insert(key, attempt);
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryScores {
    rows: Mutex<HashMap<(PlayerId, ClassroomId, u32), MatchScore>>,
    summaries: Mutex<HashMap<(PlayerId, ClassroomId), PlayerSummary>>,
}

impl MemoryScores {
    pub(super) fn row_count(&self) -> usize {
        self.rows.lock().expect("score mutex poisoned").len()
    }

    pub(super) fn summary_of(
        &self,
        player: &PlayerId,
        classroom: &ClassroomId,
    ) -> Option<PlayerSummary> {
        self.summaries
            .lock()
            .expect("score mutex poisoned")
            .get(&(player.clone(), classroom.clone()))
            .cloned()
    }
}

impl ScoreRepository for MemoryScores {
    fn upsert_score(&self, score: MatchScore) -> Result<(), RepositoryError> {
        let key = (score.player.clone(), score.classroom.clone(), score.match_number);
        self.rows
            .lock()
            .expect("score mutex poisoned")
            .insert(key, score);
        Ok(())
    }

    fn scores_for(
        &self,
        player: &PlayerId,
        classroom: &ClassroomId,
    ) -> Result<Vec<MatchScore>, RepositoryError> {
        let guard = self.rows.lock().expect("score mutex poisoned");
        Ok(guard
            .values()
            .filter(|score| &score.player == player && &score.classroom == classroom)
            .cloned()
            .collect())
    }

    fn save_summary(&self, summary: PlayerSummary) -> Result<(), RepositoryError> {
        let key = (summary.player.clone(), summary.classroom.clone());
        self.summaries
            .lock()
            .expect("score mutex poisoned")
            .insert(key, summary);
        Ok(())
    }

    fn fetch_summary(
        &self,
        player: &PlayerId,
        classroom: &ClassroomId,
    ) -> Result<Option<PlayerSummary>, RepositoryError> {
        let guard = self.summaries.lock().expect("score mutex poisoned");
        Ok(guard.get(&(player.clone(), classroom.clone())).cloned())
    }
}

/// Score store whose summary writes always fail; score upserts still land.
pub(super) struct FailingSummaries(pub(super) Arc<MemoryScores>);

impl ScoreRepository for FailingSummaries {
    fn upsert_score(&self, score: MatchScore) -> Result<(), RepositoryError> {
        self.0.upsert_score(score)
    }

    fn scores_for(
        &self,
        player: &PlayerId,
        classroom: &ClassroomId,
    ) -> Result<Vec<MatchScore>, RepositoryError> {
        self.0.scores_for(player, classroom)
    }

    fn save_summary(&self, _summary: PlayerSummary) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable(
            "summary store offline".to_string(),
        ))
    }

    fn fetch_summary(
        &self,
        player: &PlayerId,
        classroom: &ClassroomId,
    ) -> Result<Option<PlayerSummary>, RepositoryError> {
        self.0.fetch_summary(player, classroom)
    }
}

pub(super) fn run_log(route: &str, deliveries: &str, bonus_target: &str) -> String {
    format!("v1|{route}|{deliveries}|{bonus_target}|dev-07|2026-03-02T10:15:00Z|9f3a")
}

pub(super) fn seeded_roster() -> (Arc<MemoryRoster>, PlayerId, ClassroomId) {
    let roster = Arc::new(MemoryRoster::default());
    let player = roster.add_player(PLAYER_REF, "Ava Reyes");
    let classroom = roster.add_classroom(CLASS_CODE, "Logistics Fundamentals");
    (roster, player, classroom)
}

pub(super) fn seed_attempt(
    roster: &MemoryRoster,
    player: &PlayerId,
    classroom: &ClassroomId,
    match_number: u32,
    raw_log: String,
) {
    roster
        .record_attempt(MatchAttempt {
            player: player.clone(),
            classroom: classroom.clone(),
            match_number,
            raw_log,
            recorded_at: Utc.with_ymd_and_hms(2026, 3, 2, 10, 15, 0).unwrap(),
        })
        .expect("attempt stored");
}
