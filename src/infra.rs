use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;

use courier_scoreboard::workflows::scoring::{
    Classroom, ClassroomId, MatchAttempt, MatchScore, Player, PlayerId, PlayerSummary,
    RepositoryError, RosterRepository, ScoreRepository,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRosterRepository {
    players: Arc<Mutex<HashMap<String, Player>>>,
    classrooms: Arc<Mutex<HashMap<String, Classroom>>>,
    attempts: Arc<Mutex<HashMap<(PlayerId, ClassroomId, u32), MatchAttempt>>>,
}

impl InMemoryRosterRepository {
    pub(crate) fn register_player(&self, external_ref: &str, display_name: &str) -> PlayerId {
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

    pub(crate) fn register_classroom(&self, code: &str, title: &str) -> ClassroomId {
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

impl RosterRepository for InMemoryRosterRepository {
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryScoreRepository {
    rows: Arc<Mutex<HashMap<(PlayerId, ClassroomId, u32), MatchScore>>>,
    summaries: Arc<Mutex<HashMap<(PlayerId, ClassroomId), PlayerSummary>>>,
}

impl ScoreRepository for InMemoryScoreRepository {
    fn upsert_score(&self, score: MatchScore) -> Result<(), RepositoryError> {
        let key = (
            score.player.clone(),
            score.classroom.clone(),
            score.match_number,
        );
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
