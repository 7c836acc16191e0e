//! Match-result scoring for courier training runs.
//!
//! The play device stores one compact textual log per match attempt. This
//! workflow decodes that log, derives profit, satisfaction percentage, and
//! bonus, persists the result idempotently, and keeps the player's per-class
//! summary recomputed from the full set of stored scores.

pub mod codec;
pub mod distance;
pub mod domain;
pub mod engine;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use codec::{decode_delivery, decode_run, FormatError};
pub use distance::travel_cost;
pub use domain::{
    Classroom, ClassroomId, Delivery, MatchAttempt, MatchScore, Player, PlayerId, PlayerSummary,
    RunRecord, Waypoint,
};
pub use engine::{score_run, ScoreBreakdown};
pub use import::{ImportOutcome, SessionImportError, SessionLogImporter};
pub use repository::{
    RepositoryError, RosterRepository, ScoreRepository, ScoreView, SummaryView,
};
pub use router::scoring_router;
pub use service::{MatchScoringService, ScoreMatchRequest, ScoringServiceError};
