use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered players.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

/// Identifier wrapper for training classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassroomId(pub String);

/// One of the nine waypoints a courier run can visit. Ordinal 0 is the depot
/// (home base); ordinals 1 through 8 are the delivery zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Waypoint {
    Depot,
    Harborside,
    MarketSquare,
    OldQuarter,
    RailYard,
    Uptown,
    Riverside,
    Hillcrest,
    Airfield,
}

impl Waypoint {
    /// The eight delivery zones, in ordinal order. The depot is never part of
    /// a bonus scan, so callers iterating zones start here.
    pub const ZONES: [Waypoint; 8] = [
        Waypoint::Harborside,
        Waypoint::MarketSquare,
        Waypoint::OldQuarter,
        Waypoint::RailYard,
        Waypoint::Uptown,
        Waypoint::Riverside,
        Waypoint::Hillcrest,
        Waypoint::Airfield,
    ];

    /// Build a waypoint from its wire ordinal. Anything outside 0..=8 is
    /// rejected; decode callers turn the miss into a format error.
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Waypoint::Depot),
            1 => Some(Waypoint::Harborside),
            2 => Some(Waypoint::MarketSquare),
            3 => Some(Waypoint::OldQuarter),
            4 => Some(Waypoint::RailYard),
            5 => Some(Waypoint::Uptown),
            6 => Some(Waypoint::Riverside),
            7 => Some(Waypoint::Hillcrest),
            8 => Some(Waypoint::Airfield),
            _ => None,
        }
    }

    pub const fn ordinal(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Waypoint::Depot => "depot",
            Waypoint::Harborside => "harborside",
            Waypoint::MarketSquare => "market square",
            Waypoint::OldQuarter => "old quarter",
            Waypoint::RailYard => "rail yard",
            Waypoint::Uptown => "uptown",
            Waypoint::Riverside => "riverside",
            Waypoint::Hillcrest => "hillcrest",
            Waypoint::Airfield => "airfield",
        }
    }
}

/// One delivery outcome inside a run: where the parcel was picked up, whether
/// the customer was satisfied, and the fare collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub origin: Waypoint,
    pub satisfied: bool,
    pub value: i64,
}

/// The decoded representation of one played match attempt. Transient: it only
/// exists between decoding a raw log and scoring it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub route: Vec<Waypoint>,
    pub deliveries: Vec<Delivery>,
    pub bonus_target: i64,
}

/// Roster entry for a student, keyed internally by [`PlayerId`] and resolved
/// externally by the device-assigned reference code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub external_ref: String,
    pub display_name: String,
}

/// A class an instructor runs, resolved by its business code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    pub id: ClassroomId,
    pub code: String,
    pub title: String,
}

/// Raw session log stored by the external play device for one match attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchAttempt {
    pub player: PlayerId,
    pub classroom: ClassroomId,
    pub match_number: u32,
    pub raw_log: String,
    pub recorded_at: DateTime<Utc>,
}

/// Persisted score row, uniquely keyed by `(player, classroom, match_number)`
/// and overwritten on reprocessing of the same key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub player: PlayerId,
    pub classroom: ClassroomId,
    pub match_number: u32,
    pub profit: i64,
    pub satisfaction_percent: i64,
    pub bonus: i64,
    pub scored_at: DateTime<Utc>,
}

impl MatchScore {
    /// The composite score the per-player average is built from.
    pub fn total(&self) -> i64 {
        self.profit + self.satisfaction_percent + self.bonus
    }
}

/// Recomputed summary for one player within one class. Always rebuilt from
/// the full set of the pair's stored scores, never incremented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player: PlayerId,
    pub classroom: ClassroomId,
    pub total_matches: u32,
    pub avg_score: i64,
}
