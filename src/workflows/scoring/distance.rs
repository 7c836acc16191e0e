//! Fixed travel-cost chart between every ordered pair of waypoints.

use super::domain::Waypoint;

// Row = origin ordinal, column = destination ordinal. Same-waypoint pairs
// cost nothing. Constant for the life of the process; scoring only ever
// reads it.
const TRAVEL_COSTS: [[i64; 9]; 9] = [
    [0, 12, 8, 10, 14, 16, 11, 18, 25],
    [12, 0, 9, 15, 20, 24, 7, 26, 30],
    [8, 9, 0, 6, 12, 15, 10, 19, 27],
    [10, 15, 6, 0, 9, 12, 14, 15, 24],
    [14, 20, 12, 9, 0, 8, 18, 12, 16],
    [16, 24, 15, 12, 8, 0, 21, 6, 14],
    [11, 7, 10, 14, 18, 21, 0, 24, 31],
    [18, 26, 19, 15, 12, 6, 24, 0, 13],
    [25, 30, 27, 24, 16, 14, 31, 13, 0],
];

/// Travel cost between two waypoints. Total over the closed [`Waypoint`]
/// enum; invalid ordinals cannot reach this point because the decoder has
/// already validated them.
pub fn travel_cost(from: Waypoint, to: Waypoint) -> i64 {
    TRAVEL_COSTS[from.ordinal()][to.ordinal()]
}
