use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::distance::travel_cost;
use super::domain::{Delivery, RunRecord, Waypoint};

/// The three derived metrics for one run. Profit may be negative; the bonus
/// never is; satisfaction stays within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub profit: i64,
    pub satisfaction_percent: i64,
    pub bonus: i64,
}

/// Score a decoded run. Pure: the same record always produces the same
/// breakdown.
pub fn score_run(record: &RunRecord) -> ScoreBreakdown {
    let revenue: i64 = record.deliveries.iter().map(|delivery| delivery.value).sum();

    ScoreBreakdown {
        profit: revenue - route_cost(&record.route),
        satisfaction_percent: satisfaction_percent(&record.deliveries),
        bonus: bonus(record),
    }
}

// Every leg is priced from the depot, not from the previous stop. Historical
// scores in the store were computed this way; correcting it needs a product
// decision and a migration of the persisted rows.
fn route_cost(route: &[Waypoint]) -> i64 {
    route
        .iter()
        .map(|stop| travel_cost(Waypoint::Depot, *stop))
        .sum()
}

fn satisfaction_percent(deliveries: &[Delivery]) -> i64 {
    if deliveries.is_empty() {
        return 0;
    }

    let satisfied = deliveries
        .iter()
        .filter(|delivery| delivery.satisfied)
        .count();

    // Ceiling, not rounding: 1 of 3 satisfied reports 34.
    ((100 * satisfied + deliveries.len() - 1) / deliveries.len()) as i64
}

fn bonus(record: &RunRecord) -> i64 {
    if record.deliveries.is_empty() || record.bonus_target == 0 {
        return 0;
    }

    Waypoint::ZONES
        .iter()
        .map(|zone| {
            let satisfied = record
                .deliveries
                .iter()
                .filter(|delivery| delivery.satisfied && delivery.origin == *zone)
                .count() as i64;

            match satisfied.cmp(&record.bonus_target) {
                Ordering::Greater => satisfied - record.bonus_target,
                Ordering::Equal => 1,
                Ordering::Less => 0,
            }
        })
        .sum()
}
