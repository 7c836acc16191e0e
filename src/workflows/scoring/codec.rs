//! Decoders for the compact session log the play device produces.
//!
//! Top level: fields joined by `|`, at least seven of them. Field 1 is the
//! comma-joined route, field 2 the `;`-joined delivery segments, field 3 the
//! bonus target. Fields 0, 4, 5 and 6 (header tag, device id, timestamp,
//! checksum) must be present but are not interpreted by this revision.
//!
//! A delivery segment joins its fields with `,`: origin ordinal, reserved,
//! satisfaction flag, reserved, fare value. Segments with fewer than five
//! fields decode to an all-default delivery without error; only the run-level
//! field count is enforced strictly.

use super::domain::{Delivery, RunRecord, Waypoint};

const RUN_DELIMITER: char = '|';
const SEGMENT_DELIMITER: char = ';';
const DELIVERY_DELIMITER: char = ',';
const ROUTE_DELIMITER: char = ',';
const RUN_FIELD_MIN: usize = 7;
const DELIVERY_FIELD_MIN: usize = 5;

/// Error raised when a raw log violates the grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("run log has {found} top-level fields, expected at least 7")]
    TruncatedLog { found: usize },
    #[error("'{0}' is not a valid waypoint ordinal")]
    InvalidWaypoint(String),
}

/// Decode a full session log into a [`RunRecord`]. Strict: a short log or an
/// invalid waypoint anywhere fails the whole decode with no partial result.
pub fn decode_run(raw: &str) -> Result<RunRecord, FormatError> {
    let fields: Vec<&str> = raw.split(RUN_DELIMITER).collect();
    if fields.len() < RUN_FIELD_MIN {
        return Err(FormatError::TruncatedLog {
            found: fields.len(),
        });
    }

    let route = decode_route(fields[1])?;
    let deliveries = fields[2]
        .split(SEGMENT_DELIMITER)
        .filter(|segment| !segment.is_empty())
        .map(decode_delivery)
        .collect::<Result<Vec<_>, _>>()?;
    let bonus_target = fields[3].parse().unwrap_or(0);

    Ok(RunRecord {
        route,
        deliveries,
        bonus_target,
    })
}

/// Decode one delivery segment. Lenient: fewer than five fields yields the
/// all-default delivery rather than an error.
pub fn decode_delivery(segment: &str) -> Result<Delivery, FormatError> {
    let fields: Vec<&str> = segment.split(DELIVERY_DELIMITER).collect();
    if fields.len() < DELIVERY_FIELD_MIN {
        return Ok(Delivery {
            origin: Waypoint::Depot,
            satisfied: false,
            value: 0,
        });
    }

    let origin = decode_waypoint(fields[0])?;
    let satisfied = fields[2].eq_ignore_ascii_case("true");
    let value = fields[4].parse().unwrap_or(0);

    Ok(Delivery {
        origin,
        satisfied,
        value,
    })
}

// An empty route field is a zero-stop route; that differs from the field
// being absent, which the minimum-field check already rejected.
fn decode_route(field: &str) -> Result<Vec<Waypoint>, FormatError> {
    if field.is_empty() {
        return Ok(Vec::new());
    }

    field.split(ROUTE_DELIMITER).map(decode_waypoint).collect()
}

fn decode_waypoint(text: &str) -> Result<Waypoint, FormatError> {
    text.parse::<u8>()
        .ok()
        .and_then(Waypoint::from_ordinal)
        .ok_or_else(|| FormatError::InvalidWaypoint(text.to_string()))
}
