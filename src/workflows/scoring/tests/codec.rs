use super::common::run_log;
use crate::workflows::scoring::codec::{decode_delivery, decode_run, FormatError};
use crate::workflows::scoring::domain::{Delivery, Waypoint};

#[test]
fn decodes_route_deliveries_and_bonus_target() {
    let raw = run_log("1,2,5", "1,pkg,true,std,500;2,pkg,false,std,300", "2");
    let record = decode_run(&raw).expect("log decodes");

    assert_eq!(
        record.route,
        vec![Waypoint::Harborside, Waypoint::MarketSquare, Waypoint::Uptown]
    );
    assert_eq!(record.deliveries.len(), 2);
    assert_eq!(
        record.deliveries[0],
        Delivery {
            origin: Waypoint::Harborside,
            satisfied: true,
            value: 500,
        }
    );
    assert_eq!(record.bonus_target, 2);
}

#[test]
fn short_run_log_is_rejected_with_no_partial_result() {
    let error = decode_run("v1|1,2|").expect_err("three fields rejected");
    assert_eq!(error, FormatError::TruncatedLog { found: 3 });
}

#[test]
fn empty_route_and_delivery_fields_decode_to_empty_lists() {
    let record = decode_run(&run_log("", "", "4")).expect("empty lists are valid");
    assert!(record.route.is_empty());
    assert!(record.deliveries.is_empty());
    assert_eq!(record.bonus_target, 4);
}

#[test]
fn invalid_route_ordinal_fails_the_whole_decode() {
    let error = decode_run(&run_log("1,9", "", "0")).expect_err("ordinal 9 out of range");
    assert_eq!(error, FormatError::InvalidWaypoint("9".to_string()));

    let error = decode_run(&run_log("one", "", "0")).expect_err("non-numeric ordinal");
    assert_eq!(error, FormatError::InvalidWaypoint("one".to_string()));
}

#[test]
fn invalid_delivery_origin_fails_the_whole_decode() {
    let raw = run_log("1", "12,pkg,true,std,500", "1");
    let error = decode_run(&raw).expect_err("origin 12 out of range");
    assert_eq!(error, FormatError::InvalidWaypoint("12".to_string()));
}

#[test]
fn short_delivery_segment_defaults_without_error() {
    let delivery = decode_delivery("3,pkg").expect("lenient decode");
    assert_eq!(
        delivery,
        Delivery {
            origin: Waypoint::Depot,
            satisfied: false,
            value: 0,
        }
    );
}

#[test]
fn satisfied_flag_matches_true_case_insensitively() {
    let satisfied = decode_delivery("4,pkg,TRUE,std,120").expect("decodes");
    assert!(satisfied.satisfied);

    let unsatisfied = decode_delivery("4,pkg,yes,std,120").expect("decodes");
    assert!(!unsatisfied.satisfied);
}

#[test]
fn unparseable_value_and_bonus_target_default_to_zero() {
    let delivery = decode_delivery("4,pkg,true,std,lots").expect("decodes");
    assert_eq!(delivery.value, 0);

    let record = decode_run(&run_log("1", "", "soon")).expect("decodes");
    assert_eq!(record.bonus_target, 0);
}

#[test]
fn reserved_fields_are_accepted_but_ignored() {
    let with_reserved = "v9|1|1,anything,true,whatever,250|1|dev-??|not-a-time|junk|extra";
    let record = decode_run(with_reserved).expect("reserved fields never interpreted");
    assert_eq!(record.deliveries[0].value, 250);
    assert_eq!(record.bonus_target, 1);
}
