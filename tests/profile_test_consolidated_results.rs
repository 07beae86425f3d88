use cactus_profiles::profile::{CeilingPolicy, ProfileBuilder, ProfilePoint};
mod common;
use common::*;

#[test]
fn test_consolidated_results() {
    let rows = load_rows("data/test/results.csv");
    let profiles = ProfileBuilder::new(&rows).build().unwrap();
    assert_eq!(profiles.algorithms().collect::<Vec<_>>(), vec!["acs", "ddo"]);
    assert_eq!(profiles.denominator, 4);
    // max time 60 has ticks in steps of 10
    assert_close(profiles.time_ceiling, 70.0);
    // max gap 3.2 has ticks in steps of 0.5
    assert_close(profiles.gap_ceiling, 4.0);

    let acs = profiles.time_profile("acs").unwrap();
    assert_eq!(
        acs.points,
        vec![
            ProfilePoint::new(0.0, 0.0),
            ProfilePoint::new(1.5, 25.0),
            ProfilePoint::new(7.0, 50.0),
            ProfilePoint::new(profiles.time_ceiling, 50.0),
        ]
    );
    let ddo = profiles.time_profile("ddo").unwrap();
    assert_eq!(ddo.value_at(0.4), 25.0);
    assert_eq!(ddo.value_at(12.0), 50.0);

    let acs_gap = profiles.gap_profile("acs").unwrap();
    assert_eq!(acs_gap.value_at(0.0), 50.0);
    assert_eq!(acs_gap.value_at(0.5), 75.0);
    assert_eq!(acs_gap.value_at(3.2), 100.0);
    // ddo ran on 3 of 4 instances and plateaus below 100%
    let ddo_gap = profiles.gap_profile("ddo").unwrap();
    assert_eq!(ddo_gap.final_percentage(), 75.0);
}

#[test]
fn test_all_optimal() {
    let rows = load_rows("data/test/all_optimal.csv");
    let profiles = ProfileBuilder::new(&rows)
        .ceiling_policy(CeilingPolicy::RawMax)
        .build()
        .unwrap();
    assert_eq!(profiles.gap_ceiling, 1.0);
    assert_eq!(profiles.time_ceiling, 3.0);
    let astar = profiles.gap_profile("astar").unwrap();
    assert_eq!(
        astar.points,
        vec![ProfilePoint::new(0.0, 100.0), ProfilePoint::new(1.0, 100.0)]
    );
    let ddo = profiles.gap_profile("ddo").unwrap();
    assert_eq!(
        ddo.points,
        vec![ProfilePoint::new(0.0, 50.0), ProfilePoint::new(1.0, 50.0)]
    );
}

#[test]
fn test_profiles_to_json() {
    let rows = load_rows("data/test/results.csv");
    let profiles = ProfileBuilder::new(&rows).build().unwrap();
    let json = serde_json::to_value(&profiles).unwrap();
    assert_eq!(json["denominator"], 4);
    assert_eq!(json["time"][0]["algorithm"], "acs");
    assert_eq!(json["time"][0]["points"][1]["threshold"], 1.5);
}
