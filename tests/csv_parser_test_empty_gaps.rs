use cactus_profiles::profile::{CeilingPolicy, ProfileBuilder};
mod common;
use common::*;

#[test]
fn test_runs_without_solution_count_as_attempted() {
    let (rows, attempted) = load_table("data/test/empty_gaps.csv");
    assert_eq!(rows.len(), 3);
    assert_eq!(attempted, 4);
    let profiles = ProfileBuilder::new(&rows)
        .attempted_runs(attempted)
        .ceiling_policy(CeilingPolicy::RawMax)
        .build()
        .unwrap();
    assert_eq!(profiles.denominator, 4);
    assert_close(profiles.time_ceiling, 3.0);
    let acs = profiles.time_profile("acs").unwrap();
    assert_close(acs.final_percentage(), 50.0);
    assert_close(acs.value_at(1.5), 25.0);
    assert_close(profiles.time_profile("ddo").unwrap().final_percentage(), 25.0);
    assert_close(profiles.gap_profile("acs").unwrap().final_percentage(), 50.0);
    assert_close(profiles.gap_profile("ddo").unwrap().final_percentage(), 25.0);
}

#[test]
fn test_smaller_denominator_is_raised_to_attempted_runs() {
    let (rows, attempted) = load_table("data/test/empty_gaps.csv");
    let profiles = ProfileBuilder::new(&rows)
        .attempted_runs(attempted)
        .denominator(2)
        .build()
        .unwrap();
    assert_eq!(profiles.denominator, 4);
    assert_close(profiles.time_profile("acs").unwrap().final_percentage(), 50.0);
}
