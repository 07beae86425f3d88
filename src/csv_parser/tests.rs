use std::path::Path;

use polars::prelude::*;

use crate::{
    csv_parser::{
        algorithm_summary, attempted_runs, extract_rows, normalize_columns, parse_results_csv,
        read_results_csv, resolve_columns, rows_to_dataframe,
    },
    datastructures::ResultRow,
    error::ProfileError,
};

#[test]
fn test_read_results_csv() {
    let df = read_results_csv(Path::new("data/test/results.csv")).unwrap();
    assert_eq!(df.height(), 7);
    assert_eq!(
        df.get_column_names(),
        &["algorithm", "gap", "time", "instance", "status"]
    );
    let rows = extract_rows(&df).unwrap();
    assert_eq!(
        rows[1],
        ResultRow {
            instance: "knap_1".to_string(),
            algorithm: "ddo".to_string(),
            status: Some("OPTIMAL".to_string()),
            gap: 0.0,
            time: 0.4,
        }
    );
}

#[test]
fn test_resolve_columns_ignores_case() {
    let headers = ["TIME", " Algorithm", "gap", "Extra"]
        .map(String::from)
        .to_vec();
    assert_eq!(
        resolve_columns(&headers).unwrap(),
        vec![
            (" Algorithm".to_string(), "algorithm"),
            ("gap".to_string(), "gap"),
            ("TIME".to_string(), "time"),
        ]
    );
}

#[test]
fn test_missing_fields_are_named() {
    let headers = ["Instance", "Solver"].map(String::from).to_vec();
    assert_eq!(
        resolve_columns(&headers),
        Err(ProfileError::Schema {
            missing: vec![
                "algorithm".to_string(),
                "gap".to_string(),
                "time".to_string()
            ]
        })
    );
}

#[test]
fn test_normalize_columns() {
    let df = df! {
        "Algorithm" => ["acs", "ddo"],
        "Gap" => [0.0, 1.0],
        "Time" => [1, 2],
        "Comment" => ["a", "b"],
    }
    .unwrap();
    let df = normalize_columns(df).unwrap();
    assert_eq!(df.get_column_names(), &["algorithm", "gap", "time"]);
    let rows = extract_rows(&df).unwrap();
    assert_eq!(rows[0].instance, "1");
    assert_eq!(rows[1].time, 2.0);
    assert_eq!(rows[1].status, None);
}

#[test]
fn test_extract_rows_drops_invalid_rows() {
    let df = df! {
        "algorithm" => [Some("acs"), Some("acs"), None, Some("acs")],
        "gap" => [0.0, -1.0, 0.0, f64::NAN],
        "time" => [1.0, 1.0, 1.0, 1.0],
    }
    .unwrap();
    let rows = extract_rows(&df).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].instance, "1");
}

#[test]
fn test_attempted_runs_include_invalid_rows() {
    let df = df! {
        "algorithm" => [Some("ddo"), Some("acs"), None, Some("ddo"), Some("")],
        "gap" => [Some(0.0), None, Some(0.0), Some(f64::NAN), Some(0.0)],
        "time" => [1.0, 600.0, 1.0, 600.0, 1.0],
    }
    .unwrap();
    assert_eq!(
        attempted_runs(&df).unwrap(),
        vec![("ddo".to_string(), 2), ("acs".to_string(), 1)]
    );
    assert_eq!(extract_rows(&df).unwrap().len(), 1);
}

#[test]
fn test_only_invalid_rows_is_empty_input() {
    let err =
        parse_results_csv(Path::new("data/test/only_invalid.csv")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProfileError>(),
        Some(ProfileError::EmptyInput(_))
    ));
}

#[test]
fn test_algorithm_summary() {
    let df = read_results_csv(Path::new("data/test/results.csv")).unwrap();
    let summary = algorithm_summary(&df).unwrap();
    assert_eq!(summary.height(), 2);
    let attempts = summary
        .column("attempts")
        .unwrap()
        .cast(&DataType::UInt64)
        .unwrap()
        .u64()
        .unwrap()
        .into_no_null_iter()
        .collect::<Vec<_>>();
    assert_eq!(attempts, vec![4, 3]);
}

#[test]
fn test_rows_to_dataframe_sorts_by_instance() {
    let rows = vec![
        ResultRow::new("b", "ddo", 0.0, 1.0),
        ResultRow::new("a", "ddo", 1.0, 2.0),
        ResultRow::new("a", "acs", 0.0, 3.0),
    ];
    let df = rows_to_dataframe(&rows).unwrap();
    assert_eq!(
        df.get_column_names(),
        &["Instance", "Algorithm", "Status", "Gap", "Time"]
    );
    let times = df
        .column("Time")
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect::<Vec<_>>();
    assert_eq!(times, vec![3.0, 2.0, 1.0]);
}
