#![allow(dead_code)]
use cactus_profiles::{csv_parser, datastructures::ResultRow};
use std::path::Path;

pub fn load_rows(path: &str) -> Vec<ResultRow> {
    csv_parser::parse_results_csv(Path::new(path)).unwrap()
}

/// Usable rows and the largest number of runs one algorithm attempted.
pub fn load_table(path: &str) -> (Vec<ResultRow>, usize) {
    let df = csv_parser::read_results_csv(Path::new(path)).unwrap();
    let attempted = csv_parser::attempted_runs(&df).unwrap();
    let rows = csv_parser::extract_rows(&df).unwrap();
    (rows, attempted.iter().map(|(_, runs)| *runs).max().unwrap())
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
