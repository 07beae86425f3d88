use std::{fs, path::Path};

use anyhow::{Context, Result};
use itertools::{izip, Itertools};
use log::{debug, warn};
use polars::prelude::*;

use crate::{datastructures::ResultRow, error::ProfileError};

mod utils;
pub use utils::*;

/// Fields every results table must have.
pub const REQUIRED_FIELDS: [&str; 3] = ["algorithm", "gap", "time"];

/// Fields that are read when present.
pub const OPTIONAL_FIELDS: [&str; 2] = ["instance", "status"];

/// Reads a consolidated results CSV.
///
/// Header names are matched case-insensitively and renamed to their canonical lowercase form;
/// unknown columns are dropped. Lines starting with `#` are ignored.
pub fn read_results_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReader::from_path(path)
        .with_context(|| format!("failed to open {path:?}"))?
        .with_comment_char(Some(b'#'))
        .has_header(true)
        .finish()
        .with_context(|| format!("failed to parse {path:?}"))?;
    debug!("Read {} rows from {:?}", df.height(), path);
    normalize_columns(df)
}

/// Renames the known columns of `df` to their canonical names and drops all others.
pub fn normalize_columns(mut df: DataFrame) -> Result<DataFrame> {
    let headers = df
        .get_column_names()
        .into_iter()
        .map(str::to_string)
        .collect_vec();
    let resolved = resolve_columns(&headers)?;
    for (header, field) in &resolved {
        if header.as_str() != *field {
            df.rename(header, field)?;
        }
    }
    let fields = resolved.iter().map(|(_, field)| *field).collect_vec();
    Ok(df.select(fields)?)
}

/// Extracts the usable rows of a normalized results table.
///
/// Rows with a missing algorithm, or a missing, negative or non-numeric gap or time are dropped.
/// Missing instance names default to the 1-based row number.
pub fn extract_rows(df: &DataFrame) -> Result<Vec<ResultRow>> {
    let algorithms = df.column("algorithm")?.cast(&DataType::Utf8)?;
    let gaps = df.column("gap")?.cast(&DataType::Float64)?;
    let times = df.column("time")?.cast(&DataType::Float64)?;
    let instances = optional_utf8_column(df, "instance")?;
    let statuses = optional_utf8_column(df, "status")?;

    let mut invalid = 0;
    let mut rows = Vec::with_capacity(df.height());
    for (idx, (algorithm, gap, time, instance, status)) in izip!(
        algorithms.utf8()?.into_iter(),
        gaps.f64()?.into_iter(),
        times.f64()?.into_iter(),
        instances,
        statuses
    )
    .enumerate()
    {
        match (algorithm, gap, time) {
            (Some(algorithm), Some(gap), Some(time))
                if !algorithm.is_empty()
                    && is_valid_measure(gap)
                    && is_valid_measure(time) =>
            {
                rows.push(ResultRow {
                    instance: instance
                        .unwrap_or_else(|| (idx + 1).to_string()),
                    algorithm: algorithm.to_string(),
                    status,
                    gap,
                    time,
                })
            }
            _ => invalid += 1,
        }
    }
    if invalid > 0 {
        warn!("Dropped {invalid} rows with a missing algorithm or an invalid gap or time");
    }
    if rows.is_empty() {
        return Err(ProfileError::EmptyInput(
            "no usable result rows".to_string(),
        )
        .into());
    }
    Ok(rows)
}

/// Runs per algorithm in order of first appearance, counted before invalid rows are dropped.
///
/// A run without a usable gap or time (no solution found, timeout) still counts as attempted.
/// Rows without an algorithm name are not attributed to anyone and are skipped.
pub fn attempted_runs(df: &DataFrame) -> Result<Vec<(String, usize)>> {
    let algorithms = df.column("algorithm")?.cast(&DataType::Utf8)?;
    let names = algorithms
        .utf8()?
        .into_iter()
        .flatten()
        .filter(|algorithm| !algorithm.is_empty())
        .collect_vec();
    let counts = names.iter().counts();
    Ok(names
        .iter()
        .unique()
        .map(|algorithm| (algorithm.to_string(), counts[algorithm]))
        .collect())
}

/// Reads and extracts the rows of a consolidated results CSV.
pub fn parse_results_csv(path: &Path) -> Result<Vec<ResultRow>> {
    extract_rows(&read_results_csv(path)?)
}

/// Number of rows per algorithm in order of first appearance.
pub fn algorithm_summary(df: &DataFrame) -> Result<DataFrame> {
    Ok(df
        .clone()
        .lazy()
        .groupby_stable([col("algorithm")])
        .agg([count().alias("attempts")])
        .collect()?)
}

/// Consolidated table with the columns `Instance,Algorithm,Status,Gap,Time`, sorted by instance
/// and algorithm.
pub fn rows_to_dataframe(rows: &[ResultRow]) -> Result<DataFrame> {
    let rows = rows
        .iter()
        .sorted_by(|a, b| {
            (&a.instance, &a.algorithm).cmp(&(&b.instance, &b.algorithm))
        })
        .collect_vec();
    Ok(df! {
        "Instance" => rows.iter().map(|r| r.instance.as_str()).collect_vec(),
        "Algorithm" => rows.iter().map(|r| r.algorithm.as_str()).collect_vec(),
        "Status" => rows.iter().map(|r| r.status.as_deref()).collect_vec(),
        "Gap" => rows.iter().map(|r| r.gap).collect_vec(),
        "Time" => rows.iter().map(|r| r.time).collect_vec(),
    }?)
}

/// Writes [`rows_to_dataframe`] to `path`.
pub fn write_results_csv(rows: &[ResultRow], path: &Path) -> Result<()> {
    let mut df = rows_to_dataframe(rows)?;
    let mut file = fs::File::create(path)
        .with_context(|| format!("failed to create {path:?}"))?;
    CsvWriter::new(&mut file).has_header(true).finish(&mut df)?;
    Ok(())
}

#[cfg(test)]
mod tests;
