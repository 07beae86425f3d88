use std::{fs, path::Path};

use anyhow::{Context, Result};
use itertools::Itertools;
use log::{error, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::datastructures::ResultRow;

/// Summary line a solver prints last, e.g. `%%optimality:SAT gap:41.35 time:4612`.
static RESULT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"%%optimality:(?P<status>\w+)\s+gap:(?P<gap>[\d.]+)\s+time:(?P<time>[\d.]+)",
    )
    .expect("result line pattern is valid")
});

/// Splits `<algorithm>_<instance>.txt` at the first underscore.
pub fn split_file_name(file_name: &str) -> Option<(&str, &str)> {
    let stem = file_name.strip_suffix(".txt")?;
    let (algorithm, instance) = stem.split_once('_')?;
    if algorithm.is_empty() || instance.is_empty() {
        return None;
    }
    Some((algorithm, instance))
}

/// Parses `status`, `gap` and `time` from a result summary line.
pub fn parse_result_line(line: &str) -> Option<(String, f64, f64)> {
    let captures = RESULT_LINE.captures(line)?;
    let gap = captures["gap"].parse().ok()?;
    let time = captures["time"].parse().ok()?;
    Some((captures["status"].to_string(), gap, time))
}

/// Parses one result file, `None` when its last line holds no result.
pub fn parse_result_file(
    path: &Path,
    algorithm: &str,
    instance: &str,
) -> Result<Option<ResultRow>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {path:?}"))?;
    let last_line = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last();
    let Some(last_line) = last_line else {
        warn!("File is empty: {path:?}");
        return Ok(None);
    };
    match parse_result_line(last_line) {
        Some((status, gap, time)) => Ok(Some(ResultRow {
            instance: instance.to_string(),
            algorithm: algorithm.to_string(),
            status: Some(status),
            gap,
            time,
        })),
        None => {
            warn!("Last line format not recognized in {path:?}: {last_line}");
            Ok(None)
        }
    }
}

/// Collects the results of every `<algorithm>_<instance>.txt` file in `folder`.
///
/// Files that cannot be read or parsed are skipped with a log message. Rows are sorted by
/// instance, then algorithm.
pub fn parse_result_files(folder: &Path) -> Result<Vec<ResultRow>> {
    if !folder.is_dir() {
        anyhow::bail!("the folder {folder:?} does not exist");
    }
    let mut rows = vec![];
    for entry in fs::read_dir(folder)
        .with_context(|| format!("failed to list {folder:?}"))?
    {
        let path = entry?.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !file_name.ends_with(".txt") {
            continue;
        }
        let Some((algorithm, instance)) = split_file_name(file_name) else {
            warn!("Skipping file with unexpected name format: {file_name}");
            continue;
        };
        match parse_result_file(&path, algorithm, instance) {
            Ok(Some(row)) => rows.push(row),
            Ok(None) => (),
            Err(err) => error!("Error processing {file_name}: {err:#}"),
        }
    }
    Ok(rows
        .into_iter()
        .sorted_by(|a, b| {
            (&a.instance, &a.algorithm).cmp(&(&b.instance, &b.algorithm))
        })
        .collect())
}
