use anyhow::Result;
use polars::prelude::*;

use super::{OPTIONAL_FIELDS, REQUIRED_FIELDS};
use crate::error::ProfileError;

/// Maps each known field to the first header matching it case-insensitively.
///
/// Returns `(header, canonical field)` pairs, or a schema error naming every missing required
/// field.
pub fn resolve_columns(
    headers: &[String],
) -> Result<Vec<(String, &'static str)>, ProfileError> {
    let find = |field: &str| {
        headers
            .iter()
            .find(|header| header.trim().eq_ignore_ascii_case(field))
            .cloned()
    };
    let missing = REQUIRED_FIELDS
        .iter()
        .filter(|field| find(field).is_none())
        .map(|field| field.to_string())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(ProfileError::Schema { missing });
    }
    Ok(REQUIRED_FIELDS
        .iter()
        .chain(OPTIONAL_FIELDS.iter())
        .filter_map(|&field| find(field).map(|header| (header, field)))
        .collect())
}

/// Gaps and times are finite and non-negative.
pub fn is_valid_measure(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Values of an optional column as strings, all `None` when the column is absent.
pub fn optional_utf8_column(
    df: &DataFrame,
    name: &str,
) -> Result<Vec<Option<String>>> {
    match df.column(name) {
        Ok(series) => Ok(series
            .cast(&DataType::Utf8)?
            .utf8()?
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect()),
        Err(_) => Ok(vec![None; df.height()]),
    }
}
