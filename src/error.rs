use thiserror::Error;

/// Failures of profile construction that are the input's fault.
///
/// Both are terminal: the computation is a single deterministic pass, so there is nothing to
/// retry and no partial result is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    /// Required fields are absent from the input table.
    #[error("input is missing required field(s): {}", .missing.join(", "))]
    Schema {
        /// Canonical names of every missing field.
        missing: Vec<String>,
    },
    /// No usable rows, or zero total attempts.
    #[error("empty input: {0}")]
    EmptyInput(String),
}
