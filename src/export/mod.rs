//! Serialization of record lists for download.

mod csv;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use crate::record::Record;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}

/// Format records for the named mode (`json` or `csv`).
pub fn format_records<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    mode: &str,
) -> Result<String, ExportError> {
    let format = mode.parse()?;
    export(records, format)
}

/// JSON keeps every field, pretty-printed with two-space indentation. CSV is
/// a projection onto scalar fields only: arrays and nested objects are dropped.
pub fn export<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    format: ExportFormat,
) -> Result<String, ExportError> {
    let values = records
        .into_iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    debug!(records = values.len(), %format, "exporting");
    export_values(&values, format)
}

/// Same as [`export`] over arbitrary JSON objects, which may not share a
/// schema.
pub fn export_values(values: &[Value], format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(values)?),
        ExportFormat::Csv => Ok(csv::to_csv(values)),
    }
}
