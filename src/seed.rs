//! Seed records and thematic collections.

use std::path::{Path, PathBuf};

use crate::record::{Record, RecordError, ThematicCollection};

const BUNDLED_RECORDS: &str = include_str!("../data/cultural-data.json");
const BUNDLED_THEMES: &str = include_str!("../data/themes.json");

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid seed data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid seed record: {0}")]
    Invalid(#[from] RecordError),
}

fn parse_records(raw: &str) -> Result<Vec<Record>, SeedError> {
    let records: Vec<Record> = serde_json::from_str(raw)?;
    for record in &records {
        record.validate()?;
    }
    Ok(records)
}

pub fn bundled_records() -> Result<Vec<Record>, SeedError> {
    parse_records(BUNDLED_RECORDS)
}

pub fn bundled_themes() -> Result<Vec<ThematicCollection>, SeedError> {
    Ok(serde_json::from_str(BUNDLED_THEMES)?)
}

/// Load a JSON array of records from disk.
pub fn load_records(path: &Path) -> Result<Vec<Record>, SeedError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&raw)
}
