use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::related::DEFAULT_LIMIT;

const DEFAULT_DATA_DIR: &str = ".citysoul";

/// Runtime settings.
///
/// Environment variables:
/// - `CITYSOUL_DATA_DIR`: directory for saved items and user memories (default `.citysoul`)
/// - `CITYSOUL_CATALOG`: seed catalog JSON file (default: bundled data)
/// - `CITYSOUL_RELATED_LIMIT`: number of related records to show (default 3)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub catalog: Option<PathBuf>,
    pub related_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog: None,
            related_limit: DEFAULT_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();
        let related_limit = match var("CITYSOUL_RELATED_LIMIT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "invalid CITYSOUL_RELATED_LIMIT, using default");
                defaults.related_limit
            }),
            None => defaults.related_limit,
        };

        Self {
            data_dir: var("CITYSOUL_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            catalog: var("CITYSOUL_CATALOG").map(PathBuf::from),
            related_limit,
        }
    }
}
