use std::collections::HashSet;

use tracing::{info, warn};

use crate::record::{Field, Record, ThematicCollection};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("no record with id {0}")]
    NotFound(u64),
}

/// The authoritative in-memory collection of records for one session.
///
/// Queries never mutate it. The application layer replaces the contents with
/// [`Catalog::initialize`] whenever records are added or removed; no derived
/// state is kept between calls.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Record>,
}

impl Catalog {
    pub fn new(records: &[Record]) -> Self {
        let mut catalog = Self::default();
        catalog.initialize(records);
        catalog
    }

    /// Replace the working collection with a copy of `records`.
    ///
    /// Ids must be unique; a repeated id keeps its first occurrence.
    pub fn initialize(&mut self, records: &[Record]) {
        let mut seen = HashSet::with_capacity(records.len());
        let mut owned = Vec::with_capacity(records.len());
        for record in records {
            if seen.insert(record.id) {
                owned.push(record.clone());
            } else {
                warn!(id = record.id, "duplicate record id ignored");
            }
        }
        info!(records = owned.len(), "catalog initialized");
        self.records = owned;
    }

    pub fn by_id(&self, id: u64) -> Result<&Record, CatalogError> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct values of a categorical field, in order of first appearance.
    pub fn distinct_values(&self, field: Field) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.field(field))
            .filter(|v| seen.insert(*v))
            .collect()
    }

    /// Records whose id is in `ids`, in catalog order. Unknown ids are skipped.
    pub fn items_by_ids(&self, ids: &[u64]) -> Vec<&Record> {
        self.records.iter().filter(|r| ids.contains(&r.id)).collect()
    }

    pub fn theme_items(&self, theme: &ThematicCollection) -> Vec<&Record> {
        self.items_by_ids(&theme.items)
    }

    pub(crate) fn max_id(&self) -> u64 {
        self.records.iter().map(|r| r.id).max().unwrap_or(0)
    }
}
