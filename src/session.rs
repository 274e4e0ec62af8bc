//! Application layer: one catalog per session plus the user's saved items and
//! self-authored records, persisted through a [`BlobStore`].

use tracing::{info, warn};

use crate::catalog::{Catalog, CatalogError};
use crate::record::{Location, Record, USER_ADDED};
use crate::store::{self, BlobStore, CUSTOM_MEMORIES_KEY, SAVED_ITEMS_KEY, StoreError};

pub const PLACEHOLDER_IMAGE: &str = "images/placeholder.jpg";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("record {0} was not added by the user and cannot be deleted")]
    NotUserAdded(u64),

    #[error("invalid memory: {0}")]
    InvalidMemory(String),
}

/// User input for a new record.
#[derive(Debug, Clone)]
pub struct NewMemory {
    pub title: String,
    pub description: String,
    pub category: String,
    pub period: String,
    pub district: String,
    pub location: Location,
    pub tags: Vec<String>,
}

pub struct Session<S: BlobStore> {
    seed: Vec<Record>,
    custom: Vec<Record>,
    saved: Vec<u64>,
    catalog: Catalog,
    store: S,
}

impl<S: BlobStore> Session<S> {
    /// Build the session catalog from `seed` plus any custom memories found in
    /// `store`. Stored memories whose id already exists in the seed are skipped.
    pub fn open(seed: Vec<Record>, store: S) -> Result<Self, SessionError> {
        let stored: Vec<Record> = store::read_json(&store, CUSTOM_MEMORIES_KEY)?.unwrap_or_default();
        let custom: Vec<Record> = stored
            .into_iter()
            .filter(|m| {
                if let Err(e) = m.validate() {
                    warn!(id = m.id, error = %e, "invalid stored memory, skipped");
                    return false;
                }
                let clash = seed.iter().any(|r| r.id == m.id);
                if clash {
                    warn!(id = m.id, "stored memory shadows a seed record, skipped");
                }
                !clash
            })
            .collect();
        let saved = store::read_json(&store, SAVED_ITEMS_KEY)?.unwrap_or_default();

        let mut session = Self {
            seed,
            custom,
            saved,
            catalog: Catalog::default(),
            store,
        };
        session.refresh();
        info!(
            custom = session.custom.len(),
            saved = session.saved.len(),
            "session opened"
        );
        Ok(session)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn refresh(&mut self) {
        let records: Vec<Record> = self.seed.iter().chain(&self.custom).cloned().collect();
        self.catalog.initialize(&records);
    }

    pub fn add_memory(&mut self, memory: NewMemory) -> Result<Record, SessionError> {
        if memory.title.trim().is_empty() {
            return Err(SessionError::InvalidMemory("title must not be empty".into()));
        }
        if !(-90.0..=90.0).contains(&memory.location.lat)
            || !(-180.0..=180.0).contains(&memory.location.lng)
        {
            return Err(SessionError::InvalidMemory(format!(
                "location out of range: {}, {}",
                memory.location.lat, memory.location.lng
            )));
        }

        let record = Record {
            id: self.catalog.max_id() + 1,
            title: memory.title.trim().to_string(),
            description: memory.description,
            category: memory.category,
            period: memory.period,
            district: memory.district,
            location: memory.location,
            images: vec![PLACEHOLDER_IMAGE.to_string()],
            has_audio: false,
            tags: memory.tags,
            contributor: USER_ADDED.to_string(),
            extra: Default::default(),
        };

        let mut custom = self.custom.clone();
        custom.push(record.clone());
        store::write_json(&mut self.store, CUSTOM_MEMORIES_KEY, &custom)?;
        self.custom = custom;
        self.refresh();
        info!(id = record.id, title = %record.title, "memory added");
        Ok(record)
    }

    /// Remove a user-added record. Seed records cannot be deleted.
    pub fn delete_memory(&mut self, id: u64) -> Result<Record, SessionError> {
        let record = self.catalog.by_id(id)?;
        if !record.is_user_added() {
            return Err(SessionError::NotUserAdded(id));
        }
        let Some(pos) = self.custom.iter().position(|r| r.id == id) else {
            return Err(SessionError::NotUserAdded(id));
        };

        let mut custom = self.custom.clone();
        let removed = custom.remove(pos);
        store::write_json(&mut self.store, CUSTOM_MEMORIES_KEY, &custom)?;
        self.custom = custom;
        self.refresh();

        // A dangling saved id is harmless: saved_items skips unknown ids.
        if self.saved.contains(&id) {
            let saved: Vec<u64> = self.saved.iter().copied().filter(|&s| s != id).collect();
            store::write_json(&mut self.store, SAVED_ITEMS_KEY, &saved)?;
            self.saved = saved;
        }
        info!(id, "memory deleted");
        Ok(removed)
    }

    /// Flip the saved state of a record; returns whether it is now saved.
    pub fn toggle_saved(&mut self, id: u64) -> Result<bool, SessionError> {
        let mut saved = self.saved.clone();
        let now_saved = if saved.contains(&id) {
            saved.retain(|&s| s != id);
            false
        } else {
            self.catalog.by_id(id)?;
            saved.push(id);
            true
        };
        store::write_json(&mut self.store, SAVED_ITEMS_KEY, &saved)?;
        self.saved = saved;
        Ok(now_saved)
    }

    pub fn is_saved(&self, id: u64) -> bool {
        self.saved.contains(&id)
    }

    pub fn saved_ids(&self) -> &[u64] {
        &self.saved
    }

    pub fn saved_items(&self) -> Vec<&Record> {
        self.catalog.items_by_ids(&self.saved)
    }
}
