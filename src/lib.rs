//! Query, recommendation and export engine for a cultural-heritage map catalog.

pub mod catalog;
pub mod config;
pub mod export;
pub mod filter;
pub mod markdown;
pub mod record;
pub mod related;
pub mod search;
pub mod seed;
pub mod session;
pub mod store;

pub use catalog::{Catalog, CatalogError};
pub use export::{ExportError, ExportFormat, export, format_records};
pub use filter::{FilterCriteria, filter};
pub use record::{Field, Location, Record, RecordError, ThematicCollection, USER_ADDED};
pub use related::{KeepOrder, RandomShuffle, Shuffle, related_items};
pub use search::search;
pub use session::{NewMemory, Session, SessionError};
