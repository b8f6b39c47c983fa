mod memory;
mod sqlite;

pub use memory::{InMemoryInternshipRepository, InMemoryRuleStore};
pub use sqlite::SqliteStore;

/// Failure to open or prepare the backing database.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to open database at '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to prepare database schema: {0}")]
    Schema(#[source] rusqlite::Error),
}
