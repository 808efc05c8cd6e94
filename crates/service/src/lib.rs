#![forbid(unsafe_code)]

mod dto;
mod error;
mod ops;
pub mod textgen;

pub use dto::*;
pub use error::ServiceError;
pub use ops::suggestions::MIN_SEED_DESIGNS;

use mc_storage::SqliteStore;
use textgen::TextGenerator;

/// Boundary layer over the catalog store. Constructed per process (or per
/// test) with an injected text-generation collaborator; holds the only
/// mutation paths into the catalog.
pub struct CatalogService {
    store: SqliteStore,
    generator: Box<dyn TextGenerator>,
}

impl CatalogService {
    pub fn new(store: SqliteStore, generator: Box<dyn TextGenerator>) -> Self {
        Self { store, generator }
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }
}
