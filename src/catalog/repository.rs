//! Owns the catalog for a session and applies the all-or-nothing load rule.
//!
//! Consumers hold a `&CatalogIndex` borrowed from the repository; nothing is
//! global. A failed load never touches the index that was already in place.

use crate::catalog::index::CatalogIndex;
use crate::catalog::source::DataSource;
use anyhow::Result;
use tracing::{error, info};

#[derive(Debug, Default)]
/// Session-wide holder for the current catalog index.
pub struct CatalogRepository {
    index: CatalogIndex,
    loaded: bool,
}

impl CatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every collection from `source` and swap the new index in.
    ///
    /// On failure the previous index (empty before the first success) stays
    /// in place and the aggregate error is returned to the caller.
    pub fn load(&mut self, source: &dyn DataSource) -> Result<()> {
        match CatalogIndex::load(source) {
            Ok(index) => {
                self.index = index;
                self.loaded = true;
                info!(source = %source.describe(), "catalog ready");
                Ok(())
            }
            Err(err) => {
                error!(source = %source.describe(), "catalog load failed; keeping previous state");
                Err(err)
            }
        }
    }

    /// The current index; empty until a load succeeds.
    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// Whether any load has succeeded in this session.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
