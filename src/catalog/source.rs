//! Where catalog payloads come from.
//!
//! A `DataSource` hands back the raw JSON text for one entity kind. The index
//! fetches all five kinds in parallel, so implementations must be `Sync`.

use crate::catalog::identity::EntityKind;
use anyhow::{Context, Result, anyhow};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub trait DataSource: Sync {
    /// Human-readable origin used in log lines and error messages.
    fn describe(&self) -> String;

    /// Return the raw JSON payload for `kind`.
    fn fetch(&self, kind: EntityKind) -> Result<String>;
}

#[derive(Clone, Debug)]
/// Reads `<root>/<kind>.json` for each collection.
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, kind: EntityKind) -> PathBuf {
        self.root.join(kind.file_name())
    }
}

impl DataSource for DirectorySource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn fetch(&self, kind: EntityKind) -> Result<String> {
        let path = self.path_for(kind);
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
    }
}

#[derive(Clone, Debug, Default)]
/// Serves payloads registered up front; kinds never registered fail to fetch.
pub struct MemorySource {
    payloads: BTreeMap<EntityKind, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the payload served for `kind`.
    pub fn with(mut self, kind: EntityKind, payload: impl Into<String>) -> Self {
        self.payloads.insert(kind, payload.into());
        self
    }

    /// A source where every kind is an empty JSON array.
    pub fn empty_catalog() -> Self {
        EntityKind::ALL
            .into_iter()
            .fold(Self::new(), |source, kind| source.with(kind, "[]"))
    }
}

impl DataSource for MemorySource {
    fn describe(&self) -> String {
        "in-memory catalog".to_string()
    }

    fn fetch(&self, kind: EntityKind) -> Result<String> {
        self.payloads
            .get(&kind)
            .cloned()
            .ok_or_else(|| anyhow!("no payload registered for {}", kind.plural()))
    }
}
