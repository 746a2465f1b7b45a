//! Shared library for the paper explorer.
//!
//! The crate exposes the catalog (typed records, the indexed query surface,
//! search, integrity checks), the hash router, and the view builder used by
//! the binaries. Public functions here form the contract the binaries depend
//! on: data directory discovery, catalog loading, route resolution, and view
//! construction.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod logging;
pub mod route;
pub(crate) mod schema_loader;
pub mod view;

pub use catalog::{
    Album, AlbumId, Artist, ArtistId, CatalogIndex, CatalogRepository, Collection,
    DanglingReference, DataSource, DirectorySource, Entity, EntityKind, Genre, GenreId,
    MemorySource, Paper, PaperId, Playlist, PlaylistId, SearchResults, find_dangling_references,
    normalize_query,
};
pub use route::Route;
pub use schema_loader::schema_text;
pub use view::{View, build_view};

pub const DATA_DIR_ENV: &str = "PAPER_EXPLORER_DATA";
const DATA_DIR_NAME: &str = "data";

/// Returns true when `candidate` holds all five collection files.
pub fn is_data_dir(candidate: &Path) -> bool {
    EntityKind::ALL
        .into_iter()
        .all(|kind| candidate.join(kind.file_name()).is_file())
}

/// Verifies that an explicit hint points at a usable data directory.
///
/// The hint may name the data directory itself or a root containing `data/`.
fn data_dir_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.trim().is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    [hint_path.clone(), hint_path.join(DATA_DIR_NAME)]
        .into_iter()
        .find(|candidate| is_data_dir(candidate))
        .and_then(|candidate| fs::canonicalize(candidate).ok())
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        let candidate = dir.join(DATA_DIR_NAME);
        if is_data_dir(&candidate) {
            return Some(candidate);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the catalog data directory.
///
/// Search order: honor `PAPER_EXPLORER_DATA` if it points at a real data
/// directory, climb up from the current executable looking for `data/`, then
/// use the build-time hint. Binaries treat failure as fatal unless `--data`
/// was given.
pub fn find_data_dir() -> Result<PathBuf> {
    if let Ok(env_dir) = env::var(DATA_DIR_ENV) {
        if let Some(dir) = data_dir_from_hint(&env_dir) {
            return Ok(dir);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(dir) = search_upwards(exe_dir) {
                return Ok(dir);
            }
        }
    }

    if let Some(hint) = option_env!("PAPER_EXPLORER_DATA_HINT") {
        if let Some(dir) = data_dir_from_hint(hint) {
            return Ok(dir);
        }
    }

    bail!(
        "Unable to locate the catalog data directory. Set {DATA_DIR_ENV} or pass --data DIR."
    );
}

/// Pick the data directory from an explicit override or discovery.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => {
            if !dir.is_dir() {
                bail!("data directory {} does not exist", dir.display());
            }
            Ok(dir.to_path_buf())
        }
        None => find_data_dir(),
    }
}

/// Load a repository from a data directory on disk.
pub fn load_repository(data_dir: &Path) -> Result<CatalogRepository> {
    let mut repository = CatalogRepository::new();
    repository.load(&DirectorySource::new(data_dir))?;
    Ok(repository)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_empty_catalog(dir: &Path) {
        for kind in EntityKind::ALL {
            fs::write(dir.join(kind.file_name()), "[]").unwrap();
        }
    }

    #[test]
    fn data_dir_requires_all_five_files() {
        let dir = TempDir::new().unwrap();
        assert!(!is_data_dir(dir.path()));
        write_empty_catalog(dir.path());
        assert!(is_data_dir(dir.path()));
        fs::remove_file(dir.path().join("artists.json")).unwrap();
        assert!(!is_data_dir(dir.path()));
    }

    #[test]
    fn hint_accepts_data_dir_or_its_parent() {
        let root = TempDir::new().unwrap();
        let data = root.path().join("data");
        fs::create_dir(&data).unwrap();
        write_empty_catalog(&data);

        let expected = fs::canonicalize(&data).unwrap();
        assert_eq!(data_dir_from_hint(data.to_str().unwrap()), Some(expected.clone()));
        assert_eq!(
            data_dir_from_hint(root.path().to_str().unwrap()),
            Some(expected)
        );
        assert_eq!(data_dir_from_hint("   "), None);
    }

    #[test]
    fn search_upwards_finds_data_in_ancestor() {
        let root = TempDir::new().unwrap();
        let data = root.path().join("data");
        let nested = root.path().join("target").join("debug");
        fs::create_dir_all(&data).unwrap();
        fs::create_dir_all(&nested).unwrap();
        write_empty_catalog(&data);

        assert_eq!(
            search_upwards(&nested),
            Some(fs::canonicalize(&data).unwrap())
        );
    }

    #[test]
    fn build_hint_points_at_shipped_catalog() {
        let hint = option_env!("PAPER_EXPLORER_DATA_HINT").expect("build script records a hint");
        let expected = fs::canonicalize(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"))
            .unwrap();
        assert_eq!(data_dir_from_hint(hint), Some(expected));
    }

    #[test]
    fn explicit_data_dir_must_exist() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("nope");
        assert!(resolve_data_dir(Some(&missing)).is_err());
        assert_eq!(
            resolve_data_dir(Some(root.path())).unwrap(),
            root.path().to_path_buf()
        );
    }

    #[test]
    fn shipped_data_loads_cleanly() {
        let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(DATA_DIR_NAME);
        let repository = load_repository(&data).expect("shipped catalog loads");
        assert!(repository.is_loaded());
        assert!(find_dangling_references(repository.index()).is_empty());
    }
}
