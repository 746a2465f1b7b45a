//! Paper catalog wiring.
//!
//! This module wraps the five JSON collections (`papers`, `albums`,
//! `playlists`, `artists`, `genres`) so callers can load a validated snapshot
//! and query it. Types here mirror the data files; callers use `CatalogIndex`
//! for lookups, traversals, and search, and `CatalogRepository` to own the
//! index for a session.

pub mod identity;
pub mod index;
pub mod integrity;
pub mod model;
pub mod repository;
pub mod search;
pub mod source;

pub use identity::{AlbumId, ArtistId, EntityKind, GenreId, PaperId, PlaylistId};
pub use index::{CatalogIndex, Collection};
pub use integrity::{DanglingReference, find_dangling_references};
pub use model::{Album, Artist, Entity, Genre, Paper, Playlist};
pub use repository::CatalogRepository;
pub use search::{SearchResults, Searchable, normalize_query};
pub use source::{DataSource, DirectorySource, MemorySource};
