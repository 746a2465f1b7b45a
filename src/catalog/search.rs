//! Case-insensitive substring search across the five collections.
//!
//! Each kind is matched against its own field set and nothing else. A record
//! matches when any of its fields contains the normalized query; fields are
//! checked in a fixed order and the first hit ends the check. Results keep
//! collection order; there is no ranking.

use crate::catalog::identity::EntityKind;
use crate::catalog::index::CatalogIndex;
use crate::catalog::model::{Album, Artist, Genre, Paper, Playlist};
use serde::Serialize;

#[derive(Debug, Default, Serialize)]
/// Matches per kind, each in collection order.
pub struct SearchResults<'a> {
    pub papers: Vec<&'a Paper>,
    pub albums: Vec<&'a Album>,
    pub playlists: Vec<&'a Playlist>,
    pub artists: Vec<&'a Artist>,
    pub genres: Vec<&'a Genre>,
}

impl SearchResults<'_> {
    pub fn total(&self) -> usize {
        EntityKind::ALL.into_iter().map(|kind| self.count(kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Paper => self.papers.len(),
            EntityKind::Album => self.albums.len(),
            EntityKind::Playlist => self.playlists.len(),
            EntityKind::Artist => self.artists.len(),
            EntityKind::Genre => self.genres.len(),
        }
    }
}

/// Trim and lowercase a raw query.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Field matching for one record kind. `needle` is already normalized.
pub trait Searchable {
    fn matches(&self, needle: &str) -> bool;
}

impl Searchable for Paper {
    // title, authors, abstract, takeaways, venue
    fn matches(&self, needle: &str) -> bool {
        field_contains(self.title.as_deref(), needle)
            || any_contains(&self.authors, needle)
            || field_contains(self.abstract_text.as_deref(), needle)
            || any_contains(&self.takeaways, needle)
            || field_contains(self.venue.as_deref(), needle)
    }
}

impl Searchable for Album {
    fn matches(&self, needle: &str) -> bool {
        field_contains(self.title.as_deref(), needle)
            || field_contains(self.description.as_deref(), needle)
    }
}

impl Searchable for Playlist {
    // The summary is HTML; markup is searched as-is.
    fn matches(&self, needle: &str) -> bool {
        field_contains(self.title.as_deref(), needle)
            || field_contains(self.summary_article.as_deref(), needle)
    }
}

impl Searchable for Artist {
    fn matches(&self, needle: &str) -> bool {
        field_contains(self.name.as_deref(), needle)
    }
}

impl Searchable for Genre {
    fn matches(&self, needle: &str) -> bool {
        field_contains(self.name.as_deref(), needle)
    }
}

impl CatalogIndex {
    /// Search every collection for `query`.
    ///
    /// A blank query (empty or whitespace) is not an error: it yields five
    /// empty result sets regardless of what is loaded.
    pub fn search(&self, query: &str) -> SearchResults<'_> {
        let needle = normalize_query(query);
        if needle.is_empty() {
            return SearchResults::default();
        }

        SearchResults {
            papers: matching(self.papers(), &needle),
            albums: matching(self.albums(), &needle),
            playlists: matching(self.playlists(), &needle),
            artists: matching(self.artists(), &needle),
            genres: matching(self.genres(), &needle),
        }
    }
}

fn matching<'a, T: Searchable>(records: &'a [T], needle: &str) -> Vec<&'a T> {
    records
        .iter()
        .filter(|record| record.matches(needle))
        .collect()
}

fn field_contains(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|value| value.to_lowercase().contains(needle))
}

fn any_contains(values: &[String], needle: &str) -> bool {
    values
        .iter()
        .any(|value| value.to_lowercase().contains(needle))
}
