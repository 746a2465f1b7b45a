//! Dangling-reference report for a loaded catalog.
//!
//! The index resolves relationships leniently and drops ids that point
//! nowhere. This module surfaces those ids so data maintainers can fix them;
//! it never changes what the index returns.

use crate::catalog::identity::EntityKind;
use crate::catalog::index::CatalogIndex;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// One relationship field entry whose target does not exist.
pub struct DanglingReference {
    pub owner_kind: EntityKind,
    pub owner_id: String,
    pub field: &'static str,
    pub target_kind: EntityKind,
    pub target_id: String,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} field {} references unknown {} '{}'",
            self.owner_kind, self.owner_id, self.field, self.target_kind, self.target_id
        )
    }
}

/// Walk every relationship field and list references with no target.
///
/// Entries are grouped by owning kind (papers, albums, playlists) and keep
/// collection and list order within each group.
pub fn find_dangling_references(index: &CatalogIndex) -> Vec<DanglingReference> {
    let mut walker = Walker {
        index,
        report: Vec::new(),
    };

    for paper in index.papers() {
        let owner = (EntityKind::Paper, paper.id.as_str());
        if let Some(artist_id) = &paper.artist_id {
            walker.check(owner, "artist_id", (EntityKind::Artist, artist_id.as_str()));
        }
        for genre_id in &paper.genre_ids {
            walker.check(owner, "genre_ids", (EntityKind::Genre, genre_id.as_str()));
        }
    }

    for album in index.albums() {
        let owner = (EntityKind::Album, album.id.as_str());
        for paper_id in &album.paper_ids {
            walker.check(owner, "paper_ids", (EntityKind::Paper, paper_id.as_str()));
        }
        for artist_id in &album.artist_ids {
            walker.check(owner, "artist_ids", (EntityKind::Artist, artist_id.as_str()));
        }
    }

    for playlist in index.playlists() {
        let owner = (EntityKind::Playlist, playlist.id.as_str());
        for paper_id in &playlist.paper_ids {
            walker.check(owner, "paper_ids", (EntityKind::Paper, paper_id.as_str()));
        }
        if let Some(genre_id) = &playlist.genre_id {
            walker.check(owner, "genre_id", (EntityKind::Genre, genre_id.as_str()));
        }
    }

    walker.report
}

struct Walker<'a> {
    index: &'a CatalogIndex,
    report: Vec<DanglingReference>,
}

impl Walker<'_> {
    fn check(
        &mut self,
        (owner_kind, owner_id): (EntityKind, &str),
        field: &'static str,
        (target_kind, target_id): (EntityKind, &str),
    ) {
        if self.index.contains(target_kind, target_id) {
            return;
        }
        self.report.push(DanglingReference {
            owner_kind,
            owner_id: owner_id.to_string(),
            field,
            target_kind,
            target_id: target_id.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::{Album, Artist, Paper, Playlist};

    #[test]
    fn clean_catalog_has_no_dangling_references() {
        let index = CatalogIndex::from_records(
            vec![Paper {
                id: "p1".into(),
                artist_id: Some("ar1".into()),
                ..Default::default()
            }],
            vec![Album {
                id: "a1".into(),
                paper_ids: vec!["p1".into()],
                artist_ids: vec!["ar1".into()],
                ..Default::default()
            }],
            vec![],
            vec![Artist {
                id: "ar1".into(),
                ..Default::default()
            }],
            vec![],
        )
        .unwrap();
        assert!(find_dangling_references(&index).is_empty());
    }

    #[test]
    fn reports_each_missing_target_in_order() {
        let index = CatalogIndex::from_records(
            vec![Paper {
                id: "p1".into(),
                artist_id: Some("ghost".into()),
                genre_ids: vec!["g9".into()],
                ..Default::default()
            }],
            vec![Album {
                id: "a1".into(),
                paper_ids: vec!["p1".into(), "missing".into()],
                ..Default::default()
            }],
            vec![Playlist {
                id: "pl1".into(),
                genre_id: Some("g9".into()),
                ..Default::default()
            }],
            vec![],
            vec![],
        )
        .unwrap();

        let report = find_dangling_references(&index);
        let fields: Vec<_> = report
            .iter()
            .map(|entry| (entry.owner_id.as_str(), entry.field, entry.target_id.as_str()))
            .collect();
        assert_eq!(
            fields,
            [
                ("p1", "artist_id", "ghost"),
                ("p1", "genre_ids", "g9"),
                ("a1", "paper_ids", "missing"),
                ("pl1", "genre_id", "g9"),
            ]
        );
        assert_eq!(
            report[2].to_string(),
            "album a1 field paper_ids references unknown paper 'missing'"
        );
    }
}
