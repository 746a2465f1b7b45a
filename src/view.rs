//! View models built from a route and the catalog index.
//!
//! Views borrow from the index and carry exactly what a page shows. They
//! serialize to JSON with a `view` tag so front ends can dispatch on it.

use crate::catalog::{
    Album, Artist, CatalogIndex, EntityKind, Genre, Paper, Playlist, SearchResults,
};
use crate::route::Route;
use serde::Serialize;
use tracing::debug;

pub const FEATURED_ALBUMS: usize = 5;
pub const FEATURED_PLAYLISTS: usize = 5;
pub const BROWSE_GENRES: usize = 10;
pub const BROWSE_ARTISTS: usize = 10;

#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View<'a> {
    Home {
        featured_albums: &'a [Album],
        featured_playlists: &'a [Playlist],
        genres: &'a [Genre],
        artists: &'a [Artist],
    },
    AlbumList {
        albums: &'a [Album],
    },
    PlaylistList {
        playlists: &'a [Playlist],
    },
    ArtistList {
        artists: &'a [Artist],
    },
    GenreList {
        genres: &'a [Genre],
    },
    AlbumDetail {
        album: &'a Album,
        papers: Vec<&'a Paper>,
        artists: Vec<&'a Artist>,
    },
    PlaylistDetail {
        playlist: &'a Playlist,
        papers: Vec<&'a Paper>,
        genre: Option<&'a Genre>,
    },
    ArtistDetail {
        artist: &'a Artist,
        papers: Vec<&'a Paper>,
        albums: Vec<&'a Album>,
    },
    GenreDetail {
        genre: &'a Genre,
        playlists: Vec<&'a Playlist>,
        papers: Vec<&'a Paper>,
    },
    PaperDetail {
        paper: &'a Paper,
        artist: Option<&'a Artist>,
        genres: Vec<&'a Genre>,
    },
    Search {
        query: String,
        results: SearchResults<'a>,
    },
    /// A detail route whose id matched nothing.
    EntityNotFound { kind: EntityKind, id: String },
    /// A path the router does not know.
    RouteNotFound { path: String },
}

/// Resolve `route` against `index`.
pub fn build_view<'a>(index: &'a CatalogIndex, route: &Route) -> View<'a> {
    debug!(route = %route, "building view");
    match route {
        Route::Home => View::Home {
            featured_albums: head(index.albums(), FEATURED_ALBUMS),
            featured_playlists: head(index.playlists(), FEATURED_PLAYLISTS),
            genres: head(index.genres(), BROWSE_GENRES),
            artists: head(index.artists(), BROWSE_ARTISTS),
        },
        Route::Albums => View::AlbumList {
            albums: index.albums(),
        },
        Route::Playlists => View::PlaylistList {
            playlists: index.playlists(),
        },
        Route::Artists => View::ArtistList {
            artists: index.artists(),
        },
        Route::Genres => View::GenreList {
            genres: index.genres(),
        },
        Route::Album(id) => match index.album(id) {
            Some(album) => View::AlbumDetail {
                album,
                papers: index.papers_for_album(id),
                artists: index.artists_for_album(id),
            },
            None => not_found(EntityKind::Album, id),
        },
        Route::Playlist(id) => match index.playlist(id) {
            Some(playlist) => View::PlaylistDetail {
                playlist,
                papers: index.papers_for_playlist(id),
                genre: index.genre_for_playlist(id),
            },
            None => not_found(EntityKind::Playlist, id),
        },
        Route::Artist(id) => match index.artist(id) {
            Some(artist) => View::ArtistDetail {
                artist,
                papers: index.papers_by_artist(id),
                albums: index.albums_by_artist(id),
            },
            None => not_found(EntityKind::Artist, id),
        },
        Route::Genre(id) => match index.genre(id) {
            Some(genre) => View::GenreDetail {
                genre,
                playlists: index.playlists_by_genre(id),
                papers: index.papers_by_genre(id),
            },
            None => not_found(EntityKind::Genre, id),
        },
        Route::Paper(id) => match index.paper(id) {
            Some(paper) => View::PaperDetail {
                paper,
                artist: index.artist_for_paper(id),
                genres: index.genres_for_paper(id),
            },
            None => not_found(EntityKind::Paper, id),
        },
        Route::Search(query) => View::Search {
            query: query.trim().to_string(),
            results: index.search(query),
        },
        Route::NotFound(path) => View::RouteNotFound { path: path.clone() },
    }
}

impl View<'_> {
    /// Page title, e.g. `Album: Foundations` or `Search: gan`.
    pub fn title(&self) -> String {
        match self {
            View::Home { .. } => "Home".to_string(),
            View::AlbumList { .. } => "Albums".to_string(),
            View::PlaylistList { .. } => "Playlists".to_string(),
            View::ArtistList { .. } => "Artists".to_string(),
            View::GenreList { .. } => "Genres".to_string(),
            View::AlbumDetail { album, .. } => format!("Album: {}", album.display_title()),
            View::PlaylistDetail { playlist, .. } => {
                format!("Playlist: {}", playlist.display_title())
            }
            View::ArtistDetail { artist, .. } => format!("Artist: {}", artist.display_name()),
            View::GenreDetail { genre, .. } => format!("Genre: {}", genre.display_name()),
            View::PaperDetail { paper, .. } => format!("Paper: {}", paper.display_title()),
            View::Search { query, .. } => format!("Search: {query}"),
            View::EntityNotFound { kind, .. } => format!("{} Not Found", capitalize(kind.as_str())),
            View::RouteNotFound { .. } => "404 Not Found".to_string(),
        }
    }

    /// True for both not-found variants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            View::EntityNotFound { .. } | View::RouteNotFound { .. }
        )
    }
}

fn not_found<'a>(kind: EntityKind, id: &str) -> View<'a> {
    View::EntityNotFound {
        kind,
        id: id.to_string(),
    }
}

fn head<T>(records: &[T], limit: usize) -> &[T] {
    &records[..records.len().min(limit)]
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AlbumId, GenreId};
    use serde_json::Value;

    fn index() -> CatalogIndex {
        let albums = (1..=7)
            .map(|n| Album {
                id: AlbumId(format!("a{n}")),
                title: Some(format!("Album {n}")),
                paper_ids: vec!["p1".into(), "gone".into()],
                artist_ids: vec!["ar1".into()],
                ..Default::default()
            })
            .collect();
        let genres = (1..=12)
            .map(|n| Genre {
                id: GenreId(format!("g{n}")),
                name: Some(format!("Genre {n}")),
                description: None,
            })
            .collect();
        let papers = vec![Paper {
            id: "p1".into(),
            title: Some("Attention Is All You Need".into()),
            artist_id: Some("ar1".into()),
            genre_ids: vec!["g1".into(), "g404".into()],
            ..Default::default()
        }];
        let artists = vec![Artist {
            id: "ar1".into(),
            name: Some("Google Brain".into()),
            ..Default::default()
        }];
        let playlists = vec![Playlist {
            id: "pl1".into(),
            title: Some("Transformers 101".into()),
            paper_ids: vec!["p1".into()],
            genre_id: Some("g1".into()),
            ..Default::default()
        }];
        CatalogIndex::from_records(papers, albums, playlists, artists, genres).unwrap()
    }

    #[test]
    fn home_caps_featured_sections() {
        let index = index();
        let View::Home {
            featured_albums,
            featured_playlists,
            genres,
            artists,
        } = build_view(&index, &Route::Home)
        else {
            panic!("expected home view");
        };
        assert_eq!(featured_albums.len(), FEATURED_ALBUMS);
        assert_eq!(featured_albums[0].id.as_str(), "a1");
        assert_eq!(featured_playlists.len(), 1);
        assert_eq!(genres.len(), BROWSE_GENRES);
        assert_eq!(artists.len(), 1);
    }

    #[test]
    fn album_detail_resolves_papers_and_artists() {
        let index = index();
        let view = build_view(&index, &Route::parse("#album/a3"));
        assert_eq!(view.title(), "Album: Album 3");
        let View::AlbumDetail { papers, artists, .. } = view else {
            panic!("expected album detail");
        };
        assert_eq!(papers.len(), 1);
        assert_eq!(artists[0].display_name(), "Google Brain");
    }

    #[test]
    fn paper_detail_skips_unknown_genres() {
        let index = index();
        let View::PaperDetail { artist, genres, .. } = build_view(&index, &Route::Paper("p1".into()))
        else {
            panic!("expected paper detail");
        };
        assert!(artist.is_some());
        assert_eq!(genres.len(), 1);
    }

    #[test]
    fn genre_and_artist_details_collect_related_records() {
        let index = index();
        let View::GenreDetail {
            playlists, papers, ..
        } = build_view(&index, &Route::Genre("g1".into()))
        else {
            panic!("expected genre detail");
        };
        assert_eq!(playlists.len(), 1);
        assert_eq!(papers.len(), 1);

        let View::ArtistDetail { papers, albums, .. } =
            build_view(&index, &Route::Artist("ar1".into()))
        else {
            panic!("expected artist detail");
        };
        assert_eq!(papers.len(), 1);
        assert_eq!(albums.len(), 7);
    }

    #[test]
    fn unknown_ids_and_paths_produce_not_found_views() {
        let index = index();
        let view = build_view(&index, &Route::Playlist("nope".into()));
        assert!(view.is_not_found());
        assert_eq!(view.title(), "Playlist Not Found");

        let view = build_view(&index, &Route::Album(String::new()));
        assert!(matches!(view, View::EntityNotFound { kind: EntityKind::Album, .. }));

        let view = build_view(&index, &Route::parse("#charts"));
        assert_eq!(view.title(), "404 Not Found");
    }

    #[test]
    fn search_view_serializes_with_tag() {
        let index = index();
        let view = build_view(&index, &Route::parse("#search/%20ATTENTION%20"));
        assert_eq!(view.title(), "Search: ATTENTION");
        let json: Value = serde_json::to_value(&view).unwrap();
        assert_eq!(json["view"], "search");
        assert_eq!(json["query"], "ATTENTION");
        assert_eq!(json["results"]["papers"][0]["id"], "p1");
        assert_eq!(json["results"]["albums"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn blank_search_is_empty_not_an_error() {
        let index = index();
        let View::Search { results, .. } = build_view(&index, &Route::Search("  ".into())) else {
            panic!("expected search view");
        };
        assert!(results.is_empty());
    }
}
