//! Hash-fragment routing.
//!
//! Fragments look like `#album/album001` or `#search/graph%20networks`. Only
//! the first two `/`-separated segments are significant; anything after them
//! is ignored. The parameter is percent-encoded, so ids and queries holding
//! `/` or `#` survive a round trip. Parsing never fails: unknown paths become
//! `Route::NotFound`.

use crate::catalog::EntityKind;
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Route {
    Home,
    Albums,
    Album(String),
    Playlists,
    Playlist(String),
    Artists,
    Artist(String),
    Genres,
    Genre(String),
    /// Decoded query text; may be blank.
    Search(String),
    /// Paper detail (shown as an overlay by graphical front ends).
    Paper(String),
    NotFound(String),
}

impl Route {
    /// Parse a location fragment, with or without the leading `#`.
    pub fn parse(fragment: &str) -> Self {
        let trimmed = fragment.trim();
        let body = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if body.is_empty() {
            return Route::Home;
        }

        let mut segments = body.split('/');
        let path = segments.next().unwrap_or_default();
        let param = decode_component(segments.next().unwrap_or_default());

        match path {
            "home" => Route::Home,
            "albums" => Route::Albums,
            "album" => Route::Album(param),
            "playlists" => Route::Playlists,
            "playlist" => Route::Playlist(param),
            "artists" => Route::Artists,
            "artist" => Route::Artist(param),
            "genres" => Route::Genres,
            "genre" => Route::Genre(param),
            "search" => Route::Search(param),
            "paper" => Route::Paper(param),
            other => Route::NotFound(other.to_string()),
        }
    }

    /// Route for a submitted search box value; `None` when it is blank.
    pub fn search(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Route::Search(trimmed.to_string()))
        }
    }

    /// Route to the detail page of a record.
    pub fn detail(kind: EntityKind, id: &str) -> Self {
        let id = id.to_string();
        match kind {
            EntityKind::Paper => Route::Paper(id),
            EntityKind::Album => Route::Album(id),
            EntityKind::Playlist => Route::Playlist(id),
            EntityKind::Artist => Route::Artist(id),
            EntityKind::Genre => Route::Genre(id),
        }
    }

    /// Canonical fragment (without `#`) for this route.
    pub fn fragment(&self) -> String {
        match self {
            Route::Home => "home".to_string(),
            Route::Albums => "albums".to_string(),
            Route::Album(id) => format!("album/{}", urlencoding::encode(id)),
            Route::Playlists => "playlists".to_string(),
            Route::Playlist(id) => format!("playlist/{}", urlencoding::encode(id)),
            Route::Artists => "artists".to_string(),
            Route::Artist(id) => format!("artist/{}", urlencoding::encode(id)),
            Route::Genres => "genres".to_string(),
            Route::Genre(id) => format!("genre/{}", urlencoding::encode(id)),
            Route::Search(query) => format!("search/{}", urlencoding::encode(query)),
            Route::Paper(id) => format!("paper/{}", urlencoding::encode(id)),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Navigation section the route belongs to; detail pages map to their list.
    pub fn section(&self) -> &str {
        match self {
            Route::Home => "home",
            Route::Albums | Route::Album(_) => "albums",
            Route::Playlists | Route::Playlist(_) => "playlists",
            Route::Artists | Route::Artist(_) => "artists",
            Route::Genres | Route::Genre(_) => "genres",
            Route::Search(_) => "search",
            Route::Paper(_) => "papers",
            Route::NotFound(path) => path,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.fragment())
    }
}

// Malformed escapes fall back to the raw text instead of failing the route.
fn decode_component(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_bare_fragments_go_home() {
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("#"), Route::Home);
        assert_eq!(Route::parse("#home"), Route::Home);
    }

    #[test]
    fn parses_list_and_detail_routes() {
        assert_eq!(Route::parse("#albums"), Route::Albums);
        assert_eq!(
            Route::parse("#album/album001"),
            Route::Album("album001".into())
        );
        assert_eq!(Route::parse("playlist/pl1"), Route::Playlist("pl1".into()));
        assert_eq!(Route::parse("#artist/ar1/extra"), Route::Artist("ar1".into()));
        assert_eq!(Route::parse("#genre"), Route::Genre(String::new()));
        assert_eq!(Route::parse("#paper/p7"), Route::Paper("p7".into()));
    }

    #[test]
    fn search_param_is_percent_decoded() {
        assert_eq!(
            Route::parse("#search/graph%20neural%20nets"),
            Route::Search("graph neural nets".into())
        );
        assert_eq!(Route::parse("#search"), Route::Search(String::new()));
        assert_eq!(Route::parse("#search/%E0%A4%A"), Route::Search("%E0%A4%A".into()));
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Route::parse("#tracks/1"), Route::NotFound("tracks".into()));
        assert_eq!(Route::parse("#tracks").section(), "tracks");
    }

    #[test]
    fn fragments_round_trip() {
        let routes = [
            Route::Home,
            Route::Genres,
            Route::Album("a1".into()),
            Route::Search("attention is all you need".into()),
            Route::Paper("p1".into()),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.to_string()), route);
        }
        assert_eq!(
            Route::Search("a b".into()).fragment(),
            "search/a%20b"
        );
    }

    #[test]
    fn ids_with_reserved_characters_round_trip() {
        let route = Route::Album("2024/spring#1".into());
        assert_eq!(route.fragment(), "album/2024%2Fspring%231");
        assert_eq!(Route::parse(&route.to_string()), route);
        assert_eq!(
            Route::parse("#paper/p%201"),
            Route::Paper("p 1".into())
        );
    }

    #[test]
    fn search_box_submission_trims_and_skips_blank() {
        assert_eq!(Route::search("   "), None);
        assert_eq!(Route::search("  gan "), Some(Route::Search("gan".into())));
    }

    #[test]
    fn sections_group_detail_pages_with_lists() {
        assert_eq!(Route::Album("a1".into()).section(), "albums");
        assert_eq!(Route::Genres.section(), "genres");
        assert_eq!(Route::detail(EntityKind::Artist, "ar1"), Route::Artist("ar1".into()));
    }
}
