//! Deserializable representation of the five catalog data files.
//!
//! The structs mirror `schema/*.schema.json`: only `id` is required, scalar
//! fields are optional, and list fields default to empty whether they are
//! missing or `null`. Use `CatalogIndex` for lookups and traversals; use these
//! types directly when a whole record is needed (detail views, JSON output).

use crate::catalog::identity::{AlbumId, ArtistId, EntityKind, GenreId, PaperId, PlaylistId};
use crate::catalog::index::{CatalogIndex, Collection};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A record type stored in one of the five catalog collections.
pub trait Entity: DeserializeOwned + Send + Sized {
    const KIND: EntityKind;

    /// The record's id as stored in the data file.
    fn id(&self) -> &str;

    /// The collection holding records of this kind inside an index.
    fn collection(index: &CatalogIndex) -> &Collection<Self>;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// A single paper ("track").
pub struct Paper {
    pub id: PaperId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub authors: Vec<String>,
    /// Any JSON integer the schema admits; whole-valued floats such as
    /// `2020.0` count, and numbers outside `i64` read as unknown.
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i64>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub takeaways: Vec<String>,
    #[serde(default)]
    pub thumbnail_image_url: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub code_url: Option<String>,
    #[serde(default)]
    pub artist_id: Option<ArtistId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genre_ids: Vec<GenreId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// An ordered collection of papers attributed to one or more artists.
pub struct Album {
    pub id: AlbumId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub album_art_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub paper_ids: Vec<PaperId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub artist_ids: Vec<ArtistId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// A curated paper list with a rich-text summary, filed under one genre.
pub struct Playlist {
    pub id: PlaylistId,
    #[serde(default)]
    pub title: Option<String>,
    /// HTML fragment; searched as plain text without stripping markup.
    #[serde(default)]
    pub summary_article: Option<String>,
    #[serde(default)]
    pub playlist_art_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub paper_ids: Vec<PaperId>,
    #[serde(default)]
    pub genre_id: Option<GenreId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// A lab, group, or author collective papers are attributed to.
pub struct Artist {
    pub id: ArtistId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// A research area papers and playlists are tagged with.
pub struct Genre {
    pub id: GenreId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Paper {
    pub fn display_title(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or("Untitled Paper")
    }

    /// Authors joined with `, `, or `Unknown Authors` when none are listed.
    pub fn display_authors(&self) -> String {
        if self.authors.is_empty() {
            "Unknown Authors".to_string()
        } else {
            self.authors.join(", ")
        }
    }

    pub fn display_year(&self) -> String {
        self.year
            .map(|year| year.to_string())
            .unwrap_or_else(|| "Unknown Year".to_string())
    }
}

impl Album {
    pub fn display_title(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or("Untitled Album")
    }
}

impl Playlist {
    pub fn display_title(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or("Untitled Playlist")
    }
}

impl Artist {
    pub fn display_name(&self) -> &str {
        non_blank(self.name.as_deref()).unwrap_or("Unknown Artist")
    }

    /// First character of the name, used where no logo is available.
    pub fn initial(&self) -> char {
        non_blank(self.name.as_deref())
            .and_then(|name| name.chars().next())
            .unwrap_or('?')
    }
}

impl Genre {
    pub fn display_name(&self) -> &str {
        non_blank(self.name.as_deref()).unwrap_or("Unknown Genre")
    }
}

impl Entity for Paper {
    const KIND: EntityKind = EntityKind::Paper;

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn collection(index: &CatalogIndex) -> &Collection<Self> {
        &index.papers
    }
}

impl Entity for Album {
    const KIND: EntityKind = EntityKind::Album;

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn collection(index: &CatalogIndex) -> &Collection<Self> {
        &index.albums
    }
}

impl Entity for Playlist {
    const KIND: EntityKind = EntityKind::Playlist;

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn collection(index: &CatalogIndex) -> &Collection<Self> {
        &index.playlists
    }
}

impl Entity for Artist {
    const KIND: EntityKind = EntityKind::Artist;

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn collection(index: &CatalogIndex) -> &Collection<Self> {
        &index.artists
    }
}

impl Entity for Genre {
    const KIND: EntityKind = EntityKind::Genre;

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn collection(index: &CatalogIndex) -> &Collection<Self> {
        &index.genres
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(year) = number.as_i64() {
        return Ok(Some(year));
    }
    Ok(number
        .as_f64()
        .filter(|value| value.fract() == 0.0 && value.abs() < i64::MAX as f64)
        .map(|value| value as i64))
}
