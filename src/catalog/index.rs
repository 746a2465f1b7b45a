//! Indexed, read-only view of the five catalog collections.
//!
//! `CatalogIndex::load` fetches every collection in parallel and either builds
//! a complete index or fails as a whole. Each collection keeps its records in
//! load order plus an id map for exact lookups. Relationship traversals live
//! here too; every one of them tolerates dangling ids by skipping them.

use crate::catalog::identity::{ArtistId, EntityKind, GenreId, PaperId};
use crate::catalog::model::{Album, Artist, Entity, Genre, Paper, Playlist};
use crate::catalog::source::DataSource;
use crate::schema_loader::CollectionSchema;
use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;
use std::collections::BTreeMap;
use std::thread;
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug)]
/// Records of one kind in load order, plus a map from id to position.
pub struct Collection<T> {
    records: Vec<T>,
    by_id: BTreeMap<String, usize>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            by_id: BTreeMap::new(),
        }
    }
}

impl<T: Entity> Collection<T> {
    /// Build a collection, rejecting empty or duplicate ids.
    pub fn from_records(records: Vec<T>) -> Result<Self> {
        let mut by_id = BTreeMap::new();
        for (position, record) in records.iter().enumerate() {
            let id = record.id();
            if id.is_empty() {
                bail!("{} at position {} has an empty id", T::KIND, position);
            }
            if by_id.insert(id.to_string(), position).is_some() {
                bail!("duplicate {} id {}", T::KIND, id);
            }
        }
        Ok(Self { records, by_id })
    }

    /// All records in load order.
    pub fn all(&self) -> &[T] {
        &self.records
    }

    /// Exact-match lookup by id.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.by_id.get(id).map(|&position| &self.records[position])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Default)]
/// The loaded catalog: five collections and the queries over them.
///
/// `CatalogIndex::default()` is the empty catalog every session starts with.
pub struct CatalogIndex {
    pub(crate) papers: Collection<Paper>,
    pub(crate) albums: Collection<Album>,
    pub(crate) playlists: Collection<Playlist>,
    pub(crate) artists: Collection<Artist>,
    pub(crate) genres: Collection<Genre>,
}

impl CatalogIndex {
    /// Fetch, validate, and index all five collections.
    ///
    /// Fetches run concurrently and are joined before anything is returned.
    /// If any of them fails the whole load fails; the error lists every kind
    /// that failed, not only the first.
    pub fn load(source: &dyn DataSource) -> Result<Self> {
        let origin = source.describe();
        let started = Instant::now();

        let (papers, albums, playlists, artists, genres) = thread::scope(|scope| {
            let papers = scope.spawn(|| fetch_collection::<Paper>(source));
            let albums = scope.spawn(|| fetch_collection::<Album>(source));
            let playlists = scope.spawn(|| fetch_collection::<Playlist>(source));
            let artists = scope.spawn(|| fetch_collection::<Artist>(source));
            let genres = scope.spawn(|| fetch_collection::<Genre>(source));
            (
                join_fetch(EntityKind::Paper, papers.join()),
                join_fetch(EntityKind::Album, albums.join()),
                join_fetch(EntityKind::Playlist, playlists.join()),
                join_fetch(EntityKind::Artist, artists.join()),
                join_fetch(EntityKind::Genre, genres.join()),
            )
        });

        let mut failures = Vec::new();
        collect_failure(EntityKind::Paper, &papers, &mut failures);
        collect_failure(EntityKind::Album, &albums, &mut failures);
        collect_failure(EntityKind::Playlist, &playlists, &mut failures);
        collect_failure(EntityKind::Artist, &artists, &mut failures);
        collect_failure(EntityKind::Genre, &genres, &mut failures);
        if !failures.is_empty() {
            bail!(
                "failed to load {} of {} catalog collections from {}:\n{}",
                failures.len(),
                EntityKind::ALL.len(),
                origin,
                failures.join("\n")
            );
        }

        let index = Self {
            papers: papers?,
            albums: albums?,
            playlists: playlists?,
            artists: artists?,
            genres: genres?,
        };
        info!(
            source = %origin,
            papers = index.papers.len(),
            albums = index.albums.len(),
            playlists = index.playlists.len(),
            artists = index.artists.len(),
            genres = index.genres.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "catalog loaded"
        );
        Ok(index)
    }

    /// Build an index from already-parsed records (tests, embedding callers).
    pub fn from_records(
        papers: Vec<Paper>,
        albums: Vec<Album>,
        playlists: Vec<Playlist>,
        artists: Vec<Artist>,
        genres: Vec<Genre>,
    ) -> Result<Self> {
        Ok(Self {
            papers: Collection::from_records(papers)?,
            albums: Collection::from_records(albums)?,
            playlists: Collection::from_records(playlists)?,
            artists: Collection::from_records(artists)?,
            genres: Collection::from_records(genres)?,
        })
    }

    /// Every record of kind `T`, in load order.
    pub fn all<T: Entity>(&self) -> &[T] {
        T::collection(self).all()
    }

    /// Resolve a record of kind `T` by id; `None` when no record matches.
    pub fn get<T: Entity>(&self, id: &str) -> Option<&T> {
        T::collection(self).get(id)
    }

    /// Number of records loaded for `kind`.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Paper => self.papers.len(),
            EntityKind::Album => self.albums.len(),
            EntityKind::Playlist => self.playlists.len(),
            EntityKind::Artist => self.artists.len(),
            EntityKind::Genre => self.genres.len(),
        }
    }

    /// Whether a record of `kind` with `id` exists.
    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        match kind {
            EntityKind::Paper => self.papers.get(id).is_some(),
            EntityKind::Album => self.albums.get(id).is_some(),
            EntityKind::Playlist => self.playlists.get(id).is_some(),
            EntityKind::Artist => self.artists.get(id).is_some(),
            EntityKind::Genre => self.genres.get(id).is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        EntityKind::ALL.into_iter().all(|kind| self.count(kind) == 0)
    }

    pub fn papers(&self) -> &[Paper] {
        self.papers.all()
    }

    pub fn albums(&self) -> &[Album] {
        self.albums.all()
    }

    pub fn playlists(&self) -> &[Playlist] {
        self.playlists.all()
    }

    pub fn artists(&self) -> &[Artist] {
        self.artists.all()
    }

    pub fn genres(&self) -> &[Genre] {
        self.genres.all()
    }

    pub fn paper(&self, id: &str) -> Option<&Paper> {
        self.papers.get(id)
    }

    pub fn album(&self, id: &str) -> Option<&Album> {
        self.albums.get(id)
    }

    pub fn playlist(&self, id: &str) -> Option<&Playlist> {
        self.playlists.get(id)
    }

    pub fn artist(&self, id: &str) -> Option<&Artist> {
        self.artists.get(id)
    }

    pub fn genre(&self, id: &str) -> Option<&Genre> {
        self.genres.get(id)
    }

    /// Papers whose scalar `artist_id` equals `artist_id`.
    pub fn papers_by_artist(&self, artist_id: &str) -> Vec<&Paper> {
        self.papers()
            .iter()
            .filter(|paper| {
                paper
                    .artist_id
                    .as_ref()
                    .is_some_and(|id| id.as_str() == artist_id)
            })
            .collect()
    }

    /// Papers whose `genre_ids` list contains `genre_id`.
    pub fn papers_by_genre(&self, genre_id: &str) -> Vec<&Paper> {
        self.papers()
            .iter()
            .filter(|paper| paper.genre_ids.iter().any(|id| id.as_str() == genre_id))
            .collect()
    }

    /// Playlists whose scalar `genre_id` equals `genre_id`.
    pub fn playlists_by_genre(&self, genre_id: &str) -> Vec<&Playlist> {
        self.playlists()
            .iter()
            .filter(|playlist| {
                playlist
                    .genre_id
                    .as_ref()
                    .is_some_and(|id| id.as_str() == genre_id)
            })
            .collect()
    }

    /// Albums whose `artist_ids` list contains `artist_id`.
    pub fn albums_by_artist(&self, artist_id: &str) -> Vec<&Album> {
        self.albums()
            .iter()
            .filter(|album| album.artist_ids.iter().any(|id| id.as_str() == artist_id))
            .collect()
    }

    /// Papers listed by an album, in album order. Unknown album yields empty.
    pub fn papers_for_album(&self, album_id: &str) -> Vec<&Paper> {
        self.album(album_id)
            .map(|album| self.resolve_papers(&album.paper_ids))
            .unwrap_or_default()
    }

    /// Papers listed by a playlist, in playlist order. Unknown playlist yields empty.
    pub fn papers_for_playlist(&self, playlist_id: &str) -> Vec<&Paper> {
        self.playlist(playlist_id)
            .map(|playlist| self.resolve_papers(&playlist.paper_ids))
            .unwrap_or_default()
    }

    /// Artists credited on an album, in album order.
    pub fn artists_for_album(&self, album_id: &str) -> Vec<&Artist> {
        self.album(album_id)
            .map(|album| self.resolve_artists(&album.artist_ids))
            .unwrap_or_default()
    }

    /// The artist a paper is attributed to, if set and known.
    pub fn artist_for_paper(&self, paper_id: &str) -> Option<&Artist> {
        let artist_id = self.paper(paper_id)?.artist_id.as_ref()?;
        self.artist(artist_id.as_str())
    }

    /// Genres a paper is tagged with, in tag order.
    pub fn genres_for_paper(&self, paper_id: &str) -> Vec<&Genre> {
        self.paper(paper_id)
            .map(|paper| self.resolve_genres(&paper.genre_ids))
            .unwrap_or_default()
    }

    /// The genre a playlist is filed under, if set and known.
    pub fn genre_for_playlist(&self, playlist_id: &str) -> Option<&Genre> {
        let genre_id = self.playlist(playlist_id)?.genre_id.as_ref()?;
        self.genre(genre_id.as_str())
    }

    /// Resolve an ordered id list, skipping ids with no matching paper.
    pub fn resolve_papers(&self, ids: &[PaperId]) -> Vec<&Paper> {
        ids.iter().filter_map(|id| self.paper(id.as_str())).collect()
    }

    /// Resolve an ordered id list, skipping ids with no matching artist.
    pub fn resolve_artists(&self, ids: &[ArtistId]) -> Vec<&Artist> {
        ids.iter().filter_map(|id| self.artist(id.as_str())).collect()
    }

    /// Resolve an ordered id list, skipping ids with no matching genre.
    pub fn resolve_genres(&self, ids: &[GenreId]) -> Vec<&Genre> {
        ids.iter().filter_map(|id| self.genre(id.as_str())).collect()
    }
}

fn fetch_collection<T: Entity>(source: &dyn DataSource) -> Result<Collection<T>> {
    let kind = T::KIND;
    let started = Instant::now();
    let body = source.fetch(kind)?;
    let payload: Value =
        serde_json::from_str(&body).with_context(|| format!("parsing {}", kind.file_name()))?;
    CollectionSchema::for_kind(kind)?.validate(&payload)?;
    let records: Vec<T> = serde_json::from_value(payload)
        .with_context(|| format!("decoding {} records", kind))?;
    let collection = Collection::from_records(records)?;
    debug!(
        kind = kind.plural(),
        records = collection.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "fetched collection"
    );
    Ok(collection)
}

fn join_fetch<T>(kind: EntityKind, joined: thread::Result<Result<T>>) -> Result<T> {
    joined.unwrap_or_else(|_| Err(anyhow!("fetch for {} panicked", kind.plural())))
}

fn collect_failure<T>(kind: EntityKind, result: &Result<T>, failures: &mut Vec<String>) {
    if let Err(err) = result {
        warn!(kind = kind.plural(), error = %format!("{err:#}"), "collection fetch failed");
        failures.push(format!("  {}: {err:#}", kind.plural()));
    }
}
