use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;

/// The five record collections that make up a catalog.
///
/// Variant order is the order collections are fetched, reported, and listed
/// in search results.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum EntityKind {
    Paper,
    Album,
    Playlist,
    Artist,
    Genre,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Paper,
        EntityKind::Album,
        EntityKind::Playlist,
        EntityKind::Artist,
        EntityKind::Genre,
    ];

    /// Singular label used in routes and messages (`paper`, `album`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Paper => "paper",
            EntityKind::Album => "album",
            EntityKind::Playlist => "playlist",
            EntityKind::Artist => "artist",
            EntityKind::Genre => "genre",
        }
    }

    /// Plural label; doubles as the data file stem and the list route.
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Paper => "papers",
            EntityKind::Album => "albums",
            EntityKind::Playlist => "playlists",
            EntityKind::Artist => "artists",
            EntityKind::Genre => "genres",
        }
    }

    /// Name of the JSON file holding this collection inside a data directory.
    pub fn file_name(self) -> String {
        format!("{}.json", self.plural())
    }

    /// Parse either the singular or plural label.
    pub fn from_label(value: &str) -> Option<Self> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value || kind.plural() == value)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntityKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntityKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        EntityKind::from_label(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown entity kind '{value}'")))
    }
}

// Ids are opaque strings in the data files. Keeping one newtype per kind
// stops a genre id from being handed to an artist lookup.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a paper record (`papers.json`).
    PaperId
);
entity_id!(
    /// Identifier of an album record (`albums.json`).
    AlbumId
);
entity_id!(
    /// Identifier of a playlist record (`playlists.json`).
    PlaylistId
);
entity_id!(
    /// Identifier of an artist record (`artists.json`).
    ArtistId
);
entity_id!(
    /// Identifier of a genre record (`genres.json`).
    GenreId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn kind_labels_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_label(kind.as_str()), Some(kind));
            assert_eq!(EntityKind::from_label(kind.plural()), Some(kind));
        }
        assert_eq!(EntityKind::from_label("track"), None);
        assert_eq!(EntityKind::Playlist.file_name(), "playlists.json");
    }

    #[test]
    fn kind_serializes_as_singular_label() {
        let json = serde_json::to_string(&EntityKind::Genre).unwrap();
        assert_eq!(json, "\"genre\"");
        let back: EntityKind = serde_json::from_str("\"albums\"").unwrap();
        assert_eq!(back, EntityKind::Album);
        assert!(serde_json::from_str::<EntityKind>("\"track\"").is_err());
    }

    #[test]
    fn ids_are_transparent_and_borrow_as_str() {
        let id: PaperId = serde_json::from_str("\"p1\"").unwrap();
        assert_eq!(id, PaperId::from("p1"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p1\"");

        let mut map = BTreeMap::new();
        map.insert(GenreId::from("g1"), 3usize);
        assert_eq!(map.get("g1"), Some(&3));
        assert_eq!(map.get("g2"), None);
    }
}
