//! JSON Schema validation for catalog payloads.
//!
//! Each entity kind has a schema under `schema/`, embedded at build time so
//! installed binaries validate against the same contract the repository ships.
//! Validation runs on the raw `serde_json::Value` before records are parsed,
//! which lets a failure list every offending record instead of stopping at the
//! first serde error.

use crate::catalog::EntityKind;
use anyhow::{Context, Result, anyhow, bail};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

const PAPERS_SCHEMA: &str = include_str!("../schema/papers.schema.json");
const ALBUMS_SCHEMA: &str = include_str!("../schema/albums.schema.json");
const PLAYLISTS_SCHEMA: &str = include_str!("../schema/playlists.schema.json");
const ARTISTS_SCHEMA: &str = include_str!("../schema/artists.schema.json");
const GENRES_SCHEMA: &str = include_str!("../schema/genres.schema.json");

// Long violation lists are truncated in error messages.
const MAX_REPORTED_VIOLATIONS: usize = 20;

/// Compiled schema for one collection payload.
pub(crate) struct CollectionSchema {
    kind: EntityKind,
    compiled: JSONSchema,
}

impl CollectionSchema {
    /// Parse and compile the embedded schema for `kind`.
    pub(crate) fn for_kind(kind: EntityKind) -> Result<Self> {
        let raw: Value = serde_json::from_str(schema_text(kind))
            .with_context(|| format!("parsing embedded schema for {}", kind.plural()))?;
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&raw)
            .map_err(|err| anyhow!("compiling schema for {}: {err}", kind.plural()))?;
        Ok(Self { kind, compiled })
    }

    /// Validate a parsed payload, reporting every violation found.
    pub(crate) fn validate(&self, payload: &Value) -> Result<()> {
        let violations: Vec<String> = match self.compiled.validate(payload) {
            Ok(()) => return Ok(()),
            Err(errors) => errors
                .map(|err| format!("{}: {}", pointer_label(&err.instance_path.to_string()), err))
                .collect(),
        };

        let total = violations.len();
        let mut details = violations
            .into_iter()
            .take(MAX_REPORTED_VIOLATIONS)
            .collect::<Vec<_>>()
            .join("\n");
        if total > MAX_REPORTED_VIOLATIONS {
            details.push_str(&format!(
                "\n... and {} more",
                total - MAX_REPORTED_VIOLATIONS
            ));
        }
        bail!(
            "{} payload failed schema validation:\n{}",
            self.kind.plural(),
            details
        );
    }
}

/// The schema document shipped for `kind`.
pub fn schema_text(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Paper => PAPERS_SCHEMA,
        EntityKind::Album => ALBUMS_SCHEMA,
        EntityKind::Playlist => PLAYLISTS_SCHEMA,
        EntityKind::Artist => ARTISTS_SCHEMA,
        EntityKind::Genre => GENRES_SCHEMA,
    }
}

fn pointer_label(pointer: &str) -> &str {
    if pointer.is_empty() { "(root)" } else { pointer }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_embedded_schema_compiles() {
        for kind in EntityKind::ALL {
            CollectionSchema::for_kind(kind)
                .unwrap_or_else(|err| panic!("schema for {kind} should compile: {err:#}"));
        }
    }

    #[test]
    fn accepts_minimal_and_null_fields() {
        let schema = CollectionSchema::for_kind(EntityKind::Paper).unwrap();
        let payload = json!([
            {"id": "p1"},
            {"id": "p2", "genre_ids": null, "artist_id": null, "year": 2020}
        ]);
        schema.validate(&payload).expect("payload should validate");
    }

    #[test]
    fn reports_each_violation_with_its_pointer() {
        let schema = CollectionSchema::for_kind(EntityKind::Album).unwrap();
        let payload = json!([
            {"title": "no id"},
            {"id": "a2", "paper_ids": "p1"}
        ]);
        let err = schema.validate(&payload).unwrap_err().to_string();
        assert!(err.starts_with("albums payload failed schema validation"));
        assert!(err.contains("/0"), "missing id should be reported: {err}");
        assert!(err.contains("/1/paper_ids"), "wrong list type should be reported: {err}");
    }

    #[test]
    fn rejects_non_array_payload() {
        let schema = CollectionSchema::for_kind(EntityKind::Genre).unwrap();
        let err = schema.validate(&json!({"id": "g1"})).unwrap_err();
        assert!(err.to_string().contains("(root)"));
    }
}
