#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use paper_explorer::EntityKind;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// The catalog shipped with the crate.
pub fn shipped_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn explorer_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_explorer"))
}

pub fn catalog_check_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_catalog-check"))
}

/// A small catalog with one dangling id per relationship list.
pub fn fixture_payload(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Paper => {
            r#"[
                {"id": "p1", "title": "A gan-based approach to faces", "authors": ["Ada Lovelace"],
                 "year": 2021, "artist_id": "ar1", "genre_ids": ["g1", "g-missing"]},
                {"id": "p2", "title": "Sequence models", "venue": "NeurIPS",
                 "artist_id": "ar1", "genre_ids": ["g1"]},
                {"id": "p3", "title": null, "abstract": "Diffusion everywhere",
                 "artist_id": "ar-missing"}
            ]"#
        }
        EntityKind::Album => {
            r#"[
                {"id": "a1", "title": "Firsts", "paper_ids": ["p1", "missing", "p2"],
                 "artist_ids": ["ar1"]},
                {"id": "a2", "title": null}
            ]"#
        }
        EntityKind::Playlist => {
            r#"[
                {"id": "pl1", "title": "Weekend", "summary_article": "<p>GANs and more</p>",
                 "paper_ids": ["p2", "p1"], "genre_id": "g1"}
            ]"#
        }
        EntityKind::Artist => r#"[{"id": "ar1", "name": "Google Brain"}]"#,
        EntityKind::Genre => {
            r#"[
                {"id": "g1", "name": "Generative Models"},
                {"id": "g2", "name": "Vision"}
            ]"#
        }
    }
}

/// Write the fixture catalog into a fresh temp dir.
pub fn fixture_catalog() -> Result<TempDir> {
    let dir = TempDir::new().context("failed to allocate catalog dir")?;
    for kind in EntityKind::ALL {
        write_collection(dir.path(), kind, fixture_payload(kind))?;
    }
    Ok(dir)
}

pub fn write_collection(dir: &Path, kind: EntityKind, payload: &str) -> Result<()> {
    let path = dir.join(kind.file_name());
    fs::write(&path, payload).with_context(|| format!("failed to write {}", path.display()))
}

/// Run a command and require success, returning its captured output.
pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Run a command that is expected to fail.
pub fn run_failing(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        bail!(
            "command {:?} unexpectedly succeeded\nstdout: {}",
            cmd,
            String::from_utf8_lossy(&output.stdout)
        );
    }
    Ok(output)
}
