//! Data maintenance check for the catalog directory.
//!
//! Loads the five collections through the same validating path the explorer
//! uses, prints per-kind counts, then lists every relationship id that points
//! at a missing record. With `--strict`, any dangling reference fails the run.

use anyhow::{Context, Result, bail};
use paper_explorer::logging::init_logging;
use paper_explorer::{
    CatalogIndex, DanglingReference, EntityKind, find_dangling_references, load_repository,
    resolve_data_dir,
};
use std::env;
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};
use tracing::info;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    init_logging("info")?;

    let data_dir = resolve_data_dir(cli.data.as_deref())?;
    let repository = load_repository(&data_dir)
        .with_context(|| format!("catalog at {} failed to load", data_dir.display()))?;
    let dangling = find_dangling_references(repository.index());
    info!(dangling = dangling.len(), "integrity check finished");

    let mut output = String::new();
    render_report(&data_dir, repository.index(), &dangling, &mut output)
        .context("failed to render report")?;
    print!("{output}");

    if cli.strict && !dangling.is_empty() {
        bail!(
            "{} dangling reference(s) found in {}",
            dangling.len(),
            data_dir.display()
        );
    }
    Ok(())
}

struct Cli {
    data: Option<PathBuf>,
    strict: bool,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut data = None;
        let mut strict = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data" => {
                    let value = args.next().context("--data requires a directory")?;
                    data = Some(PathBuf::from(value));
                }
                "--strict" => strict = true,
                "--help" | "-h" => usage(0),
                other => {
                    eprintln!("unknown argument '{other}'");
                    usage(1)
                }
            }
        }

        Ok(Self { data, strict })
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: catalog-check [--data DIR] [--strict]\n\nOptions:\n  --data DIR   Catalog directory holding the five collection files.\n  --strict     Exit non-zero when any relationship id points nowhere."
    );
    std::process::exit(code);
}

fn render_report(
    data_dir: &Path,
    index: &CatalogIndex,
    dangling: &[DanglingReference],
    out: &mut String,
) -> fmt::Result {
    writeln!(out, "catalog: {}", data_dir.display())?;
    for kind in EntityKind::ALL {
        writeln!(out, "  {:<10} {}", kind.plural(), index.count(kind))?;
    }
    writeln!(out)?;

    if dangling.is_empty() {
        writeln!(out, "no dangling references")?;
        return Ok(());
    }
    writeln!(out, "dangling references ({}):", dangling.len())?;
    for entry in dangling {
        writeln!(out, "  {entry}")?;
    }
    Ok(())
}
