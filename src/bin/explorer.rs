//! Command-line front end for the paper catalog.
//!
//! Loads the five collections, resolves a hash route (`album/a1`,
//! `search/graph%20nets`, ...) and prints the resulting page as plain text or
//! as the tagged JSON view model. Load failures are reported with a generic
//! message followed by the cause chain.

use anyhow::{Context, Result, anyhow};
use paper_explorer::logging::{DEFAULT_LOG_DIRECTIVE, init_logging};
use paper_explorer::{
    Album, Artist, Genre, Paper, Playlist, Route, SearchResults, View, build_view,
    load_repository, resolve_data_dir,
};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::error;

const LOAD_FAILURE_MESSAGE: &str = "could not load application data";

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    init_logging(DEFAULT_LOG_DIRECTIVE)?;

    let repository = resolve_data_dir(cli.data.as_deref())
        .and_then(|dir| load_repository(&dir))
        .map_err(|err| {
            error!(error = %format!("{err:#}"), "catalog load failed");
            err.context(LOAD_FAILURE_MESSAGE)
        })?;

    let route = Route::parse(&cli.route);
    let view = build_view(repository.index(), &route);

    match cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&view).context("failed to serialize view")?
            );
        }
        OutputFormat::Text => {
            let mut output = String::new();
            render_view(&route, &view, &mut output)
                .map_err(|err| anyhow!("failed to render view: {err}"))?;
            print!("{output}");
        }
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

struct Cli {
    data: Option<PathBuf>,
    format: OutputFormat,
    route: String,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut data = None;
        let mut format = OutputFormat::Text;
        let mut route = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data" => {
                    let value = args.next().context("--data requires a directory")?;
                    data = Some(PathBuf::from(value));
                }
                "--format" => {
                    let value = args.next().context("--format requires text or json")?;
                    format = match value.as_str() {
                        "text" => OutputFormat::Text,
                        "json" => OutputFormat::Json,
                        other => {
                            eprintln!("unknown format '{other}'");
                            usage(1)
                        }
                    };
                }
                "--help" | "-h" => usage(0),
                other if other.starts_with("--") => {
                    eprintln!("unknown flag '{other}'");
                    usage(1)
                }
                other => {
                    if route.replace(other.to_string()).is_some() {
                        eprintln!("only one route may be given");
                        usage(1);
                    }
                }
            }
        }

        Ok(Self {
            data,
            format,
            route: route.unwrap_or_default(),
        })
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: explorer [--data DIR] [--format text|json] [ROUTE]\n\nRoutes:\n  home, albums, album/<id>, playlists, playlist/<id>, artists, artist/<id>,\n  genres, genre/<id>, paper/<id>, search/<query>\n\nThe data directory defaults to $PAPER_EXPLORER_DATA or the nearest data/\ndirectory above the executable."
    );
    std::process::exit(code);
}

fn render_view(route: &Route, view: &View<'_>, out: &mut impl fmt::Write) -> fmt::Result {
    let title = view.title();
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))?;
    writeln!(out, "route: {route}")?;
    writeln!(out)?;

    match view {
        View::Home {
            featured_albums,
            featured_playlists,
            genres,
            artists,
        } => {
            section(out, "Featured Albums", featured_albums.iter(), album_line)?;
            section(out, "Featured Playlists", featured_playlists.iter(), playlist_line)?;
            section(out, "Browse Genres", genres.iter(), genre_line)?;
            section(out, "Browse Artists", artists.iter(), artist_line)?;
        }
        View::AlbumList { albums } => section(out, "Albums", albums.iter(), album_line)?,
        View::PlaylistList { playlists } => {
            section(out, "Playlists", playlists.iter(), playlist_line)?
        }
        View::ArtistList { artists } => section(out, "Artists", artists.iter(), artist_line)?,
        View::GenreList { genres } => section(out, "Genres", genres.iter(), genre_line)?,
        View::AlbumDetail {
            album,
            papers,
            artists,
        } => {
            paragraph(out, album.description.as_deref())?;
            section(out, "Artists", artists.iter().copied(), artist_line)?;
            section(out, "Papers", papers.iter().copied(), paper_line)?;
        }
        View::PlaylistDetail {
            playlist,
            papers,
            genre,
        } => {
            if let Some(genre) = genre {
                writeln!(out, "genre: {}", genre.display_name())?;
                writeln!(out)?;
            }
            paragraph(out, playlist.summary_article.as_deref())?;
            section(out, "Papers", papers.iter().copied(), paper_line)?;
        }
        View::ArtistDetail {
            artist,
            papers,
            albums,
        } => {
            paragraph(out, artist.description.as_deref())?;
            section(out, "Albums", albums.iter().copied(), album_line)?;
            section(out, "Papers", papers.iter().copied(), paper_line)?;
        }
        View::GenreDetail {
            genre,
            playlists,
            papers,
        } => {
            paragraph(out, genre.description.as_deref())?;
            section(out, "Playlists", playlists.iter().copied(), playlist_line)?;
            section(out, "Papers", papers.iter().copied(), paper_line)?;
        }
        View::PaperDetail {
            paper,
            artist,
            genres,
        } => render_paper(out, paper, *artist, genres)?,
        View::Search { query, results } => render_search(out, query, results)?,
        View::EntityNotFound { kind, id } => {
            writeln!(out, "No {kind} with id '{id}'.")?;
            writeln!(out, "Back to {}", Route::Home)?;
        }
        View::RouteNotFound { path } => {
            writeln!(out, "No page at '{path}'.")?;
            writeln!(out, "Back to {}", Route::Home)?;
        }
    }
    Ok(())
}

fn render_paper(
    out: &mut impl fmt::Write,
    paper: &Paper,
    artist: Option<&Artist>,
    genres: &[&Genre],
) -> fmt::Result {
    writeln!(out, "authors: {}", paper.display_authors())?;
    writeln!(out, "year:    {}", paper.display_year())?;
    if let Some(venue) = paper.venue.as_deref() {
        writeln!(out, "venue:   {venue}")?;
    }
    if let Some(artist) = artist {
        writeln!(out, "artist:  {}", artist.display_name())?;
    }
    if !genres.is_empty() {
        let names: Vec<&str> = genres.iter().map(|genre| genre.display_name()).collect();
        writeln!(out, "genres:  {}", names.join(", "))?;
    }
    for (label, link) in [("pdf", &paper.pdf_url), ("code", &paper.code_url)] {
        if let Some(link) = link.as_deref() {
            writeln!(out, "{label}:{:width$}{link}", "", width = 8 - label.len())?;
        }
    }
    writeln!(out)?;
    paragraph(out, paper.abstract_text.as_deref())?;
    if !paper.takeaways.is_empty() {
        writeln!(out, "Key Takeaways")?;
        for takeaway in &paper.takeaways {
            writeln!(out, "  * {takeaway}")?;
        }
    }
    Ok(())
}

fn render_search(out: &mut impl fmt::Write, query: &str, results: &SearchResults<'_>) -> fmt::Result {
    if query.is_empty() {
        writeln!(out, "Enter a search term.")?;
        return Ok(());
    }
    if results.is_empty() {
        writeln!(out, "No results for '{query}'.")?;
        return Ok(());
    }
    writeln!(out, "{} results", results.total())?;
    writeln!(out)?;
    section(out, "Papers", results.papers.iter().copied(), paper_line)?;
    section(out, "Albums", results.albums.iter().copied(), album_line)?;
    section(out, "Playlists", results.playlists.iter().copied(), playlist_line)?;
    section(out, "Artists", results.artists.iter().copied(), artist_line)?;
    section(out, "Genres", results.genres.iter().copied(), genre_line)?;
    Ok(())
}

// Empty sections are skipped entirely.
fn section<'a, T: 'a, W: fmt::Write>(
    out: &mut W,
    heading: &str,
    records: impl ExactSizeIterator<Item = &'a T>,
    line: fn(&T) -> String,
) -> fmt::Result {
    if records.len() == 0 {
        return Ok(());
    }
    writeln!(out, "{heading} ({})", records.len())?;
    for record in records {
        writeln!(out, "  {}", line(record))?;
    }
    writeln!(out)
}

fn paragraph(out: &mut impl fmt::Write, text: Option<&str>) -> fmt::Result {
    match text.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => {
            writeln!(out, "{text}")?;
            writeln!(out)
        }
        None => Ok(()),
    }
}

fn paper_line(paper: &Paper) -> String {
    format!(
        "{} ({}, {})  {}",
        paper.display_title(),
        paper.display_authors(),
        paper.display_year(),
        Route::Paper(paper.id.to_string())
    )
}

fn album_line(album: &Album) -> String {
    format!(
        "{}  {}",
        album.display_title(),
        Route::Album(album.id.to_string())
    )
}

fn playlist_line(playlist: &Playlist) -> String {
    format!(
        "{}  {}",
        playlist.display_title(),
        Route::Playlist(playlist.id.to_string())
    )
}

fn artist_line(artist: &Artist) -> String {
    format!(
        "[{}] {}  {}",
        artist.initial(),
        artist.display_name(),
        Route::Artist(artist.id.to_string())
    )
}

fn genre_line(genre: &Genre) -> String {
    format!(
        "{}  {}",
        genre.display_name(),
        Route::Genre(genre.id.to_string())
    )
}
