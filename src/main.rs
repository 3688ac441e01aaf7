//! CLI entry point for the CONALITEG book downloader.

use std::io::{self, BufRead, IsTerminal, Write};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::Parser;
use conaliteg_core::http::build_http_client_with_timeout;
use conaliteg_core::{Assembler, CatalogEndpoints, MetadataClient, Orientation, classify};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    // Resolve the book URL: positional arg > piped stdin > interactive prompt
    let url = match args.url {
        Some(url) => url,
        None => read_url_from_stdin()?,
    };
    let url = url.trim().to_string();
    if url.is_empty() {
        bail!("no book URL provided");
    }

    // Orientation is settled before any network activity begins.
    let orientation = match args.orientation {
        Some(orientation) => orientation,
        None if io::stdin().is_terminal() => prompt_orientation()?,
        None => Orientation::Portrait,
    };

    let book_type = classify(&url).context("classifying book URL")?;
    info!(%book_type, url, "book URL classified");

    // One connection pool for the metadata scrape and the page downloads.
    let client =
        build_http_client_with_timeout(args.timeout).context("building HTTP client")?;
    let endpoints = CatalogEndpoints::new();

    let metadata = MetadataClient::from_parts(client.clone(), endpoints.clone())
        .extract(&url, book_type)
        .await
        .context("extracting book metadata")?;

    let output_path = Assembler::from_parts(client, endpoints)
        .with_progress(!args.quiet)
        .assemble(&metadata, orientation, &args.output_dir)
        .await
        .context("assembling book PDF")?;

    info!(path = %output_path.display(), "book downloaded");
    println!("{}", output_path.display());

    Ok(())
}

/// Reads the book URL from stdin: the first line of piped input, or an
/// interactive prompt on a terminal.
fn read_url_from_stdin() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        print!("Book URL (https://libros.conaliteg.gob.mx/YEAR/CODE.htm or https://historico.conaliteg.gob.mx/CODE.htm): ");
        io::stdout().flush().context("flushing prompt")?;
    }
    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("reading book URL")?;
    Ok(line)
}

/// Asks for the page orientation; ENTER keeps the vertical default.
fn prompt_orientation() -> Result<Orientation> {
    print!("Orientation [v/h] (default v): ");
    io::stdout().flush().context("flushing prompt")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading orientation")?;

    let choice = line.trim();
    if choice.is_empty() {
        return Ok(Orientation::Portrait);
    }
    Orientation::from_str(choice).map_err(|reason| anyhow::anyhow!(reason))
}
