//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use conaliteg_core::Orientation;
use conaliteg_core::http::READ_TIMEOUT_SECS;

/// Download a CONALITEG book as a single PDF.
///
/// Pass the book's reader URL as seen in the browser. Both catalog families
/// are recognized:
///
///   https://libros.conaliteg.gob.mx/YEAR/CODE.htm
///   https://historico.conaliteg.gob.mx/CODE.htm
#[derive(Parser, Debug)]
#[command(name = "conaliteg-dl")]
#[command(author, version, about)]
pub struct Args {
    /// Book reader URL; prompted for interactively (or read from stdin)
    /// when omitted
    pub url: Option<String>,

    /// Page orientation: v (vertical/portrait) or h (horizontal/landscape)
    #[arg(short, long, value_parser = parse_orientation)]
    pub orientation: Option<Orientation>,

    /// Directory the PDF is written to
    #[arg(short = 'd', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Read timeout per request in seconds (1-600)
    #[arg(long, default_value_t = READ_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=600))]
    pub timeout: u64,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Orientation values mirror the original tool's prompt: `v` or `h` only.
/// Rejection happens at argument parsing, before any network activity.
fn parse_orientation(value: &str) -> Result<Orientation, String> {
    Orientation::from_str(value)
}
