//! Command-line interface for scorebook.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **list**: List scores in the catalog, with optional filter criteria
//! - **show**: Show a single score by its catalog path
//! - **search**: Search scores by title or composer substring
//! - **categories** / **composers**: List distinct groupings and composers
//! - **serve**: Start the JSON query API
//!
//! ## Usage
//!
//! ```text
//! # List everything under ./scores
//! scorebook list
//!
//! # Filter by composer and time signature
//! scorebook list --composer bach --time-signature 3/4
//!
//! # Show one score, JSON output for scripting
//! scorebook show ensemble/star-wars.gen --format json
//!
//! # Search titles
//! scorebook search moonlight
//!
//! # Serve the API over a different document root
//! scorebook --root /srv/scores serve --port 8080
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::catalog::service::CatalogService;
use crate::catalog::source::{CatalogError, DirectorySource};
use crate::catalog::store::ScoreCatalog;

pub mod browse;
pub mod list;
pub mod search;
pub mod show;

#[derive(Parser)]
#[command(name = "scorebook")]
#[command(version)]
#[command(about = "Catalog and query plain-text music notation documents")]
#[command(
    long_about = "scorebook discovers notation documents under a document root, parses each one into a notation body plus metadata fields, and answers queries against the resulting catalog.\n\nDocuments end with a metadata block delimited by a pair of `---` lines:\n\n    GABc dedB|dedB dedB|\n    ---\n    title: Minuet in G\n    composer: Johann Sebastian Bach\n    time-signature: 3/4\n    ---\n"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Document root directory
    #[arg(long, global = true, default_value = "scores")]
    pub root: PathBuf,

    /// File extension recognized as a score document
    #[arg(long, global = true, default_value = "gen")]
    pub extension: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List scores in the catalog, optionally filtered
    List(list::ListArgs),

    /// Show a single score by its catalog path
    Show(show::ShowArgs),

    /// Search scores by title or composer substring
    Search(search::SearchArgs),

    /// List distinct categories
    Categories,

    /// List distinct composers
    Composers,

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load the catalog for a one-shot CLI command.
pub(crate) fn open_catalog(root: &Path, extension: &str) -> Result<Arc<ScoreCatalog>, CatalogError> {
    CatalogService::new(DirectorySource::new(root, extension)).catalog()
}

/// Truncate a value for fixed-width table output. Operates on chars so
/// multi-byte names cannot split mid-character.
pub(crate) fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else if width > 3 {
        let head: String = value.chars().take(width - 3).collect();
        format!("{head}...")
    } else {
        value.chars().take(width).collect()
    }
}
