use std::path::Path;

use crate::cli::list::render_scores;
use crate::cli::{open_catalog, OutputFormat};

/// Field a search query runs against.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SearchField {
    Title,
    Composer,
}

#[derive(clap::Args)]
pub struct SearchArgs {
    /// Substring to search for (case-insensitive)
    #[arg(required = true)]
    pub query: String,

    /// Field to search
    #[arg(long, value_enum, default_value = "title")]
    pub by: SearchField,
}

pub fn run(
    args: SearchArgs,
    root: &Path,
    extension: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let catalog = open_catalog(root, extension)?;

    let results = match args.by {
        SearchField::Title => catalog.search_by_title(&args.query),
        SearchField::Composer => catalog.search_by_composer(&args.query),
    };

    render_scores(&results, format);
    Ok(())
}
