use std::path::Path;

use crate::cli::{open_catalog, truncate, OutputFormat};
use crate::core::filter::ScoreFilter;
use crate::core::score::ScoreRecord;

#[derive(clap::Args)]
pub struct ListArgs {
    /// Case-insensitive substring filter on the title
    #[arg(long)]
    pub title: Option<String>,

    /// Case-insensitive substring filter on the composer
    #[arg(long)]
    pub composer: Option<String>,

    /// Exact grouping, matched against category or full category
    #[arg(long)]
    pub category: Option<String>,

    /// Exact time signature (e.g. "3/4")
    #[arg(long)]
    pub time_signature: Option<String>,

    /// Exact tempo
    #[arg(long)]
    pub tempo: Option<String>,

    /// Exact key signature (e.g. "G")
    #[arg(long)]
    pub key_signature: Option<String>,
}

impl ListArgs {
    fn into_filter(self) -> ScoreFilter {
        ScoreFilter {
            title: self.title,
            composer: self.composer,
            category: self.category,
            time_signature: self.time_signature,
            tempo: self.tempo,
            key_signature: self.key_signature,
        }
    }
}

pub fn run(
    args: ListArgs,
    root: &Path,
    extension: &str,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = open_catalog(root, extension)?;

    if verbose {
        eprintln!("Loaded catalog with {} scores", catalog.len());
    }

    let filter = args.into_filter();
    let scores = catalog.filter(&filter);
    render_scores(&scores, format);

    Ok(())
}

/// Render a list of scores in the requested output format. Shared with
/// the search command.
pub(crate) fn render_scores(scores: &[&ScoreRecord], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            let path_width = scores
                .iter()
                .map(|s| s.path.len())
                .max()
                .unwrap_or(4)
                .max(4);
            let title_width = scores
                .iter()
                .map(|s| s.title().unwrap_or("-").len().min(35))
                .max()
                .unwrap_or(5)
                .max(5);
            let composer_width = scores
                .iter()
                .map(|s| s.composer().unwrap_or("-").len().min(30))
                .max()
                .unwrap_or(8)
                .max(8);

            println!("Score Catalog ({} scores)\n", scores.len());
            println!(
                "{:<path_w$} {:<title_w$} {:<comp_w$} {:>5}",
                "PATH",
                "TITLE",
                "COMPOSER",
                "TIME",
                path_w = path_width,
                title_w = title_width,
                comp_w = composer_width,
            );
            println!("{}", "-".repeat(path_width + title_width + composer_width + 8));

            for score in scores {
                println!(
                    "{:<path_w$} {:<title_w$} {:<comp_w$} {:>5}",
                    score.path,
                    truncate(score.title().unwrap_or("-"), title_width),
                    truncate(score.composer().unwrap_or("-"), composer_width),
                    score.time_signature().unwrap_or("-"),
                    path_w = path_width,
                    title_w = title_width,
                    comp_w = composer_width,
                );
            }
        }
        OutputFormat::Json => {
            let items: Vec<serde_json::Value> = scores.iter().map(|s| summary(s)).collect();
            let output = serde_json::json!({
                "count": items.len(),
                "scores": items,
            });
            println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        }
        OutputFormat::Tsv => {
            println!("path\ttitle\tcomposer\ttimeSignature\ttempo\tkeySignature");
            for score in scores {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    score.path,
                    score.title().unwrap_or(""),
                    score.composer().unwrap_or(""),
                    score.time_signature().unwrap_or(""),
                    score.tempo().unwrap_or(""),
                    score.key_signature().unwrap_or(""),
                );
            }
        }
    }
}

fn summary(score: &ScoreRecord) -> serde_json::Value {
    serde_json::json!({
        "path": score.path,
        "filename": score.filename,
        "category": score.category,
        "fullCategory": score.full_category,
        "title": score.title(),
        "composer": score.composer(),
        "timeSignature": score.time_signature(),
        "tempo": score.tempo(),
        "keySignature": score.key_signature(),
    })
}
