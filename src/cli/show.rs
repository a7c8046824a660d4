use std::path::Path;

use crate::cli::{open_catalog, OutputFormat};
use crate::core::score::ScoreRecord;

#[derive(clap::Args)]
pub struct ShowArgs {
    /// Catalog path of the score (e.g. "ensemble/star-wars.gen")
    #[arg(required = true)]
    pub path: String,

    /// Print only the raw notation body
    #[arg(long)]
    pub notation: bool,
}

pub fn run(args: ShowArgs, root: &Path, extension: &str, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = open_catalog(root, extension)?;

    let Some(score) = catalog.get(&args.path) else {
        anyhow::bail!("no score found at path '{}'", args.path);
    };

    if args.notation {
        println!("{}", score.notation);
        return Ok(());
    }

    match format {
        OutputFormat::Text => print_text(score),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&detail(score)).unwrap_or_default()
            );
        }
        OutputFormat::Tsv => {
            println!("path\ttitle\tcomposer\ttimeSignature\ttempo\tkeySignature");
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

    Ok(())
}

fn print_text(score: &ScoreRecord) {
    println!("Path:      {}", score.path);
    println!("Category:  {}", score.full_category);
    if let Some(title) = score.title() {
        println!("Title:     {title}");
    }
    if let Some(composer) = score.composer() {
        println!("Composer:  {composer}");
    }
    if let Some(time_signature) = score.time_signature() {
        println!("Time:      {time_signature}");
    }
    if let Some(tempo) = score.tempo() {
        println!("Tempo:     {tempo}");
    }
    if let Some(key_signature) = score.key_signature() {
        println!("Key:       {key_signature}");
    }

    let known = [
        "title",
        "composer",
        "timeSignature",
        "tempo",
        "keySignature",
    ];
    let extra: Vec<_> = score
        .metadata
        .iter()
        .filter(|(key, _)| !known.contains(&key.as_str()))
        .collect();
    if !extra.is_empty() {
        println!("\nOther metadata:");
        for (key, value) in extra {
            println!("  {key}: {value}");
        }
    }

    println!("\n{}", score.notation);
}

fn detail(score: &ScoreRecord) -> serde_json::Value {
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
        "metadata": score.metadata,
        "notation": score.notation,
    })
}
