use std::path::Path;

use crate::cli::{open_catalog, OutputFormat};

pub fn run_categories(root: &Path, extension: &str, format: OutputFormat) -> anyhow::Result<()> {
    let categories = open_catalog(root, extension)?.categories();
    render("categories", &categories, format);
    Ok(())
}

pub fn run_composers(root: &Path, extension: &str, format: OutputFormat) -> anyhow::Result<()> {
    let composers = open_catalog(root, extension)?.composers();
    render("composers", &composers, format);
    Ok(())
}

fn render(label: &str, values: &[String], format: OutputFormat) {
    match format {
        OutputFormat::Text | OutputFormat::Tsv => {
            for value in values {
                println!("{value}");
            }
        }
        OutputFormat::Json => {
            let mut output = serde_json::Map::new();
            output.insert("count".to_string(), values.len().into());
            output.insert(
                label.to_string(),
                serde_json::to_value(values).unwrap_or_default(),
            );
            let output = serde_json::Value::Object(output);
            println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        }
    }
}
