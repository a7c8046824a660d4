use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod core;
mod parsing;
mod web;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("scorebook=debug,info")
    } else {
        EnvFilter::new("scorebook=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::List(args) => {
            cli::list::run(args, &cli.root, &cli.extension, cli.format, cli.verbose)?;
        }
        cli::Commands::Show(args) => {
            cli::show::run(args, &cli.root, &cli.extension, cli.format)?;
        }
        cli::Commands::Search(args) => {
            cli::search::run(args, &cli.root, &cli.extension, cli.format)?;
        }
        cli::Commands::Categories => {
            cli::browse::run_categories(&cli.root, &cli.extension, cli.format)?;
        }
        cli::Commands::Composers => {
            cli::browse::run_composers(&cli.root, &cli.extension, cli.format)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args, cli.root, cli.extension)?;
        }
    }

    Ok(())
}
