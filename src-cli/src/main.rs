//! Tubetally - total watch time of a YouTube playlist.
//!
//! Thin front-end over `tubetally-core`: parses arguments, loads the
//! catalog configuration, runs one calculation and prints the result.

mod cli;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tubetally_core::PlaylistCalculator;

use cli::Cli;
use error::{CliError, render_error};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match logging::init(&cli.logging_config()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: {}", CliError::from(e));
            None
        }
    };

    match run(&cli).await {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let rendered = render_error(&e, cli.json);
            if cli.json {
                println!("{rendered}");
            } else {
                eprintln!("{rendered}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<String, CliError> {
    info!(playlist = %cli.playlist, "Starting Tubetally");

    let (from, to) = cli.range_bounds()?;
    let config = cli.catalog_config()?;
    debug!(
        base_url = %config.normalized_base_url(),
        concurrency = config.max_concurrent_batches,
        "Catalog configuration"
    );

    let calculator = PlaylistCalculator::from_config(&config)?;
    let result = calculator.fetch_playlist_data(&cli.playlist, from, to).await?;

    let style = cli.duration_style();
    if cli.json {
        Ok(output::render_json(&result, style)?)
    } else {
        Ok(output::render_text(&result, style))
    }
}
