//! Command line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tubetally_core::{CatalogConfig, DurationStyle, Result, parse_position};

use crate::logging::LoggingConfig;

/// Compute the total watch time of a YouTube playlist.
#[derive(Debug, Parser)]
#[command(name = "tubetally", version, about, long_about = None)]
pub struct Cli {
    /// Playlist URL or 34-character playlist ID.
    pub playlist: String,

    /// First video number to include (1-based).
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub from: Option<String>,

    /// Last video number to include (inclusive).
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub to: Option<String>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// API key, overriding the config file and environment.
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Config file to read instead of the default location.
    #[arg(long, value_name = "PATH", env = "TUBETALLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Break long durations into days.
    #[arg(long)]
    pub days: bool,

    /// Number of metadata requests allowed in flight.
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Also write JSON logs to this directory.
    #[arg(long, value_name = "PATH")]
    pub log_dir: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug with a log file).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parsed range bounds. Blank values count as absent.
    pub fn range_bounds(&self) -> Result<(Option<u32>, Option<u32>)> {
        let from = self.from.as_deref().map(parse_position).transpose()?.flatten();
        let to = self.to.as_deref().map(parse_position).transpose()?.flatten();
        Ok((from, to))
    }

    /// Logging setup for the verbosity and log directory flags.
    pub fn logging_config(&self) -> LoggingConfig {
        let config = LoggingConfig::from_verbosity(self.verbose);
        match &self.log_dir {
            Some(dir) => config
                .with_log_directory(dir.clone())
                .with_file_logging(true),
            None => config,
        }
    }

    /// Duration layout selected by `--days`.
    pub const fn duration_style(&self) -> DurationStyle {
        if self.days {
            DurationStyle::Days
        } else {
            DurationStyle::Hours
        }
    }

    /// Catalog configuration with command line overrides applied.
    pub fn catalog_config(&self) -> Result<CatalogConfig> {
        let mut config = match &self.config {
            Some(path) => CatalogConfig::load_from(path)?.with_env_overrides(),
            None => CatalogConfig::load()?,
        };

        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            config.api_key = key.to_string();
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrent_batches = concurrency;
        }
        Ok(config)
    }
}
