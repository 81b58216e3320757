//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using
//! the `clap` crate. These arguments are parsed at startup and then merged
//! with the configuration from the TOML file and environment variables.

use clap::Parser;
use figment::{
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// A minimal single-host resource monitor that emails threshold alerts.
#[derive(Parser, Debug, Default, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Criticality threshold as a percentage (0-100).
    #[arg(long, value_name = "PCT")]
    pub threshold: Option<u8>,

    /// Seconds to sleep between monitoring cycles.
    #[arg(long, value_name = "SECONDS")]
    pub interval: Option<u64>,

    /// Run a single collect/evaluate/notify cycle and exit.
    #[arg(long)]
    pub once: bool,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(threshold) = self.threshold {
            dict.insert(
                "measurement.percent_threshold".into(),
                Value::from(threshold),
            );
        }

        if let Some(interval) = self.interval {
            dict.insert("scheduler.interval_seconds".into(), Value::from(interval));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
