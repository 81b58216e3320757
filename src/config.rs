//! Configuration management for Hostwatch
//!
//! This module defines the main `Config` struct and its sub-structs,
//! responsible for holding all application settings. It uses the `figment`
//! crate to layer a TOML file, `HOSTWATCH_`-prefixed environment variables,
//! and command-line arguments over built-in defaults. The result is an
//! immutable snapshot read once at startup and passed explicitly into each
//! component.

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Which resource collectors are enabled.
    pub monitoring: MonitoringConfig,
    /// SMTP delivery settings for alert mail.
    pub email: EmailConfig,
    /// Threshold settings for the criticality evaluation.
    pub measurement: MeasurementConfig,
    /// Log file destination and verbosity.
    pub logging: LoggingConfig,
    /// Public IP lookup settings.
    pub network: NetworkConfig,
    /// Cycle timing.
    pub scheduler: SchedulerConfig,
}

/// Per-collector enable flags. A disabled collector contributes zero
/// records and never runs its external command.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MonitoringConfig {
    pub memory: bool,
    pub disk: bool,
    pub swap: bool,
}

/// SMTP delivery settings for alert mail.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmailConfig {
    /// Sender address.
    pub from: String,
    /// Recipient addresses; rendered as a comma-joined `To` header.
    pub to: Vec<String>,
    /// Subject line used for every alert.
    pub subject: String,
    /// SMTP host to submit to.
    pub host: String,
    /// SMTP port (plaintext submission).
    pub port: u16,
}

/// Threshold settings for the criticality evaluation.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MeasurementConfig {
    /// A record is critical when its usage percentage is >= this value (0-100).
    pub percent_threshold: u8,
}

/// Log file destination and verbosity.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Log verbosity, as a tracing filter directive (e.g. "debug", "info").
    pub debug_level: String,
    /// Log file name within `log_dir`.
    pub log_name: String,
    /// Directory holding the log file.
    pub log_dir: String,
}

/// Public IP lookup settings.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NetworkConfig {
    /// HTTP endpoint returning the caller's public IP as plain text.
    pub ip_lookup_url: String,
}

/// Cycle timing.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SchedulerConfig {
    /// Pause between monitoring cycles, in seconds.
    pub interval_seconds: u64,
}

impl Config {
    /// Loads the application configuration by layering sources: built-in
    /// defaults, the TOML file named by the CLI (or `hostwatch.toml`),
    /// environment variables, and finally the CLI arguments themselves.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = cli
            .config
            .as_deref()
            .unwrap_or_else(|| std::path::Path::new("hostwatch.toml"));
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            // Allow overriding with environment variables, e.g.
            // HOSTWATCH_SCHEDULER='{interval_seconds=60}'
            .merge(Env::prefixed("HOSTWATCH_"))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }
}

// Provide a default implementation for tests and easy setup.
impl Default for Config {
    fn default() -> Self {
        Self {
            monitoring: MonitoringConfig {
                memory: true,
                disk: true,
                swap: true,
            },
            email: EmailConfig {
                from: "hostwatch@localhost".to_string(),
                to: vec!["root@localhost".to_string()],
                subject: "Resource usage alert".to_string(),
                host: "localhost".to_string(),
                port: 25,
            },
            measurement: MeasurementConfig {
                percent_threshold: 90,
            },
            logging: LoggingConfig {
                debug_level: "info".to_string(),
                log_name: "hostwatch.log".to_string(),
                log_dir: "/var/log".to_string(),
            },
            network: NetworkConfig {
                ip_lookup_url: "https://ifconfig.me".to_string(),
            },
            scheduler: SchedulerConfig {
                interval_seconds: 600,
            },
        }
    }
}
