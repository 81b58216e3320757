//! Hostwatch - a minimal single-host resource monitor.
//!
//! Samples memory, disk and swap usage on a fixed interval and emails one
//! alert per resource whose usage crosses the configured threshold.

use clap::Parser;
use hostwatch::{
    app::AppBuilder, cli::Cli, config::Config, config::LoggingConfig, network::HostIdentity,
};
use std::fs::OpenOptions;
use std::path::Path;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Opens the log file and installs the tracing subscriber writing to it.
///
/// The log file is the only status surface the agent has, so failing to
/// open it is the one startup fault that exits with a dedicated status and
/// operator guidance.
fn init_logging(config: &LoggingConfig) -> WorkerGuard {
    let path = Path::new(&config.log_dir).join(&config.log_name);
    let file = match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Could not open the log file at {}: {e}", path.display());
            eprintln!(
                "Create it with the right ownership, or point logging.log_dir somewhere writable."
            );
            std::process::exit(1);
        }
    };

    let (writer, guard) = tracing_appender::non_blocking(file);
    let filter = EnvFilter::try_new(&config.debug_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = Config::load(&cli).unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(2);
    });

    // Keep the guard alive so buffered log lines are flushed on exit.
    let _log_guard = init_logging(&config.logging);

    info!("Hostwatch starting up...");
    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.logging.debug_level);
    info!("Memory Collector: {}", config.monitoring.memory);
    info!("Disk Collector: {}", config.monitoring.disk);
    info!("Swap Collector: {}", config.monitoring.swap);
    info!("Percent Threshold: {}", config.measurement.percent_threshold);
    info!("Cycle Interval: {}s", config.scheduler.interval_seconds);
    info!("Mail Host: {}:{}", config.email.host, config.email.port);
    info!("Mail Recipients: {}", config.email.to.join(", "));
    info!("IP Lookup: {}", config.network.ip_lookup_url);
    info!("-------------------------------------------------------");

    // Fatal at startup: an alert without a host identity is useless.
    // Exit status 1 stays reserved for the unopenable-log-file case, so
    // startup faults past logging init exit 2 like a bad configuration.
    let identity = match HostIdentity::detect(&config.network).await {
        Ok(identity) => identity,
        Err(e) => {
            error!(error = %e, "failed to resolve the host identity");
            eprintln!("Failed to resolve the host identity: {e:#}");
            std::process::exit(2);
        }
    };

    let monitor = match AppBuilder::new(config)
        .identity(identity)
        .max_cycles(cli.once.then_some(1))
        .build()
        .await
    {
        Ok(monitor) => monitor,
        Err(e) => {
            error!(error = %e, "failed to assemble the monitor");
            eprintln!("Failed to assemble the monitor: {e:#}");
            std::process::exit(2);
        }
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut monitor_task = tokio::spawn(monitor.run(shutdown_rx));

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received, stopping monitor...");
            if shutdown_tx.send(true).is_err() {
                error!("monitor already stopped");
            }
            if let Err(e) = monitor_task.await {
                error!(error = %e, "monitor task panicked");
            }
        }
        result = &mut monitor_task => {
            // Only reachable with --once; the loop runs forever otherwise.
            if let Err(e) = result {
                error!(error = %e, "monitor task panicked");
            }
            info!("monitor finished, exiting");
        }
    }

    info!("Hostwatch shut down.");
}
