//! Application assembly, decoupled from the entry point.
//!
//! The builder wires configuration into concrete components and allows
//! tests to override the command runner, the transport and the host
//! identity with fakes.

use crate::{
    collectors::{DiskCollector, MemoryCollector, SwapCollector},
    config::Config,
    core::{AlertTransport, Collector, CommandRunner},
    formatting::MailTextFormatter,
    monitor::Monitor,
    network::HostIdentity,
    notification::{AlertNotifier, SmtpAlertTransport},
    runner::ShellRunner,
};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Builder for the monitoring application.
///
/// This pattern keeps component construction separate from running the
/// loop, and gives integration tests a clean way to substitute fakes.
pub struct AppBuilder {
    config: Config,
    runner_override: Option<Arc<dyn CommandRunner>>,
    transport_override: Option<Arc<dyn AlertTransport>>,
    identity_override: Option<HostIdentity>,
    max_cycles: Option<u64>,
}

impl AppBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            runner_override: None,
            transport_override: None,
            identity_override: None,
            max_cycles: None,
        }
    }

    /// Overrides the command runner for testing.
    pub fn runner_override(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner_override = Some(runner);
        self
    }

    /// Overrides the mail transport for testing.
    pub fn transport_override(mut self, transport: Arc<dyn AlertTransport>) -> Self {
        self.transport_override = Some(transport);
        self
    }

    /// Supplies an already-resolved host identity, skipping the network
    /// lookup at build time.
    pub fn identity(mut self, identity: HostIdentity) -> Self {
        self.identity_override = Some(identity);
        self
    }

    /// Limits the monitor to a fixed number of cycles (`--once` and tests).
    pub fn max_cycles(mut self, max_cycles: Option<u64>) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    /// Builds the monitor: resolves the host identity if none was supplied,
    /// constructs the enabled collectors in order (memory, disk, swap) and
    /// wires up the notifier.
    pub async fn build(self) -> Result<Monitor> {
        let identity = match self.identity_override {
            Some(identity) => identity,
            None => HostIdentity::detect(&self.config.network).await?,
        };

        let runner: Arc<dyn CommandRunner> =
            self.runner_override.unwrap_or_else(|| Arc::new(ShellRunner));

        let threshold = self.config.measurement.percent_threshold;
        let mut collectors: Vec<Arc<dyn Collector>> = Vec::new();
        if self.config.monitoring.memory {
            collectors.push(Arc::new(MemoryCollector::new(runner.clone(), threshold)));
        }
        if self.config.monitoring.disk {
            collectors.push(Arc::new(DiskCollector::new(runner.clone(), threshold)));
        }
        if self.config.monitoring.swap {
            collectors.push(Arc::new(SwapCollector::new(runner.clone(), threshold)));
        }
        info!(
            collectors = collectors.len(),
            threshold, "collectors assembled"
        );

        let transport: Arc<dyn AlertTransport> = match self.transport_override {
            Some(transport) => transport,
            None => Arc::new(SmtpAlertTransport::new(&self.config.email)?),
        };
        let notifier = AlertNotifier::new(transport, Box::new(MailTextFormatter), identity);

        Ok(Monitor::new(
            collectors,
            notifier,
            Duration::from_secs(self.config.scheduler.interval_seconds),
            self.max_cycles,
        ))
    }
}
