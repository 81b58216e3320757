//! The monitoring cycle driver.
//!
//! One cycle is collect -> evaluate -> notify, followed by a fixed sleep.
//! Cycles run strictly one at a time; collectors run in sequence within a
//! cycle. Failures are contained at two levels: a failing collector
//! contributes zero records while the others still run, and any fault
//! escaping a cycle is logged and the loop continues with the next cycle.

use crate::core::{Collector, UsageRecord};
use crate::evaluation::critical_records;
use crate::notification::AlertNotifier;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// What one cycle produced, for logging and tests.
#[derive(Debug)]
pub struct CycleSummary {
    pub records: Vec<UsageRecord>,
    pub critical: usize,
    pub alerts_sent: usize,
}

/// Drives the collect/evaluate/notify loop.
pub struct Monitor {
    collectors: Vec<Arc<dyn Collector>>,
    notifier: AlertNotifier,
    interval: Duration,
    max_cycles: Option<u64>,
}

impl Monitor {
    pub fn new(
        collectors: Vec<Arc<dyn Collector>>,
        notifier: AlertNotifier,
        interval: Duration,
        max_cycles: Option<u64>,
    ) -> Self {
        Self {
            collectors,
            notifier,
            interval,
            max_cycles,
        }
    }

    /// Runs cycles until the shutdown signal fires or the optional cycle
    /// limit is reached. The first cycle starts immediately; after each
    /// cycle the full interval elapses before the next one, regardless of
    /// how long the cycle itself took.
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) {
        let mut cycles = 0u64;

        loop {
            info!("starting monitoring cycle");
            match self.run_cycle().await {
                Ok(summary) => {
                    info!(
                        records = summary.records.len(),
                        critical = summary.critical,
                        alerts_sent = summary.alerts_sent,
                        "cycle finished"
                    );
                }
                // The loop must never die to a runtime fault; log and
                // carry on with the next cycle.
                Err(e) => error!(error = %e, "cycle failed"),
            }

            cycles += 1;
            if let Some(max) = self.max_cycles {
                if cycles >= max {
                    info!(cycles, "cycle limit reached, exiting");
                    break;
                }
            }

            tokio::select! {
                biased;
                _ = shutdown_rx.changed() => {
                    info!("monitor received shutdown signal, exiting");
                    break;
                }
                _ = sleep(self.interval) => {}
            }
        }
    }

    /// Runs one full collect -> evaluate -> notify pass.
    pub async fn run_cycle(&self) -> Result<CycleSummary> {
        let records = self.collect_all().await;
        let criticals = critical_records(&records);
        debug!(
            records = records.len(),
            critical = criticals.len(),
            "evaluation finished"
        );
        let alerts_sent = self.notifier.notify_all(&criticals).await;
        Ok(CycleSummary {
            critical: criticals.len(),
            alerts_sent,
            records,
        })
    }

    /// Runs every collector in sequence and returns the cycle's freshly
    /// built record collection. A collector failure is contained here: it
    /// contributes zero records and the remaining collectors still run.
    pub async fn collect_all(&self) -> Vec<UsageRecord> {
        let mut records = Vec::new();
        for collector in &self.collectors {
            match collector.collect().await {
                Ok(mut collected) => {
                    debug!(
                        collector = collector.name(),
                        records = collected.len(),
                        "collector finished"
                    );
                    records.append(&mut collected);
                }
                Err(e) => {
                    warn!(
                        collector = collector.name(),
                        error = %e,
                        "collector failed, continuing with the others"
                    );
                }
            }
        }
        records
    }
}
