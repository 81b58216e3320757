//! Swap usage collection via `swapon`.

use super::{expect_fields, parse_field};
use crate::core::{percentage_used, Collector, CommandRunner, ResourceCategory, UsageRecord};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// One row per active swap device, sizes in bytes. The header row is
/// dropped in the pipeline.
const SWAP_COMMAND: &str =
    "swapon --show --raw --bytes --show=name,size,used | awk 'NR > 1 {print}'";

/// Samples per-device swap usage, one record per swap device.
///
/// `swapon` only reports name, size and used; the available amount and the
/// percentage are derived here. A host with no active swap yields zero
/// records, not an error.
pub struct SwapCollector {
    runner: Arc<dyn CommandRunner>,
    threshold: u8,
}

impl SwapCollector {
    pub fn new(runner: Arc<dyn CommandRunner>, threshold: u8) -> Self {
        Self { runner, threshold }
    }
}

#[async_trait]
impl Collector for SwapCollector {
    fn name(&self) -> &'static str {
        "swap"
    }

    async fn collect(&self) -> Result<Vec<UsageRecord>> {
        let rows = self
            .runner
            .run(SWAP_COMMAND, None)
            .await
            .context("swap command failed")?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            expect_fields(row, 3).context("unexpected `swapon` output")?;
            let name = &row[0];
            let total = parse_field(&row[1])?;
            let used = parse_field(&row[2])?;
            let percentage = percentage_used(used, total);
            records.push(UsageRecord {
                category: ResourceCategory::Swap,
                label: name.clone(),
                total,
                used,
                available: total.saturating_sub(used),
                percentage_used: percentage,
                is_critical: percentage >= self.threshold,
                extra: Some(format!("partition: {name}")),
            });
        }
        debug!(records = records.len(), "swap collection finished");
        Ok(records)
    }
}
