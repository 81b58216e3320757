//! Disk usage collection via `df`.

use super::{expect_fields, parse_field};
use crate::core::{Collector, CommandRunner, ResourceCategory, UsageRecord};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// One row per mounted filesystem. The percent sign is stripped in the
/// pipeline so the pcent column arrives as a bare number.
const DISK_COMMAND: &str =
    "df -h --output=source,size,used,avail,pcent | awk 'NR > 1 {print}' | tr -d '%'";

/// Samples per-filesystem disk usage, one record per mount.
///
/// Temporary and loop-backed mounts are excluded. The criticality flag
/// comes from the tool-reported percent-used column rather than being
/// recomputed: `df` accounts for reserved blocks, so its percentage is the
/// authoritative one. Row order from the tool is preserved.
pub struct DiskCollector {
    runner: Arc<dyn CommandRunner>,
    threshold: u8,
}

impl DiskCollector {
    pub fn new(runner: Arc<dyn CommandRunner>, threshold: u8) -> Self {
        Self { runner, threshold }
    }
}

fn is_excluded(source: &str) -> bool {
    source.contains("tmp") || source.contains("loop")
}

#[async_trait]
impl Collector for DiskCollector {
    fn name(&self) -> &'static str {
        "disk"
    }

    async fn collect(&self) -> Result<Vec<UsageRecord>> {
        let rows = self
            .runner
            .run(DISK_COMMAND, None)
            .await
            .context("disk command failed")?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            expect_fields(row, 5).context("unexpected `df` output")?;
            let source = &row[0];
            if is_excluded(source) {
                continue;
            }
            let total = parse_field(&row[1])?;
            let used = parse_field(&row[2])?;
            let available = parse_field(&row[3])?;
            let percentage = parse_field(&row[4])? as u8;
            records.push(UsageRecord {
                category: ResourceCategory::Disk,
                label: source.clone(),
                total,
                used,
                available,
                percentage_used: percentage,
                is_critical: percentage >= self.threshold,
                extra: Some(format!("partition: {source}")),
            });
        }
        debug!(records = records.len(), "disk collection finished");
        Ok(records)
    }
}
