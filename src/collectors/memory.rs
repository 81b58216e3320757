//! Memory usage collection via `free`.

use super::{expect_fields, parse_field};
use crate::core::{percentage_used, Collector, CommandRunner, ResourceCategory, UsageRecord};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// The second `free -m` line holds the system-wide totals; total, used and
/// available are columns 2, 3 and 4, all in MB.
const MEMORY_COMMAND: &str = "free -m | awk 'NR == 2 {print $2,$3,$4}'";

/// Samples system-wide memory usage and emits a single record.
pub struct MemoryCollector {
    runner: Arc<dyn CommandRunner>,
    threshold: u8,
}

impl MemoryCollector {
    pub fn new(runner: Arc<dyn CommandRunner>, threshold: u8) -> Self {
        Self { runner, threshold }
    }
}

#[async_trait]
impl Collector for MemoryCollector {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn collect(&self) -> Result<Vec<UsageRecord>> {
        let rows = self
            .runner
            .run(MEMORY_COMMAND, None)
            .await
            .context("memory command failed")?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            expect_fields(row, 3).context("unexpected `free` output")?;
            let total = parse_field(&row[0])?;
            let used = parse_field(&row[1])?;
            let available = parse_field(&row[2])?;
            let percentage = percentage_used(used, total);
            records.push(UsageRecord {
                category: ResourceCategory::Memory,
                label: String::new(),
                total,
                used,
                available,
                percentage_used: percentage,
                is_critical: percentage >= self.threshold,
                extra: None,
            });
        }
        debug!(records = records.len(), "memory collection finished");
        Ok(records)
    }
}
