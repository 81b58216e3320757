//! Core domain types and service traits for Hostwatch
//!
//! This module defines the fundamental data structures and trait contracts
//! that govern component interactions throughout the application.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The resource category a collector samples.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCategory {
    Memory,
    Disk,
    Swap,
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceCategory::Memory => write!(f, "memory"),
            ResourceCategory::Disk => write!(f, "disk"),
            ResourceCategory::Swap => write!(f, "swap"),
        }
    }
}

/// One measured resource instance, in the uniform shape every collector
/// emits and the evaluator and notifier consume.
///
/// Records are immutable once built: a collector fully populates a record
/// before appending it to the cycle's collection, and nothing mutates it
/// afterwards. Units are only consistent within a category (MB for memory,
/// the reporting tool's unit for disk, bytes for swap); no cross-category
/// comparison is ever performed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsageRecord {
    /// Which collector produced this record.
    pub category: ResourceCategory,
    /// Device or partition name; empty for the single system-wide memory record.
    pub label: String,
    /// Total capacity in the collector's native unit.
    pub total: u64,
    /// Amount in use.
    pub used: u64,
    /// Amount still free.
    pub available: u64,
    /// Rounded percentage in use. May slightly exceed 100 when `used`
    /// includes overhead not counted in `total`.
    pub percentage_used: u8,
    /// Whether the usage meets or exceeds the configured threshold.
    pub is_critical: bool,
    /// Free-form auxiliary text, rendered verbatim in alert messages
    /// (e.g. "partition: /dev/sda1").
    pub extra: Option<String>,
}

/// Computes the rounded percentage `used` is of `total`.
///
/// A zero `total` yields 0 rather than a division error: the reporting
/// tools never emit a zero-capacity row in practice, and a defined sentinel
/// keeps an odd row from poisoning the whole collector.
pub fn percentage_used(used: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    ((used as f64 / total as f64) * 100.0).round() as u8
}

// =============================================================================
// Service Traits
// =============================================================================

/// Executes an external command line and tokenizes its standard output.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `command_line` through a shell and returns stdout as rows of
    /// whitespace-split fields.
    ///
    /// # Arguments
    /// * `command_line` - The shell command line (pipelines allowed)
    /// * `delimiter` - Row separator in the captured output; `None` means newline
    ///
    /// # Returns
    /// * `Ok(rows)` on successful capture; a non-zero exit status is not an error
    /// * `Err` only when the command cannot be spawned or its output captured
    async fn run(&self, command_line: &str, delimiter: Option<char>) -> Result<Vec<Vec<String>>>;
}

/// Produces usage records for one resource category.
#[async_trait]
pub trait Collector: Send + Sync {
    /// A short, stable name for logging ("memory", "disk", "swap").
    fn name(&self) -> &'static str;

    /// Samples the resource and returns one record per measured instance.
    ///
    /// An empty listing (e.g. no active swap devices) is `Ok(vec![])`,
    /// not an error.
    async fn collect(&self) -> Result<Vec<UsageRecord>>;
}

/// Delivers a rendered alert message to the configured recipients.
#[async_trait]
pub trait AlertTransport: Send + Sync {
    /// Sends one plain-text alert message.
    ///
    /// # Returns
    /// * `Ok(())` if the transport accepted the message
    /// * `Err` on delivery failure (connection refused, rejected sender, etc.)
    async fn send(&self, body: &str) -> Result<()>;
}
