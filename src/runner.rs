//! Shell command execution and output tokenization.
//!
//! The collectors drive external reporting tools (`free`, `df`, `swapon`)
//! whose invocations are shell pipelines, so commands run through `sh -c`.
//! Captured stdout is reshaped into rows of whitespace-split fields, the
//! same shape `awk`'s default field splitting produces.

use crate::core::CommandRunner;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Runs command lines through `sh -c` and captures their stdout.
///
/// A non-zero exit status is deliberately not an error: `grep` in a
/// pipeline exits 1 when it filters everything out, and an empty listing
/// must simply yield zero rows. Only failure to spawn or capture is fatal
/// to the caller's step. Stderr is discarded.
pub struct ShellRunner;

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command_line: &str, delimiter: Option<char>) -> Result<Vec<Vec<String>>> {
        debug!(command = command_line, "running external command");
        let output = Command::new("sh")
            .arg("-c")
            .arg(command_line)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .with_context(|| format!("failed to run command: {command_line}"))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(tokenize(&stdout, delimiter.unwrap_or('\n')))
    }
}

/// Splits captured output on `delimiter` into rows, drops empty rows, and
/// splits each row on whitespace into fields.
pub fn tokenize(output: &str, delimiter: char) -> Vec<Vec<String>> {
    output
        .split(delimiter)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect()
}
