//! Host identity resolution: local hostname and public IP.

use crate::config::NetworkConfig;
use anyhow::{Context, Result};
use std::time::Duration;
use sysinfo::System;
use tracing::info;

const IP_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// The identity reported in every alert message.
#[derive(Debug, Clone)]
pub struct HostIdentity {
    pub hostname: String,
    pub public_ip: String,
}

impl HostIdentity {
    /// Resolves the local hostname and queries the configured lookup
    /// service for the public IP.
    ///
    /// Failure here is fatal at startup: an alert that cannot say which
    /// host it is about is useless, and there is no sensible fallback
    /// value for the public address.
    pub async fn detect(config: &NetworkConfig) -> Result<Self> {
        let hostname =
            System::host_name().context("could not determine the local hostname")?;

        let client = reqwest::Client::builder()
            .timeout(IP_LOOKUP_TIMEOUT)
            .build()?;
        let public_ip = client
            .get(&config.ip_lookup_url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .with_context(|| {
                format!("public IP lookup via {} failed", config.ip_lookup_url)
            })?
            .text()
            .await
            .context("public IP lookup returned an unreadable body")?
            .trim()
            .to_string();

        info!(hostname, public_ip, "host identity resolved");
        Ok(Self {
            hostname,
            public_ip,
        })
    }
}
