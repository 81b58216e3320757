//! Alert notification: one rendered message and one send per critical record.

pub mod smtp;

pub use smtp::SmtpAlertTransport;

use crate::core::{AlertTransport, UsageRecord};
use crate::formatting::TextFormatter;
use crate::network::HostIdentity;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Renders and dispatches alerts for a cycle's critical records.
///
/// Sends are independent: a transport failure for one record is logged and
/// does not suppress the remaining alerts.
pub struct AlertNotifier {
    transport: Arc<dyn AlertTransport>,
    formatter: Box<dyn TextFormatter>,
    identity: HostIdentity,
}

impl AlertNotifier {
    pub fn new(
        transport: Arc<dyn AlertTransport>,
        formatter: Box<dyn TextFormatter>,
        identity: HostIdentity,
    ) -> Self {
        Self {
            transport,
            formatter,
            identity,
        }
    }

    /// Sends one alert per critical record and returns how many were
    /// accepted by the transport.
    pub async fn notify_all(&self, criticals: &[UsageRecord]) -> usize {
        let mut sent = 0;
        for record in criticals {
            let body = self.formatter.format(record, &self.identity);
            debug!(category = %record.category, label = %record.label, "sending alert");
            match self.transport.send(&body).await {
                Ok(()) => {
                    info!(category = %record.category, label = %record.label, "alert sent");
                    sent += 1;
                }
                Err(e) => {
                    error!(
                        category = %record.category,
                        label = %record.label,
                        error = %e,
                        "failed to send alert"
                    );
                }
            }
        }
        sent
    }
}
