//! SMTP delivery of alert mail via `lettre`.

use crate::config::EmailConfig;
use crate::core::AlertTransport;
use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

/// Submits plain-text alert mail to the configured SMTP host.
///
/// Submission is plaintext on the configured port, matching the relay-style
/// setup the agent targets (a local or trusted-network MTA). Each alert is
/// a single single-part message; the recipients all land in one `To` header.
#[derive(Debug)]
pub struct SmtpAlertTransport {
    config: EmailConfig,
    from: Mailbox,
    recipients: Vec<Mailbox>,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpAlertTransport {
    /// Parses the configured addresses and builds the transport. Address
    /// parse failures surface here, at startup, not at send time.
    pub fn new(config: &EmailConfig) -> Result<Self> {
        let from: Mailbox = config
            .from
            .parse()
            .with_context(|| format!("invalid sender address: {}", config.from))?;
        let recipients = config
            .to
            .iter()
            .map(|addr| {
                addr.parse::<Mailbox>()
                    .with_context(|| format!("invalid recipient address: {addr}"))
            })
            .collect::<Result<Vec<Mailbox>>>()?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.host.as_str())
            .port(config.port)
            .build();

        Ok(Self {
            config: config.clone(),
            from,
            recipients,
            mailer,
        })
    }
}

#[async_trait]
impl AlertTransport for SmtpAlertTransport {
    async fn send(&self, body: &str) -> Result<()> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(self.config.subject.as_str());
        for recipient in &self.recipients {
            builder = builder.to(recipient.clone());
        }
        let message = builder
            .body(body.to_string())
            .context("failed to build alert message")?;

        debug!(
            host = %self.config.host,
            port = self.config.port,
            recipients = self.recipients.len(),
            "submitting alert mail"
        );
        self.mailer
            .send(message)
            .await
            .with_context(|| {
                format!(
                    "SMTP submission to {}:{} failed",
                    self.config.host, self.config.port
                )
            })?;
        info!(recipients = self.recipients.len(), "alert mail accepted");
        Ok(())
    }
}
