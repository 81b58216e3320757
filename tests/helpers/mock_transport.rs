//! A recording mail transport for notification tests.

use anyhow::{bail, Result};
use async_trait::async_trait;
use hostwatch::core::AlertTransport;
use std::sync::Mutex;

/// Records every message body handed to it. Individual sends can be
/// scripted to fail by zero-based index, to exercise failure independence.
#[derive(Default)]
pub struct MockTransport {
    sent: Mutex<Vec<String>>,
    fail_on: Mutex<Vec<usize>>,
    attempts: Mutex<usize>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the `index`-th send attempt (zero-based) to fail.
    pub fn fail_on(&self, index: usize) {
        self.fail_on.lock().unwrap().push(index);
    }

    /// The successfully "delivered" message bodies, in send order.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    /// Total send attempts, including scripted failures.
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl AlertTransport for MockTransport {
    async fn send(&self, body: &str) -> Result<()> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            let current = *attempts;
            *attempts += 1;
            current
        };

        if self.fail_on.lock().unwrap().contains(&attempt) {
            bail!("scripted transport failure on attempt {attempt}");
        }

        self.sent.lock().unwrap().push(body.to_string());
        Ok(())
    }
}
