//! Rendering of alert messages for critical records.

use crate::core::UsageRecord;
use crate::network::HostIdentity;

/// A trait for rendering one critical record into a plain-text message.
pub trait TextFormatter: Send + Sync {
    fn format(&self, record: &UsageRecord, identity: &HostIdentity) -> String;
}

/// The fixed mail-body template: category, host identity, sizes, percentage
/// and the record's extra text verbatim.
pub struct MailTextFormatter;

impl TextFormatter for MailTextFormatter {
    fn format(&self, record: &UsageRecord, identity: &HostIdentity) -> String {
        let extra = record.extra.as_deref().unwrap_or("");
        format!(
            "Hello,\n\n\
             It appears that the {category} usage on {hostname} ({ip}) is critical!\n\
             \x20   Total Size: {total}\n\
             \x20   Available Size: {available}\n\
             \x20   Used size: {used}\n\
             \x20   Usage in Percentage: {percentage}\n\
             \x20   Additional info:\n\
             \x20   {extra}\n\n\
             Please resolve immediately!\n\
             Cheers,\n\
             Hostwatch\n",
            category = record.category,
            hostname = identity.hostname,
            ip = identity.public_ip,
            total = record.total,
            available = record.available,
            used = record.used,
            percentage = record.percentage_used,
        )
    }
}
