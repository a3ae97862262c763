use crate::curation::FeedbackItem;
use log::info;

pub const FEEDBACK_ACK: &str = "Feedback received";

/// Audit trail for operator actions that do not change the core's state.
pub struct AuditLog;

impl AuditLog {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }

    /// Relays curation verdicts to the audit log and acknowledges them.
    pub fn record_feedback(&self, items: &[FeedbackItem]) -> &'static str {
        for item in items {
            self.record(&format!(
                "Image: {} - Decision: {}",
                item.image_url, item.decision
            ));
        }
        FEEDBACK_ACK
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}
