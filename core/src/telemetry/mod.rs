pub mod log;

pub use self::log::{AuditLog, FEEDBACK_ACK};
