//! Defaults applied at the data-model boundary plus the types most callers need.

pub use crate::scan::{ScanRecord, SpotDetection, SpotStatus};

/// User recorded for scans submitted without an identity.
pub const DEFAULT_USER: &str = "Guest";

/// Confidence assumed for a detection that does not report one.
pub const DEFAULT_CONFIDENCE: f64 = 1.0;

/// Detections strictly below this confidence need visual corroboration.
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Status reported in daily statistics for detections without a class.
pub const MISSING_STATUS: &str = "N/A";

/// Subject used in image queries for detections without a class.
pub const DEFAULT_QUERY_SUBJECT: &str = "car";

/// Number of reference images requested per low-confidence spot.
pub const IMAGES_PER_QUERY: usize = 3;
