use crate::scan::SpotDetection;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One logged scan. Only the scan log creates records, and they are never
/// modified after being stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    timestamp: DateTime<Utc>,
    user: String,
    filename: String,
    predictions: Vec<SpotDetection>,
}

impl ScanRecord {
    pub(crate) fn new(
        timestamp: DateTime<Utc>,
        user: String,
        filename: String,
        predictions: Vec<SpotDetection>,
    ) -> Self {
        Self {
            timestamp,
            user,
            filename,
            predictions,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// UTC calendar date the scan was logged on.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn predictions(&self) -> &[SpotDetection] {
        &self.predictions
    }
}
