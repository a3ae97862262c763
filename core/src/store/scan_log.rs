use crate::prelude::DEFAULT_USER;
use crate::scan::{ScanRecord, SpotDetection};
use crate::store::clock::{Clock, SystemClock};
use chrono::NaiveDate;
use log::debug;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Append-only, process-lifetime log of scans.
///
/// Writers are serialized by the lock and build each record while holding
/// it, so readers only ever see fully appended records. The log is never
/// pruned; growth is bounded only by process uptime.
pub struct ScanLog {
    records: RwLock<Vec<ScanRecord>>,
    clock: Arc<dyn Clock>,
}

impl ScanLog {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            clock,
        }
    }

    /// Stores a scan stamped with the current time and returns the stored copy.
    ///
    /// Timestamps never decrease in arrival order: a clock reading earlier
    /// than the newest record reuses that record's timestamp.
    pub fn append(
        &self,
        user: Option<String>,
        filename: Option<String>,
        predictions: Vec<SpotDetection>,
    ) -> ScanRecord {
        let mut records = self.write();
        let now = self.clock.now();
        let timestamp = records
            .last()
            .map_or(now, |newest| now.max(newest.timestamp()));
        let record = ScanRecord::new(
            timestamp,
            user.unwrap_or_else(|| DEFAULT_USER.to_string()),
            filename.unwrap_or_default(),
            predictions,
        );
        records.push(record.clone());
        debug!(
            "scan logged for {} ({} detections, {} total scans)",
            record.user(),
            record.predictions().len(),
            records.len()
        );
        record
    }

    /// Records logged on the given UTC date, in append order.
    pub fn records_on_date(&self, date: NaiveDate) -> Vec<ScanRecord> {
        self.read()
            .iter()
            .filter(|record| record.date() == date)
            .cloned()
            .collect()
    }

    pub fn all_records(&self) -> Vec<ScanRecord> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Current UTC date according to the log's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // Records are only ever pushed whole, so a writer that panicked cannot
    // have left a partial entry behind.
    fn read(&self) -> RwLockReadGuard<'_, Vec<ScanRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<ScanRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ScanLog {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}
