//! Operation surface handed to the transport layer.

use crate::analysis::{
    DailyStats, DailyStatsAggregator, LowConfidenceQuery, LowConfidenceSelector, Occupancy,
    OccupancyClassifier, ScanBreakdown,
};
use crate::curation::FeedbackItem;
use crate::scan::{ScanRecord, SpotDetection};
use crate::store::{Clock, ScanLog, SystemClock};
use crate::telemetry::AuditLog;
use serde::Serialize;
use std::sync::Arc;

/// Occupancy classification plus the image queries the caller should resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingSummary {
    pub occupancy: Occupancy,
    pub low_confidence: Vec<LowConfidenceQuery>,
}

/// A logged scan with its per-scan counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanView {
    #[serde(flatten)]
    pub record: ScanRecord,
    pub breakdown: ScanBreakdown,
}

/// Owns the scan log and exposes the ingest, summarize, stats and feedback
/// operations. Shared between request handlers behind an `Arc`.
pub struct ParkingAgent {
    log: ScanLog,
    selector: LowConfidenceSelector,
    audit: AuditLog,
}

impl ParkingAgent {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            log: ScanLog::new(clock),
            selector: LowConfidenceSelector::default(),
            audit: AuditLog::new(),
        }
    }

    pub fn with_selector(mut self, selector: LowConfidenceSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn ingest(
        &self,
        user: Option<String>,
        filename: Option<String>,
        predictions: Vec<SpotDetection>,
    ) -> ScanRecord {
        self.log.append(user, filename, predictions)
    }

    pub fn summarize(&self, detections: &[SpotDetection]) -> ParkingSummary {
        ParkingSummary {
            occupancy: OccupancyClassifier::classify(detections),
            low_confidence: self.selector.select(detections),
        }
    }

    pub fn daily_stats(&self) -> DailyStats {
        DailyStatsAggregator::compute_today(&self.log)
    }

    pub fn today_scans(&self) -> Vec<ScanView> {
        self.log
            .records_on_date(self.log.today())
            .into_iter()
            .map(|record| ScanView {
                breakdown: DailyStatsAggregator::breakdown(&record),
                record,
            })
            .collect()
    }

    pub fn record_feedback(&self, items: &[FeedbackItem]) -> &'static str {
        self.audit.record_feedback(items)
    }

    pub fn log(&self) -> &ScanLog {
        &self.log
    }
}

impl Default for ParkingAgent {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::OccupancyTier;
    use crate::store::FixedClock;
    use chrono::{TimeZone, Utc};
    use std::thread;

    fn agent() -> ParkingAgent {
        ParkingAgent::new(Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 7, 4, 15, 0, 0).unwrap(),
        )))
    }

    #[test]
    fn ninety_percent_lot_summary_and_queries() {
        let mut detections = vec![SpotDetection::new("occupied", Some(0.3)); 9];
        detections.push(SpotDetection::new("empty", None));

        let summary = agent().summarize(&detections);
        assert_eq!(summary.occupancy.percent_occupied, 90.0);
        assert_eq!(summary.occupancy.num_available, 1);
        assert_eq!(summary.occupancy.tier, OccupancyTier::NearlyFull);
        assert_eq!(
            summary.occupancy.summary,
            "Parking lot usage: 90.0%. There are still 1 slot(s) open."
        );
        assert_eq!(summary.low_confidence.len(), 9);
        assert!(summary
            .low_confidence
            .iter()
            .all(|q| q.query == "parking lot occupied"));
    }

    #[test]
    fn summarize_does_not_touch_the_log() {
        let agent = agent();
        agent.summarize(&[SpotDetection::new("empty", None)]);
        assert!(agent.log().is_empty());
    }

    #[test]
    fn ingest_feeds_daily_stats_and_scan_views() {
        let agent = agent();
        agent.ingest(
            Some("dana".into()),
            Some("lot-a.jpg".into()),
            vec![
                SpotDetection::new("empty", Some(0.75)),
                SpotDetection::new("occupied", Some(0.25)),
            ],
        );

        let stats = agent.daily_stats();
        assert_eq!(stats.scans_today, 1);
        assert_eq!(stats.low_conf, 1);
        assert_eq!(stats.avg_conf, 50);

        let views = agent.today_scans();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].record.user(), "dana");
        assert_eq!(views[0].breakdown.empty, 1);
    }

    #[test]
    fn concurrent_ingest_keeps_every_scan() {
        let agent = Arc::new(agent());
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let agent = agent.clone();
                thread::spawn(move || {
                    agent.ingest(Some(format!("user-{n}")), None, Vec::new());
                    agent.daily_stats()
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().scans_today >= 1);
        }
        assert_eq!(agent.log().all_records().len(), 8);
        assert_eq!(agent.daily_stats().scans_today, 8);
    }

    #[test]
    fn feedback_does_not_change_state() {
        let agent = agent();
        let ack = agent.record_feedback(&[FeedbackItem {
            image_url: "https://images.example/b.jpg".into(),
            decision: "reject".into(),
        }]);
        assert_eq!(ack, "Feedback received");
        assert_eq!(agent.daily_stats(), DailyStats::default());
    }
}
