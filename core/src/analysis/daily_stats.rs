use crate::math::stats::StatsHelper;
use crate::prelude::{LOW_CONFIDENCE_THRESHOLD, MISSING_STATUS};
use crate::scan::{ScanRecord, SpotDetection, SpotStatus};
use crate::store::ScanLog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Rollup of the scans logged today (UTC).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub scans_today: usize,
    pub low_conf: usize,
    /// Mean confidence as a whole percentage, truncated toward zero.
    pub avg_conf: i64,
    pub top_statuses: Vec<String>,
}

/// Dashboard view of a single scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanBreakdown {
    pub total_spots: usize,
    pub empty: usize,
    pub occupied: usize,
    pub low_conf: usize,
    /// Mean confidence as a whole percentage, rounded.
    pub avg_conf: i64,
    /// Occupied share of recognized spots as a whole percentage, rounded.
    pub occupancy_rate: i64,
}

pub struct DailyStatsAggregator;

impl DailyStatsAggregator {
    /// Reads one snapshot of today's records from the log and aggregates it.
    pub fn compute_today(log: &ScanLog) -> DailyStats {
        Self::compute(&log.records_on_date(log.today()))
    }

    pub fn compute(records: &[ScanRecord]) -> DailyStats {
        let all_preds: Vec<&SpotDetection> = records
            .iter()
            .flat_map(|record| record.predictions())
            .collect();
        let confidences: Vec<f64> = all_preds
            .iter()
            .map(|spot| spot.confidence_or_default())
            .collect();
        let top_statuses: BTreeSet<String> = all_preds
            .iter()
            .map(|spot| spot.class.as_deref().unwrap_or(MISSING_STATUS).to_string())
            .collect();

        DailyStats {
            scans_today: records.len(),
            low_conf: count_low_confidence(all_preds.iter().copied()),
            avg_conf: StatsHelper::mean_percent(&confidences).trunc() as i64,
            top_statuses: top_statuses.into_iter().collect(),
        }
    }

    pub fn breakdown(record: &ScanRecord) -> ScanBreakdown {
        let predictions = record.predictions();
        let confidences: Vec<f64> = predictions
            .iter()
            .map(SpotDetection::confidence_or_default)
            .collect();
        let count_status = |status: SpotStatus| {
            predictions
                .iter()
                .filter(|spot| spot.status() == status)
                .count()
        };

        let empty = count_status(SpotStatus::Empty);
        let occupied = count_status(SpotStatus::Occupied);
        let total_spots = empty + occupied;
        let occupancy_rate = if total_spots > 0 {
            (100.0 * occupied as f64 / total_spots as f64).round() as i64
        } else {
            0
        };

        ScanBreakdown {
            total_spots,
            empty,
            occupied,
            low_conf: count_low_confidence(predictions.iter()),
            avg_conf: StatsHelper::mean_percent(&confidences).round() as i64,
            occupancy_rate,
        }
    }
}

fn count_low_confidence<'a>(spots: impl Iterator<Item = &'a SpotDetection>) -> usize {
    spots
        .filter(|spot| spot.is_below(LOW_CONFIDENCE_THRESHOLD))
        .count()
}
