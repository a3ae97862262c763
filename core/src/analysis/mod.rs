pub mod daily_stats;
pub mod low_confidence;
pub mod occupancy;

pub use daily_stats::{DailyStats, DailyStatsAggregator, ScanBreakdown};
pub use low_confidence::{LowConfidenceQuery, LowConfidenceSelector};
pub use occupancy::{Occupancy, OccupancyClassifier, OccupancyTier};
