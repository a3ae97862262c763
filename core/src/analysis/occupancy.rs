use crate::math::stats::StatsHelper;
use crate::scan::{SpotDetection, SpotStatus};
use serde::{Deserialize, Serialize};

/// Discrete busyness categories, listed in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupancyTier {
    NoData,
    NotBusy,
    ModeratelyBusy,
    Full,
    NearlyFull,
}

impl OccupancyTier {
    /// First matching rule wins.
    pub fn select(total: usize, percent_occupied: f64, num_available: usize) -> Self {
        if total == 0 {
            Self::NoData
        } else if percent_occupied < 50.0 {
            Self::NotBusy
        } else if percent_occupied < 85.0 {
            Self::ModeratelyBusy
        } else if num_available == 0 {
            Self::Full
        } else {
            Self::NearlyFull
        }
    }

    pub fn summary(self, percent_occupied: f64, num_available: usize) -> String {
        match self {
            Self::NoData => "No parking data available yet.".to_string(),
            Self::NotBusy => {
                "Today parking is not that busy. Plenty of slots are open!".to_string()
            }
            Self::ModeratelyBusy => {
                "Parking is moderately busy. Some slots are still open if you arrive soon."
                    .to_string()
            }
            Self::Full => {
                "Parking lot is full. Try again later or choose a different location.".to_string()
            }
            Self::NearlyFull => format!(
                "Parking lot usage: {:.1}%. There are still {} slot(s) open.",
                percent_occupied, num_available
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occupancy {
    pub tier: OccupancyTier,
    pub summary: String,
    pub percent_occupied: f64,
    pub num_available: usize,
    pub num_occupied: usize,
}

/// Stateless mapping from a detection batch to an occupancy tier.
pub struct OccupancyClassifier;

impl OccupancyClassifier {
    pub fn classify(detections: &[SpotDetection]) -> Occupancy {
        let (num_available, num_occupied) =
            detections
                .iter()
                .fold((0, 0), |(available, occupied), spot| match spot.status() {
                    SpotStatus::Empty => (available + 1, occupied),
                    SpotStatus::Occupied => (available, occupied + 1),
                    SpotStatus::Unrecognized => (available, occupied),
                });
        let total = num_available + num_occupied;
        let percent_occupied = StatsHelper::percent(num_occupied, total);
        let tier = OccupancyTier::select(total, percent_occupied, num_available);

        Occupancy {
            tier,
            summary: tier.summary(percent_occupied, num_available),
            percent_occupied,
            num_available,
            num_occupied,
        }
    }
}
