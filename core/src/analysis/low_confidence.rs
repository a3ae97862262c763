use crate::prelude::{DEFAULT_QUERY_SUBJECT, LOW_CONFIDENCE_THRESHOLD};
use crate::scan::SpotDetection;
use serde::{Deserialize, Serialize};

/// A spot that needs visual corroboration and the image query issued for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowConfidenceQuery {
    pub spot: SpotDetection,
    pub query: String,
}

impl LowConfidenceQuery {
    pub fn for_spot(spot: SpotDetection) -> Self {
        let query = format!(
            "parking lot {}",
            spot.class.as_deref().unwrap_or(DEFAULT_QUERY_SUBJECT)
        );
        Self { spot, query }
    }
}

/// Picks out detections whose confidence is below a threshold.
#[derive(Debug, Clone, Copy)]
pub struct LowConfidenceSelector {
    threshold: f64,
}

impl LowConfidenceSelector {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Qualifying spots in input order. Spots without a confidence never qualify.
    pub fn select(&self, detections: &[SpotDetection]) -> Vec<LowConfidenceQuery> {
        detections
            .iter()
            .filter(|spot| spot.is_below(self.threshold))
            .cloned()
            .map(LowConfidenceQuery::for_spot)
            .collect()
    }
}

impl Default for LowConfidenceSelector {
    fn default() -> Self {
        Self::new(LOW_CONFIDENCE_THRESHOLD)
    }
}
