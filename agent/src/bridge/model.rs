use parkcore::analysis::Occupancy;
use parkcore::curation::{CuratedSpot, FeedbackItem};
use parkcore::SpotDetection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default, rename = "detectedSpots")]
    pub detected_spots: Vec<SpotDetection>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeResponse {
    pub summary: String,
    pub percent_occupied: f64,
    pub num_available: usize,
    pub num_occupied: usize,
    #[serde(rename = "curated_images")]
    pub curated_images: Vec<CuratedSpot>,
}

impl SummarizeResponse {
    pub fn new(occupancy: Occupancy, curated_images: Vec<CuratedSpot>) -> Self {
        Self {
            summary: occupancy.summary,
            percent_occupied: occupancy.percent_occupied,
            num_available: occupancy.num_available,
            num_occupied: occupancy.num_occupied,
            curated_images,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub feedback: Vec<FeedbackItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogScanRequest {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub predictions: Vec<SpotDetection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReply {
    pub status: String,
}

impl StatusReply {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}
