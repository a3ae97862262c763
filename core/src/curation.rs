//! Packaging of image-search results for low-confidence spots.
//!
//! The search itself is performed by an external service. A failed lookup
//! never fails the summary; the spot is simply reported without images.

use crate::analysis::LowConfidenceQuery;
use crate::scan::SpotDetection;
use log::warn;
use serde::{Deserialize, Serialize};

/// Reasons an image lookup produced no result list.
#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    #[error("image search access key is not configured")]
    MissingKey,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("malformed search response: {0}")]
    Decode(String),
}

/// A low-confidence spot, the query issued for it and the images found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedSpot {
    pub original_spot: SpotDetection,
    pub searched_query: String,
    pub fetched_images: Vec<String>,
}

impl CuratedSpot {
    pub fn from_lookup(
        query: LowConfidenceQuery,
        lookup: Result<Vec<String>, SearchError>,
    ) -> Self {
        let fetched_images = lookup.unwrap_or_else(|err| {
            warn!("image search for '{}' failed: {}", query.query, err);
            Vec::new()
        });
        Self {
            original_spot: query.spot,
            searched_query: query.query,
            fetched_images,
        }
    }
}

/// Reviewer verdict on one curated image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub image_url: String,
    pub decision: String,
}
