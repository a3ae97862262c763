use crate::prelude::DEFAULT_CONFIDENCE;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Interpretation of a detection's class label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotStatus {
    Empty,
    Occupied,
    /// Missing or unrecognized label. Excluded from occupancy counts.
    Unrecognized,
}

/// One classified parking-space observation inside a scan.
///
/// Fields other than `class` and `confidence` (bounding boxes, detector ids)
/// are kept verbatim in `extra` so the spot can be echoed back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpotDetection {
    #[serde(
        default,
        deserialize_with = "lenient_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub class: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_confidence",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SpotDetection {
    pub fn new(class: impl Into<String>, confidence: Option<f64>) -> Self {
        Self {
            class: Some(class.into()),
            confidence,
            extra: Map::new(),
        }
    }

    /// A detection with no label at all.
    pub fn unlabeled(confidence: Option<f64>) -> Self {
        Self {
            class: None,
            confidence,
            extra: Map::new(),
        }
    }

    pub fn status(&self) -> SpotStatus {
        match self.class.as_deref().map(str::to_lowercase).as_deref() {
            Some("empty") => SpotStatus::Empty,
            Some("occupied") => SpotStatus::Occupied,
            _ => SpotStatus::Unrecognized,
        }
    }

    pub fn confidence_or_default(&self) -> f64 {
        self.confidence.unwrap_or(DEFAULT_CONFIDENCE)
    }

    pub fn is_below(&self, threshold: f64) -> bool {
        self.confidence_or_default() < threshold
    }
}

// Detector payloads are loosely typed; a label of the wrong JSON type counts
// as missing instead of failing the whole batch.
fn lenient_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(label)) => Some(label),
        _ => None,
    })
}

fn lenient_confidence<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number.as_f64(),
        _ => None,
    })
}
