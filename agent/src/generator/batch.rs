use parkcore::SpotDetection;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Configuration for generating a synthetic detection batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub spots: usize,
    pub occupied_ratio: f64,
    pub low_confidence_ratio: f64,
    pub seed: u64,
    pub user: Option<String>,
    pub filename: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            spots: 24,
            occupied_ratio: 0.7,
            low_confidence_ratio: 0.15,
            seed: 0,
            user: None,
            filename: Some("demo-lot.jpg".to_string()),
        }
    }
}

/// Lays spots out on a grid of 8 columns with detector-style boxes.
pub fn build_detections(config: &GeneratorConfig) -> Vec<SpotDetection> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let occupied_ratio = probability(config.occupied_ratio);
    let low_confidence_ratio = probability(config.low_confidence_ratio);

    (0..config.spots)
        .map(|index| {
            let class = if rng.gen_bool(occupied_ratio) {
                "occupied"
            } else {
                "empty"
            };
            let confidence = if rng.gen_bool(low_confidence_ratio) {
                rng.gen_range(0.2..0.5)
            } else {
                rng.gen_range(0.5..=1.0)
            };
            let mut spot = SpotDetection::new(class, Some(confidence));
            spot.extra.insert("x".into(), json!(40 + (index % 8) * 60));
            spot.extra.insert("y".into(), json!(60 + (index / 8) * 110));
            spot.extra.insert("width".into(), json!(52));
            spot.extra.insert("height".into(), json!(96));
            spot
        })
        .collect()
}

// `gen_bool` panics outside [0, 1], and NaN survives `clamp`.
fn probability(ratio: f64) -> f64 {
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    }
}
