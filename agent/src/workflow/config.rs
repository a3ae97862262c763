use crate::generator::batch::GeneratorConfig;
use anyhow::Context;
use parkcore::prelude::{IMAGES_PER_QUERY, LOW_CONFIDENCE_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

pub const UNSPLASH_SEARCH_ENDPOINT: &str = "https://api.unsplash.com/search/photos";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub bind: SocketAddr,
    pub unsplash_key: Option<String>,
    pub search_endpoint: String,
    pub images_per_query: usize,
    pub search_timeout_secs: u64,
    pub low_confidence_threshold: f64,
    pub demo: GeneratorConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            unsplash_key: None,
            search_endpoint: UNSPLASH_SEARCH_ENDPOINT.to_string(),
            images_per_query: IMAGES_PER_QUERY,
            search_timeout_secs: 10,
            low_confidence_threshold: LOW_CONFIDENCE_THRESHOLD,
            demo: GeneratorConfig::default(),
        }
    }
}

impl AgentConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading agent config {}", path_ref.display()))?;
        let config: AgentConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing agent config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        bind: SocketAddr,
        unsplash_key: Option<String>,
        images_per_query: usize,
    ) -> Self {
        Self {
            bind,
            unsplash_key,
            images_per_query,
            ..Default::default()
        }
    }
}
