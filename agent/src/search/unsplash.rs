use crate::workflow::config::AgentConfig;
use anyhow::Context;
use log::debug;
use parkcore::curation::SearchError;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

/// Client for the Unsplash photo search API.
pub struct UnsplashClient {
    http: reqwest::Client,
    endpoint: String,
    access_key: Option<String>,
}

impl UnsplashClient {
    pub fn new(config: &AgentConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.search_timeout_secs.max(1)))
            .build()
            .context("building image search client")?;
        Ok(Self {
            http,
            endpoint: config.search_endpoint.clone(),
            access_key: config.unsplash_key.clone(),
        })
    }

    /// Up to `count` image URLs matching `query`.
    pub async fn search(&self, query: &str, count: usize) -> Result<Vec<String>, SearchError> {
        let key = self.access_key.as_deref().ok_or(SearchError::MissingKey)?;
        let per_page = count.to_string();
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("query", query), ("per_page", per_page.as_str())])
            .header("Authorization", format!("Client-ID {}", key))
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;
        debug!("image search '{}' -> {} results", query, body.results.len());
        Ok(body
            .results
            .into_iter()
            .take(count)
            .map(|photo| photo.urls.regular)
            .collect())
    }
}
