use crate::search::unsplash::UnsplashClient;
use crate::workflow::config::AgentConfig;
use parkcore::analysis::LowConfidenceQuery;
use parkcore::curation::CuratedSpot;
use std::sync::Arc;

/// Resolves low-confidence queries against the image search service.
///
/// Runs after the core has produced its summary, so no core lock is held
/// while lookups are in flight.
#[derive(Clone)]
pub struct Curator {
    search: Arc<UnsplashClient>,
    images_per_query: usize,
}

impl Curator {
    pub fn new(config: &AgentConfig) -> anyhow::Result<Self> {
        Ok(Self {
            search: Arc::new(UnsplashClient::new(config)?),
            images_per_query: config.images_per_query,
        })
    }

    pub async fn curate(&self, queries: Vec<LowConfidenceQuery>) -> Vec<CuratedSpot> {
        let mut curated = Vec::with_capacity(queries.len());
        for query in queries {
            let lookup = self
                .search
                .search(&query.query, self.images_per_query)
                .await;
            curated.push(CuratedSpot::from_lookup(query, lookup));
        }
        curated
    }
}
