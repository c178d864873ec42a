use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::fetcher;

const SEARCH_URL: &str = "https://api.ratebeer.com/v1/search";

/// Blocking client for the community ratings service's name search.
pub struct RatingsClient {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    #[serde(default)]
    beers: Vec<RatingsCandidate>,
}

/// One search hit. `name` and the aliased marker are pulled out for
/// matching; every other field rides along untyped for the merge.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingsCandidate {
    pub name: String,
    /// Set when the service has renamed the entry and this result is a
    /// stale alias for another beer.
    #[serde(default)]
    pub aliased: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RatingsClient {
    pub fn new() -> Result<Self> {
        Ok(RatingsClient { client: fetcher::build_client()? })
    }

    pub fn search(&self, name: &str) -> Result<Vec<RatingsCandidate>> {
        debug!(name, "searching ratings service");
        let results: SearchResults = self
            .client
            .get(SEARCH_URL)
            .query(&[("q", name)])
            .send()?
            .error_for_status()?
            .json()
            .with_context(|| format!("decoding ratings search for {name:?}"))?;
        Ok(results.beers)
    }
}
