//! Street-address geocoding against the PAGIS locator service.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::ResolveError;
use crate::geometry::Point;

/// One ranked result from `findAddressCandidates`. The service orders
/// candidates by score; callers take the first.
#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub location: Point,
}

#[derive(Debug, Deserialize)]
struct CandidatesResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Client for the single-line address locator endpoint.
pub struct Locator {
    client: Client,
    url: Url,
}

impl Locator {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    /// Geocode a free-text address, returning the ranked candidate
    /// list. An empty list is a valid response, not an error; the
    /// resolver decides what that means.
    pub async fn find_candidates(&self, address: &str) -> Result<Vec<Candidate>, ResolveError> {
        let response = self
            .client
            .get(self.url.clone())
            .query(&[("Single Line Input", address), ("f", "pjson")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ResolveError::Status(response.status()));
        }

        let body: CandidatesResponse = response.json().await?;
        debug!(
            "locator returned {} candidate(s) for {:?}",
            body.candidates.len(),
            address
        );
        Ok(body.candidates)
    }
}
