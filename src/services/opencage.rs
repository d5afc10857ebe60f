use async_trait::async_trait;
use serde::Deserialize;
use crate::error::TravelError;
use crate::services::{decode_json, GeocodeApi};
use crate::types::Coordinates;

#[derive(Deserialize, Debug, Default)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize, Debug)]
struct GeocodeResult {
    geometry: Coordinates,
}

/// OpenCage forward geocoding.
pub struct OpenCageClient {
    client:   reqwest::Client,
    api_key:  String,
    api_base: String,
}

impl OpenCageClient {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_key:  api_key.into(),
            api_base: api_base.into(),
        }
    }
}

#[async_trait]
impl GeocodeApi for OpenCageClient {
    async fn forward(&self, place: &str) -> Result<Vec<Coordinates>, TravelError> {
        let url = format!("{}/geocode/v1/json", self.api_base.trim_end_matches('/'));
        tracing::debug!(%url, place, "opencage geocode");

        let response = self.client.get(&url)
            .query(&[("q", place), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let body: GeocodeResponse = decode_json("opencage", response).await?;
        Ok(body.results.into_iter().map(|r| r.geometry).collect())
    }
}
