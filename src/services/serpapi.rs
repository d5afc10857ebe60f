use async_trait::async_trait;
use serde::Deserialize;
use crate::error::TravelError;
use crate::services::{decode_json, SearchApi};

#[derive(Deserialize, Debug, Default)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Deserialize, Debug, Default)]
struct OrganicResult {
    #[serde(default)]
    snippet: Option<String>,
}

/// Google results through SerpAPI.
pub struct SerpApiClient {
    client:   reqwest::Client,
    api_key:  String,
    api_base: String,
}

impl SerpApiClient {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_key:  api_key.into(),
            api_base: api_base.into(),
        }
    }
}

#[async_trait]
impl SearchApi for SerpApiClient {
    async fn top_snippet(&self, query: &str) -> Result<Option<String>, TravelError> {
        let url = format!("{}/search.json", self.api_base.trim_end_matches('/'));
        tracing::debug!(%url, query, "serpapi search");

        let response = self.client.get(&url)
            .query(&[
                ("engine",  "google"),
                ("q",       query),
                ("api_key", self.api_key.as_str()),
                ("hl",      "en"),
                ("gl",      "us"),
            ])
            .send()
            .await?;

        let body: SerpResponse = decode_json("serpapi", response).await?;
        Ok(body.organic_results
            .into_iter()
            .next()
            .map(|r| r.snippet.unwrap_or_default()))
    }
}
