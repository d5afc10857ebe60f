use crate::error::TravelError;
use crate::types::Coordinates;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

mod serpapi;
mod opencage;
mod openweather;
mod arxiv;

pub use serpapi::SerpApiClient;
pub use opencage::OpenCageClient;
pub use openweather::{OpenWeatherClient, CurrentWeather, WeatherCondition, MainReadings};
pub use arxiv::{ArxivClient, ArxivPaper, parse_atom_feed, render_papers};

/// Web search. Returns the snippet of the first organic result, or `None`
/// when the search produced no organic results.
#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn top_snippet(&self, query: &str) -> Result<Option<String>, TravelError>;
}

/// Forward geocoding. Returns every match in the provider's order.
#[async_trait]
pub trait GeocodeApi: Send + Sync {
    async fn forward(&self, place: &str) -> Result<Vec<Coordinates>, TravelError>;
}

/// Current conditions at a coordinate.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    async fn current(&self, coords: Coordinates) -> Result<CurrentWeather, TravelError>;
}

/// Academic paper search. Returns rendered result text, empty when nothing
/// matched.
#[async_trait]
pub trait PaperSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<String, TravelError>;
}

/// Reads the whole body and decodes it as JSON, whatever the status code.
/// Error bodies of the JSON services simply lack the expected fields.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    service:  &'static str,
    response: reqwest::Response,
) -> Result<T, TravelError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        tracing::debug!(service, %status, body = %body.chars().take(200).collect::<String>(), "non-success response");
    }
    serde_json::from_str(&body).map_err(|source| TravelError::Decode { service, source })
}
