use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::TravelError;
use crate::services::{decode_json, WeatherApi};
use crate::types::Coordinates;

/// Lenient view of an OpenWeather current-weather body. Every field may be
/// absent; the weather agent substitutes placeholders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub weather: Option<Vec<WeatherCondition>>,
    #[serde(default)]
    pub main:    Option<MainReadings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    /// Kept as the raw JSON number so `18` prints as `18` and `18.5` as `18.5`.
    #[serde(default)]
    pub temp: Option<serde_json::Number>,
}

impl CurrentWeather {
    pub fn new(description: impl Into<String>, temp: impl Into<serde_json::Number>) -> Self {
        Self {
            weather: Some(vec![WeatherCondition { description: Some(description.into()) }]),
            main:    Some(MainReadings { temp: Some(temp.into()) }),
        }
    }
}

/// OpenWeather current conditions, metric units.
pub struct OpenWeatherClient {
    client:   reqwest::Client,
    api_key:  String,
    api_base: String,
}

impl OpenWeatherClient {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_key:  api_key.into(),
            api_base: api_base.into(),
        }
    }
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn current(&self, coords: Coordinates) -> Result<CurrentWeather, TravelError> {
        let url = format!("{}/data/2.5/weather", self.api_base.trim_end_matches('/'));
        tracing::debug!(%url, lat = coords.lat, lon = coords.lng, "openweather current");

        let lat = coords.lat.to_string();
        let lon = coords.lng.to_string();
        let response = self.client.get(&url)
            .query(&[
                ("lat",   lat.as_str()),
                ("lon",   lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        decode_json("openweather", response).await
    }
}
