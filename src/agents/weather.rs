use std::sync::Arc;
use async_trait::async_trait;
use crate::agents::{require, Agent};
use crate::error::TravelError;
use crate::services::{CurrentWeather, WeatherApi};
use crate::types::{PlanUpdate, TripPlan};

pub const UNKNOWN_WEATHER:     &str = "Unknown weather";
pub const UNKNOWN_TEMPERATURE: &str = "N/A";

pub struct WeatherAgent {
    weather: Arc<dyn WeatherApi>,
}

impl WeatherAgent {
    pub fn new(weather: Arc<dyn WeatherApi>) -> Self {
        Self { weather }
    }
}

/// Formats current conditions as `"<description>, <temp>°C"`, substituting
/// placeholders for whatever the response lacks.
pub fn describe_weather(current: &CurrentWeather) -> String {
    let description = current.weather.as_ref()
        .and_then(|w| w.first())
        .and_then(|c| c.description.as_deref())
        .unwrap_or(UNKNOWN_WEATHER);
    let temp = current.main.as_ref()
        .and_then(|m| m.temp.as_ref())
        .map(|t| t.to_string())
        .unwrap_or_else(|| UNKNOWN_TEMPERATURE.to_string());
    format!("{}, {}°C", description, temp)
}

#[async_trait]
impl Agent for WeatherAgent {
    fn name(&self) -> &'static str { "weather" }

    async fn run(&self, plan: &TripPlan) -> Result<PlanUpdate, TravelError> {
        let coords = *require(&plan.coordinates, self.name(), "coordinates")?;

        let current = self.weather.current(coords).await?;
        let weather = describe_weather(&current);

        tracing::info!(weather = %weather, "current weather");
        Ok(PlanUpdate::weather(weather))
    }
}
