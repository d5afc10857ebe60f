use std::sync::Arc;
use async_trait::async_trait;
use crate::agents::{require, Agent};
use crate::error::TravelError;
use crate::services::GeocodeApi;
use crate::types::{Coordinates, PlanUpdate, TripPlan};

/// New York City, used when the destination cannot be geocoded.
pub const FALLBACK_COORDINATES: Coordinates = Coordinates { lat: 40.7128, lng: -74.0060 };

pub struct GeocodeAgent {
    geocoder: Arc<dyn GeocodeApi>,
}

impl GeocodeAgent {
    pub fn new(geocoder: Arc<dyn GeocodeApi>) -> Self {
        Self { geocoder }
    }
}

#[async_trait]
impl Agent for GeocodeAgent {
    fn name(&self) -> &'static str { "geocode" }

    async fn run(&self, plan: &TripPlan) -> Result<PlanUpdate, TravelError> {
        let destination = require(&plan.destination, self.name(), "destination")?;

        let results = self.geocoder.forward(destination).await?;
        let coords = match results.first() {
            Some(first) => *first,
            None => {
                tracing::warn!(destination = %destination, "no geocoding results for destination, using fallback coordinates");
                FALLBACK_COORDINATES
            }
        };

        tracing::info!(destination = %destination, lat = coords.lat, lng = coords.lng, "geocoded");
        Ok(PlanUpdate::coordinates(coords))
    }
}
