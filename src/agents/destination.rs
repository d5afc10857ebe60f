use std::sync::Arc;
use async_trait::async_trait;
use crate::agents::Agent;
use crate::error::TravelError;
use crate::services::SearchApi;
use crate::types::{PlanUpdate, TripPlan};

pub const FALLBACK_DESTINATION: &str = "Switzerland";

/// Picks a destination from the top web search result.
pub struct DestinationAgent {
    search: Arc<dyn SearchApi>,
}

impl DestinationAgent {
    pub fn new(search: Arc<dyn SearchApi>) -> Self {
        Self { search }
    }
}

pub fn destination_query(interest: &str, season: &str) -> String {
    format!("Top travel destinations for {} in {}", interest, season)
}

/// Takes the second `·`-separated segment of a search snippet, trimmed.
///
/// Snippets look like `"Mar 3, 2024 · Paris · The city of light..."`, so
/// this is often a date or a sentence fragment rather than a place name.
/// Returns `None` when there is no second segment or it is blank.
pub fn extract_destination(snippet: &str) -> Option<String> {
    snippet
        .split('·')
        .nth(1)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl Agent for DestinationAgent {
    fn name(&self) -> &'static str { "recommend" }

    async fn run(&self, plan: &TripPlan) -> Result<PlanUpdate, TravelError> {
        let query = destination_query(plan.interest_or_default(), plan.season_or_default());
        tracing::info!(query = %query, "searching for destinations");

        let snippet = self.search.top_snippet(&query).await?;
        let destination = match snippet.as_deref().and_then(extract_destination) {
            Some(d) => d,
            None => {
                tracing::warn!(snippet = ?snippet, fallback = FALLBACK_DESTINATION, "no destination in search result");
                FALLBACK_DESTINATION.to_string()
            }
        };

        Ok(PlanUpdate::destination(destination))
    }
}
