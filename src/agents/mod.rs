use crate::error::TravelError;
use crate::types::{PlanUpdate, TripPlan};
use async_trait::async_trait;

mod destination;
mod geocode;
mod weather;
mod research;
mod report;

pub use destination::{DestinationAgent, extract_destination, destination_query, FALLBACK_DESTINATION};
pub use geocode::{GeocodeAgent, FALLBACK_COORDINATES};
pub use weather::{WeatherAgent, describe_weather, UNKNOWN_WEATHER, UNKNOWN_TEMPERATURE};
pub use research::{ResearchAgent, summarize_research, research_query, MAX_SUMMARY_CHARS, NO_PAPERS_FOUND};
pub use report::{ReportAgent, report_prompt};

/// The contract every pipeline step must fulfill.
///
/// # Implementing an Agent
///
/// 1. `run()` reads only fields earlier steps have set. A missing input is
///    `TravelError::MissingField`, never a silent default.
/// 2. `run()` makes at most one external call.
/// 3. Empty results are data: substitute the step's fallback value and
///    return `Ok`. Only transport or decoding failures are `Err`.
/// 4. The returned `PlanUpdate` sets only the fields this step owns.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Returns the unique name of this step (used in logs and the trace).
    fn name(&self) -> &'static str;

    /// Execute this step against the current plan.
    async fn run(&self, plan: &TripPlan) -> Result<PlanUpdate, TravelError>;
}

/// Borrows a field an earlier step must have set.
pub(crate) fn require<'a, T>(
    value: &'a Option<T>,
    agent: &'static str,
    field: &'static str,
) -> Result<&'a T, TravelError> {
    value.as_ref().ok_or(TravelError::MissingField { agent, field })
}
