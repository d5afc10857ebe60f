use serde::{Deserialize, Serialize};
use crate::error::TravelError;

/// Interest used when the caller leaves it unset.
pub const DEFAULT_INTEREST: &str = "nature";
/// Season used when the caller leaves it unset.
pub const DEFAULT_SEASON: &str = "summer";

/// A latitude/longitude pair in the shape OpenCage returns (`lat`, `lng`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// The record threaded through every agent of the pipeline.
///
/// Created with only `interest` and `season`, then filled one field per
/// step. Every field is write-once: see [`TripPlan::apply`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripPlan {
    pub interest:         Option<String>,
    pub season:           Option<String>,
    pub destination:      Option<String>,
    pub coordinates:      Option<Coordinates>,
    pub weather:          Option<String>,
    pub research_summary: Option<String>,
    pub final_report:     Option<String>,
}

impl TripPlan {
    pub fn new(interest: impl Into<String>, season: impl Into<String>) -> Self {
        Self {
            interest: Some(interest.into()),
            season:   Some(season.into()),
            ..Default::default()
        }
    }

    /// Interest with the `"nature"` default substituted.
    pub fn interest_or_default(&self) -> &str {
        self.interest.as_deref().unwrap_or(DEFAULT_INTEREST)
    }

    /// Season with the `"summer"` default substituted.
    pub fn season_or_default(&self) -> &str {
        self.season.as_deref().unwrap_or(DEFAULT_SEASON)
    }

    /// Merges an agent's partial update into the plan.
    ///
    /// Fails without modifying the plan if the update touches a field that
    /// is already set.
    pub fn apply(&mut self, update: PlanUpdate) -> Result<(), TravelError> {
        check_unset(&self.destination,      &update.destination,      "destination")?;
        check_unset(&self.coordinates,      &update.coordinates,      "coordinates")?;
        check_unset(&self.weather,          &update.weather,          "weather")?;
        check_unset(&self.research_summary, &update.research_summary, "research_summary")?;
        check_unset(&self.final_report,     &update.final_report,     "final_report")?;

        if update.destination.is_some()      { self.destination      = update.destination; }
        if update.coordinates.is_some()      { self.coordinates      = update.coordinates; }
        if update.weather.is_some()          { self.weather          = update.weather; }
        if update.research_summary.is_some() { self.research_summary = update.research_summary; }
        if update.final_report.is_some()     { self.final_report     = update.final_report; }
        Ok(())
    }
}

/// Text written to stdout once the pipeline finishes: a banner followed by
/// the final report, empty if no report was produced.
pub fn render_report(plan: &TripPlan) -> String {
    format!(
        "\n--- Final Travel Report ---\n\n{}\n",
        plan.final_report.as_deref().unwrap_or_default()
    )
}

fn check_unset<T>(current: &Option<T>, incoming: &Option<T>, field: &'static str) -> Result<(), TravelError> {
    if current.is_some() && incoming.is_some() {
        return Err(TravelError::FieldAlreadySet(field));
    }
    Ok(())
}

/// The partial update an agent hands back to the pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanUpdate {
    pub destination:      Option<String>,
    pub coordinates:      Option<Coordinates>,
    pub weather:          Option<String>,
    pub research_summary: Option<String>,
    pub final_report:     Option<String>,
}

impl PlanUpdate {
    pub fn destination(value: impl Into<String>) -> Self {
        Self { destination: Some(value.into()), ..Default::default() }
    }

    pub fn coordinates(value: Coordinates) -> Self {
        Self { coordinates: Some(value), ..Default::default() }
    }

    pub fn weather(value: impl Into<String>) -> Self {
        Self { weather: Some(value.into()), ..Default::default() }
    }

    pub fn research_summary(value: impl Into<String>) -> Self {
        Self { research_summary: Some(value.into()), ..Default::default() }
    }

    pub fn final_report(value: impl Into<String>) -> Self {
        Self { final_report: Some(value.into()), ..Default::default() }
    }

    /// Short human-readable preview used by the run trace.
    pub fn preview(&self) -> String {
        let text = if let Some(d) = &self.destination {
            format!("destination={}", d)
        } else if let Some(c) = &self.coordinates {
            format!("coordinates={}", c)
        } else if let Some(w) = &self.weather {
            format!("weather={}", w)
        } else if let Some(r) = &self.research_summary {
            format!("research_summary={}", r)
        } else if let Some(f) = &self.final_report {
            format!("final_report={}", f)
        } else {
            "(empty update)".to_string()
        };
        text.chars().take(100).collect()
    }
}
