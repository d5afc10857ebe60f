use std::sync::Arc;
use async_trait::async_trait;
use crate::agents::{require, Agent};
use crate::error::TravelError;
use crate::llm::LlmCaller;
use crate::types::{PlanUpdate, TripPlan};

/// Composes the final travel guide with a language model.
pub struct ReportAgent {
    llm: Arc<dyn LlmCaller>,
}

impl ReportAgent {
    pub fn new(llm: Arc<dyn LlmCaller>) -> Self {
        Self { llm }
    }
}

pub fn report_prompt(destination: &str, weather: &str, research_summary: &str) -> String {
    format!(
        "\nYou are a travel and science assistant. Summarize this travel plan:\n\n\
         Destination: {}\n\
         Weather Forecast: {}\n\
         Scientific or Cultural Insight: {}\n\n\
         Write a travel guide in 2–3 paragraphs.\n",
        destination, weather, research_summary
    )
}

#[async_trait]
impl Agent for ReportAgent {
    fn name(&self) -> &'static str { "report" }

    async fn run(&self, plan: &TripPlan) -> Result<PlanUpdate, TravelError> {
        let destination = require(&plan.destination, self.name(), "destination")?;
        let weather = require(&plan.weather, self.name(), "weather")?;
        let research = require(&plan.research_summary, self.name(), "research_summary")?;

        let prompt = report_prompt(destination, weather, research);
        let report = self.llm.complete(&prompt).await?;

        tracing::info!(chars = report.chars().count(), "report composed");
        Ok(PlanUpdate::final_report(report))
    }
}
