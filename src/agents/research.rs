use std::sync::Arc;
use async_trait::async_trait;
use crate::agents::{require, Agent};
use crate::error::TravelError;
use crate::services::PaperSearch;
use crate::types::{PlanUpdate, TripPlan};

pub const MAX_SUMMARY_CHARS: usize = 700;
pub const NO_PAPERS_FOUND:   &str  = "No relevant papers found.";

pub struct ResearchAgent {
    papers: Arc<dyn PaperSearch>,
}

impl ResearchAgent {
    pub fn new(papers: Arc<dyn PaperSearch>) -> Self {
        Self { papers }
    }
}

pub fn research_query(destination: &str) -> String {
    format!("{} travel OR culture", destination)
}

/// First [`MAX_SUMMARY_CHARS`] characters of the search text, or
/// [`NO_PAPERS_FOUND`] when the text is empty.
pub fn summarize_research(text: &str) -> String {
    if text.is_empty() {
        return NO_PAPERS_FOUND.to_string();
    }
    text.chars().take(MAX_SUMMARY_CHARS).collect()
}

#[async_trait]
impl Agent for ResearchAgent {
    fn name(&self) -> &'static str { "research" }

    async fn run(&self, plan: &TripPlan) -> Result<PlanUpdate, TravelError> {
        let destination = require(&plan.destination, self.name(), "destination")?;
        let query = research_query(destination);
        tracing::info!(query = %query, "searching papers");

        let text = self.papers.search(&query).await?;
        let summary = summarize_research(&text);

        tracing::info!(chars = summary.chars().count(), "research summary ready");
        Ok(PlanUpdate::research_summary(summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_disjunctive() {
        assert_eq!(research_query("Paris"), "Paris travel OR culture");
    }

    #[test]
    fn empty_text_yields_placeholder() {
        assert_eq!(summarize_research(""), "No relevant papers found.");
    }

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(summarize_research("Title: Museums"), "Title: Museums");
    }

    #[test]
    fn truncation_never_exceeds_limit() {
        for len in [699, 700, 701, 5000] {
            let text = "é".repeat(len);
            let summary = summarize_research(&text);
            assert!(summary.chars().count() <= MAX_SUMMARY_CHARS, "len {len}");
            assert_eq!(summary.chars().count(), len.min(MAX_SUMMARY_CHARS));
        }
    }
}
