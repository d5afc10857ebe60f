//! Pipeline tests with stubbed services.
//!
//! Every external call is answered by a `mockall` stub or `MockLlmCaller`;
//! no network calls are made.

use async_trait::async_trait;
use concierge::agents::{Agent, GeocodeAgent, FALLBACK_COORDINATES};
use concierge::llm::{LlmCaller, MockLlmCaller};
use concierge::services::{CurrentWeather, GeocodeApi, PaperSearch, SearchApi, WeatherApi};
use concierge::{Coordinates, PipelineBuilder, PlanUpdate, TravelError, TravelPipeline, TripPlan};
use mockall::mock;
use std::sync::Arc;

mock! {
    pub Search {}
    #[async_trait]
    impl SearchApi for Search {
        async fn top_snippet(&self, query: &str) -> Result<Option<String>, TravelError>;
    }
}

mock! {
    pub Geocoder {}
    #[async_trait]
    impl GeocodeApi for Geocoder {
        async fn forward(&self, place: &str) -> Result<Vec<Coordinates>, TravelError>;
    }
}

mock! {
    pub Weather {}
    #[async_trait]
    impl WeatherApi for Weather {
        async fn current(&self, coords: Coordinates) -> Result<CurrentWeather, TravelError>;
    }
}

mock! {
    pub Papers {}
    #[async_trait]
    impl PaperSearch for Papers {
        async fn search(&self, query: &str) -> Result<String, TravelError>;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test helpers
// ─────────────────────────────────────────────────────────────────────────────

const PAPERS: &str = "Published: 2021-01-04\nTitle: Urban Tourism and Museums in Paris\nAuthors: Alice Martin\nSummary: Visitor flows in the Louvre.";

fn paris_search() -> MockSearch {
    let mut search = MockSearch::new();
    search.expect_top_snippet()
        .withf(|q: &str| q == "Top travel destinations for art and history in spring")
        .times(1)
        .returning(|_| Ok(Some("A · Paris · B".to_string())));
    search
}

fn paris_geocoder() -> MockGeocoder {
    let mut geocoder = MockGeocoder::new();
    geocoder.expect_forward()
        .withf(|place: &str| place == "Paris")
        .times(1)
        .returning(|_| Ok(vec![Coordinates::new(48.86, 2.35), Coordinates::new(33.66, -95.55)]));
    geocoder
}

fn clear_sky() -> MockWeather {
    let mut weather = MockWeather::new();
    weather.expect_current()
        .withf(|c: &Coordinates| *c == Coordinates::new(48.86, 2.35))
        .times(1)
        .returning(|_| Ok(CurrentWeather::new("clear sky", 18)));
    weather
}

fn paris_papers() -> MockPapers {
    let mut papers = MockPapers::new();
    papers.expect_search()
        .withf(|q: &str| q == "Paris travel OR culture")
        .times(1)
        .returning(|_| Ok(PAPERS.to_string()));
    papers
}

fn stub_pipeline(llm: Arc<dyn LlmCaller>) -> TravelPipeline {
    TravelPipeline::from_services(
        Arc::new(paris_search()),
        Arc::new(paris_geocoder()),
        Arc::new(clear_sky()),
        Arc::new(paris_papers()),
        llm,
    )
    .expect("pipeline should build")
}

/// Deterministic stand-in for a model: the report is a pure function of the prompt.
struct EchoLlm;

#[async_trait]
impl LlmCaller for EchoLlm {
    async fn complete(&self, prompt: &str) -> Result<String, TravelError> {
        Ok(format!("GUIDE[{}]", prompt.trim()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// End-to-end
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_end_to_end_with_stubbed_services() {
    let llm = Arc::new(MockLlmCaller::new(vec![
        "Paris in spring:\n\nMuseums, cafés and clear skies.".to_string(),
    ]));
    let mut pipeline = stub_pipeline(llm.clone());

    let plan = pipeline.run(TripPlan::new("art and history", "spring")).await
        .expect("pipeline should succeed");

    assert_eq!(plan.destination.as_deref(), Some("Paris"));
    assert_eq!(plan.coordinates, Some(Coordinates::new(48.86, 2.35)));
    assert_eq!(plan.weather.as_deref(), Some("clear sky, 18°C"));
    assert_eq!(plan.research_summary.as_deref(), Some(PAPERS));
    assert_eq!(
        plan.final_report.as_deref(),
        Some("Paris in spring:\n\nMuseums, cafés and clear skies.")
    );

    // The report prompt carries every accumulated field
    assert_eq!(llm.call_count(), 1);
    let prompt = llm.prompt_for_call(0).unwrap();
    assert!(prompt.contains("Destination: Paris\n"));
    assert!(prompt.contains("Weather Forecast: clear sky, 18°C\n"));
    assert!(prompt.contains(&format!("Scientific or Cultural Insight: {}\n", PAPERS)));
}

#[tokio::test]
async fn test_trace_records_each_step_in_order() {
    let mut pipeline = stub_pipeline(Arc::new(MockLlmCaller::fixed("report")));
    pipeline.run(TripPlan::new("art and history", "spring")).await.unwrap();

    let entries = pipeline.trace().entries();
    let agents: Vec<&str> = entries.iter().map(|e| e.agent.as_str()).collect();
    assert_eq!(agents, vec!["recommend", "geocode", "weather", "research", "report"]);
    assert!(entries.iter().all(|e| e.event == "STEP_COMPLETE"));
    assert_eq!(entries.iter().map(|e| e.step).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    assert_eq!(entries[0].data, "destination=Paris");
}

#[test]
fn test_step_names_follow_fixed_chain() {
    let pipeline = TravelPipeline::from_services(
        Arc::new(MockSearch::new()),
        Arc::new(MockGeocoder::new()),
        Arc::new(MockWeather::new()),
        Arc::new(MockPapers::new()),
        Arc::new(MockLlmCaller::new(vec![])),
    )
    .unwrap();

    assert_eq!(pipeline.step_names(), vec!["recommend", "geocode", "weather", "research", "report"]);
}

#[tokio::test]
async fn test_rerun_with_identical_stubs_is_byte_identical() {
    let first = stub_pipeline(Arc::new(EchoLlm))
        .run(TripPlan::new("art and history", "spring")).await.unwrap();
    let second = stub_pipeline(Arc::new(EchoLlm))
        .run(TripPlan::new("art and history", "spring")).await.unwrap();

    let a = first.final_report.unwrap();
    let b = second.final_report.unwrap();
    assert_eq!(a.as_bytes(), b.as_bytes());
    assert!(a.contains("Destination: Paris"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Fallbacks
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_absent_inputs_use_nature_and_summer() {
    let mut search = MockSearch::new();
    search.expect_top_snippet()
        .withf(|q: &str| q == "Top travel destinations for nature in summer")
        .times(1)
        .returning(|_| Ok(Some("Jun 2024 · Banff · Canada".to_string())));

    let mut pipeline = PipelineBuilder::new()
        .agent(concierge::agents::DestinationAgent::new(Arc::new(search)))
        .build()
        .unwrap();

    let plan = pipeline.run(TripPlan::default()).await.unwrap();
    assert_eq!(plan.destination.as_deref(), Some("Banff"));
}

#[tokio::test]
async fn test_empty_results_fall_back_through_the_chain() {
    let mut search = MockSearch::new();
    search.expect_top_snippet().times(1).returning(|_| Ok(None));

    let mut geocoder = MockGeocoder::new();
    geocoder.expect_forward()
        .withf(|place: &str| place == "Switzerland")
        .times(1)
        .returning(|_| Ok(vec![]));

    let mut weather = MockWeather::new();
    weather.expect_current()
        .withf(|c: &Coordinates| *c == Coordinates::new(40.7128, -74.0060))
        .times(1)
        .returning(|_| Ok(CurrentWeather::default()));

    let mut papers = MockPapers::new();
    papers.expect_search()
        .withf(|q: &str| q == "Switzerland travel OR culture")
        .times(1)
        .returning(|_| Ok(String::new()));

    let llm = Arc::new(MockLlmCaller::fixed("fallback guide"));
    let mut pipeline = TravelPipeline::from_services(
        Arc::new(search), Arc::new(geocoder), Arc::new(weather), Arc::new(papers), llm.clone(),
    )
    .unwrap();

    let plan = pipeline.run(TripPlan::new("art and history", "spring")).await.unwrap();

    assert_eq!(plan.destination.as_deref(), Some("Switzerland"));
    assert_eq!(plan.coordinates, Some(FALLBACK_COORDINATES));
    assert_eq!(plan.weather.as_deref(), Some("Unknown weather, N/A°C"));
    assert_eq!(plan.research_summary.as_deref(), Some("No relevant papers found."));
    assert_eq!(plan.final_report.as_deref(), Some("fallback guide"));
    assert!(llm.prompt_for_call(0).unwrap().contains("Scientific or Cultural Insight: No relevant papers found."));
}

#[tokio::test]
async fn test_unsplittable_snippet_falls_back_to_switzerland() {
    let mut search = MockSearch::new();
    search.expect_top_snippet()
        .times(1)
        .returning(|_| Ok(Some("A plain sentence with no separator.".to_string())));

    let mut pipeline = PipelineBuilder::new()
        .agent(concierge::agents::DestinationAgent::new(Arc::new(search)))
        .build()
        .unwrap();

    let plan = pipeline.run(TripPlan::new("food", "autumn")).await.unwrap();
    assert_eq!(plan.destination.as_deref(), Some("Switzerland"));
}

#[tokio::test]
async fn test_geocoder_returns_first_entry_unchanged() {
    let mut geocoder = MockGeocoder::new();
    geocoder.expect_forward()
        .times(1)
        .returning(|_| Ok(vec![Coordinates::new(-33.8688, 151.2093), Coordinates::new(0.0, 0.0)]));

    let agent = GeocodeAgent::new(Arc::new(geocoder));
    let plan = TripPlan { destination: Some("Sydney".into()), ..Default::default() };

    let update = agent.run(&plan).await.unwrap();
    assert_eq!(update, PlanUpdate::coordinates(Coordinates::new(-33.8688, 151.2093)));
}

#[tokio::test]
async fn test_geocoder_empty_list_yields_new_york() {
    let mut geocoder = MockGeocoder::new();
    geocoder.expect_forward().times(1).returning(|_| Ok(vec![]));

    let agent = GeocodeAgent::new(Arc::new(geocoder));
    let plan = TripPlan { destination: Some("Atlantis".into()), ..Default::default() };

    let update = agent.run(&plan).await.unwrap();
    assert_eq!(update.coordinates, Some(Coordinates { lat: 40.7128, lng: -74.0060 }));
}

// ─────────────────────────────────────────────────────────────────────────────
// Failures
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_late_failure_aborts_run() {
    // No programmed responses: the report step fails after four successful steps
    let mut pipeline = stub_pipeline(Arc::new(MockLlmCaller::new(vec![])));

    let result = pipeline.run(TripPlan::new("art and history", "spring")).await;
    assert!(matches!(result, Err(TravelError::Llm(_))), "got {:?}", result);

    let entries = pipeline.trace().entries();
    assert_eq!(entries.len(), 5);
    assert_eq!(entries.iter().filter(|e| e.event == "STEP_COMPLETE").count(), 4);
    assert_eq!(entries[4].agent, "report");
    assert_eq!(entries[4].event, "STEP_FAILED");
}

#[tokio::test]
async fn test_service_error_propagates_without_later_calls() {
    let mut search = MockSearch::new();
    search.expect_top_snippet()
        .times(1)
        .returning(|_| Err(TravelError::Decode {
            service: "serpapi",
            source:  serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
        }));

    // Later services have no expectations: any call would panic
    let llm = Arc::new(MockLlmCaller::fixed("never"));
    let mut pipeline = TravelPipeline::from_services(
        Arc::new(search),
        Arc::new(MockGeocoder::new()),
        Arc::new(MockWeather::new()),
        Arc::new(MockPapers::new()),
        llm.clone(),
    )
    .unwrap();

    assert!(pipeline.run(TripPlan::new("art", "winter")).await.is_err());
    assert_eq!(llm.call_count(), 0);
    assert_eq!(pipeline.trace().len(), 1);
}

#[tokio::test]
async fn test_agent_without_its_input_reports_missing_field() {
    let agent = GeocodeAgent::new(Arc::new(MockGeocoder::new()));
    let err = agent.run(&TripPlan::new("art", "spring")).await.unwrap_err();

    assert!(matches!(err, TravelError::MissingField { agent: "geocode", field: "destination" }));
}

/// Writes a destination under a different step name than the picker.
struct SecondOpinion;

#[async_trait]
impl Agent for SecondOpinion {
    fn name(&self) -> &'static str { "second_opinion" }

    async fn run(&self, _plan: &TripPlan) -> Result<PlanUpdate, TravelError> {
        Ok(PlanUpdate::destination("Rome"))
    }
}

#[tokio::test]
async fn test_second_write_to_a_field_is_rejected() {
    let mut search = MockSearch::new();
    search.expect_top_snippet()
        .returning(|_| Ok(Some("x · Paris".to_string())));

    let mut pipeline = PipelineBuilder::new()
        .agent(concierge::agents::DestinationAgent::new(Arc::new(search)))
        .agent(SecondOpinion)
        .build()
        .unwrap();

    let err = pipeline.run(TripPlan::default()).await.unwrap_err();
    assert!(matches!(err, TravelError::FieldAlreadySet("destination")));
}

#[test]
fn test_builder_requires_agents() {
    let result = PipelineBuilder::new().build();
    assert!(matches!(result, Err(TravelError::BuildError(_))));
}

#[test]
fn test_builder_rejects_duplicate_names() {
    let result = PipelineBuilder::new()
        .agent(SecondOpinion)
        .agent(SecondOpinion)
        .build();
    assert!(matches!(result, Err(TravelError::BuildError(msg)) if msg.contains("second_opinion")));
}
