use std::sync::Arc;
use uuid::Uuid;
use crate::agents::{
    Agent, DestinationAgent, GeocodeAgent, WeatherAgent, ResearchAgent, ReportAgent,
};
use crate::builder::PipelineBuilder;
use crate::config::TravelConfig;
use crate::error::TravelError;
use crate::llm::{LlmCaller, OpenAiCaller};
use crate::services::{
    ArxivClient, GeocodeApi, OpenCageClient, OpenWeatherClient, PaperSearch,
    SearchApi, SerpApiClient, WeatherApi,
};
use crate::trace::Trace;
use crate::types::TripPlan;

/// An ordered list of agents run once each, front to back.
pub struct TravelPipeline {
    agents: Vec<Box<dyn Agent>>,
    trace:  Trace,
}

impl TravelPipeline {
    /// Creates a pipeline. Prefer `PipelineBuilder` or [`TravelPipeline::standard`].
    pub fn new(agents: Vec<Box<dyn Agent>>) -> Self {
        Self { agents, trace: Trace::new() }
    }

    /// The fixed chain recommend → geocode → weather → research → report
    /// against the real services named in `config`.
    pub fn standard(config: &TravelConfig) -> Result<Self, TravelError> {
        let http = reqwest::Client::new();
        let endpoints = &config.endpoints;

        let llm: Arc<dyn LlmCaller> = match &config.openai_api_base {
            Some(base) => Arc::new(OpenAiCaller::with_base_url(
                base.as_str(), config.openai_key.as_str(), config.model.as_str(), config.temperature,
            )),
            None => Arc::new(OpenAiCaller::new(
                config.openai_key.as_str(), config.model.as_str(), config.temperature,
            )),
        };

        Self::from_services(
            Arc::new(SerpApiClient::new(http.clone(), config.serpapi_key.as_str(), endpoints.serpapi.as_str())),
            Arc::new(OpenCageClient::new(http.clone(), config.opencage_key.as_str(), endpoints.opencage.as_str())),
            Arc::new(OpenWeatherClient::new(http.clone(), config.openweather_key.as_str(), endpoints.openweather.as_str())),
            Arc::new(ArxivClient::new(http, endpoints.arxiv.as_str())),
            llm,
        )
    }

    /// The fixed chain wired to injected services.
    pub fn from_services(
        search:   Arc<dyn SearchApi>,
        geocoder: Arc<dyn GeocodeApi>,
        weather:  Arc<dyn WeatherApi>,
        papers:   Arc<dyn PaperSearch>,
        llm:      Arc<dyn LlmCaller>,
    ) -> Result<Self, TravelError> {
        PipelineBuilder::new()
            .agent(DestinationAgent::new(search))
            .agent(GeocodeAgent::new(geocoder))
            .agent(WeatherAgent::new(weather))
            .agent(ResearchAgent::new(papers))
            .agent(ReportAgent::new(llm))
            .build()
    }

    /// Runs every agent once, in order, merging each update into the plan.
    ///
    /// The first failure aborts the run; the partially filled plan is
    /// dropped. The trace of the aborted run stays available.
    #[tracing::instrument(name = "pipeline", skip_all, fields(run_id = %Uuid::new_v4()))]
    pub async fn run(&mut self, initial: TripPlan) -> Result<TripPlan, TravelError> {
        self.trace.clear();
        let mut plan = initial;
        let total = self.agents.len();

        for (index, agent) in self.agents.iter().enumerate() {
            let step = index + 1;
            let name = agent.name();
            tracing::info!(step, total, agent = name, "agent step");

            let update = match agent.run(&plan).await {
                Ok(update) => update,
                Err(err) => {
                    tracing::error!(step, agent = name, error = %err, "agent failed");
                    self.trace.record(step, name, "STEP_FAILED", &err.to_string());
                    return Err(err);
                }
            };

            let preview = update.preview();
            if let Err(err) = plan.apply(update) {
                self.trace.record(step, name, "STEP_FAILED", &err.to_string());
                return Err(err);
            }
            self.trace.record(step, name, "STEP_COMPLETE", &preview);
        }

        tracing::info!(steps = total, "pipeline complete");
        Ok(plan)
    }

    /// Agent names in execution order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.agents.iter().map(|a| a.name()).collect()
    }

    /// Returns the trace of the most recent run.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }
}
