pub mod types;
pub mod config;
pub mod error;
pub mod trace;
pub mod services;
pub mod llm;
pub mod agents;
pub mod builder;
pub mod pipeline;

// Convenience re-exports at crate root
pub use builder::PipelineBuilder;
pub use pipeline::TravelPipeline;
pub use config::{TravelConfig, Endpoints};
pub use types::{TripPlan, PlanUpdate, Coordinates, render_report};
pub use agents::Agent;
pub use llm::{LlmCaller, OpenAiCaller, MockLlmCaller};
pub use trace::{TraceEntry, Trace};
pub use error::TravelError;
