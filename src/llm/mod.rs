use crate::error::TravelError;
use async_trait::async_trait;

mod openai;
mod mock;

pub use openai::OpenAiCaller;
pub use mock::MockLlmCaller;

/// The single interface between the report composer and any LLM provider.
///
/// # Contract
/// - Must be Send + Sync (used behind `Arc<dyn LlmCaller>`)
/// - Returns the model's text verbatim; no post-processing
/// - Returns `Err(TravelError::Llm)` for provider failures (network,
///   authentication, empty response). Callers do not retry.
#[async_trait]
pub trait LlmCaller: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, TravelError>;
}
