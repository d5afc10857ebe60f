use std::sync::{Mutex, MutexGuard};
use async_trait::async_trait;
use crate::error::TravelError;
use crate::llm::LlmCaller;

/// Scripted LLM for tests and offline runs.
///
/// Responses are handed out in order. A caller built with
/// [`MockLlmCaller::fixed`] returns the same text on every call.
pub struct MockLlmCaller {
    responses: Mutex<Vec<String>>,
    fixed:     Option<String>,
    call_log:  Mutex<Vec<String>>,  // prompts, in call order
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockLlmCaller {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses),
            fixed:     None,
            call_log:  Mutex::new(Vec::new()),
        }
    }

    pub fn fixed(response: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            fixed:     Some(response.into()),
            call_log:  Mutex::new(Vec::new()),
        }
    }

    /// Returns the number of times complete() was invoked
    pub fn call_count(&self) -> usize {
        lock(&self.call_log).len()
    }

    /// Returns the prompt passed to the Nth call (0-indexed)
    pub fn prompt_for_call(&self, n: usize) -> Option<String> {
        lock(&self.call_log).get(n).cloned()
    }
}

#[async_trait]
impl LlmCaller for MockLlmCaller {
    async fn complete(&self, prompt: &str) -> Result<String, TravelError> {
        lock(&self.call_log).push(prompt.to_string());

        if let Some(text) = &self.fixed {
            return Ok(text.clone());
        }

        let mut responses = lock(&self.responses);
        if responses.is_empty() {
            return Err(TravelError::Llm("MockLlmCaller: no more programmed responses".to_string()));
        }
        Ok(responses.remove(0))
    }
}
