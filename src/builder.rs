use crate::agents::Agent;
use crate::error::TravelError;
use crate::pipeline::TravelPipeline;

#[derive(Default)]
pub struct PipelineBuilder {
    agents: Vec<Box<dyn Agent>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self { agents: Vec::new() }
    }

    /// Appends an agent; agents run in the order they are added.
    pub fn agent(mut self, agent: impl Agent + 'static) -> Self {
        self.agents.push(Box::new(agent)); self
    }

    pub fn build(self) -> Result<TravelPipeline, TravelError> {
        if self.agents.is_empty() {
            return Err(TravelError::BuildError("at least one agent is required".to_string()));
        }

        let mut seen = std::collections::HashSet::new();
        for agent in &self.agents {
            if !seen.insert(agent.name()) {
                return Err(TravelError::BuildError(format!(
                    "agent '{}' registered twice", agent.name()
                )));
            }
        }

        Ok(TravelPipeline::new(self.agents))
    }
}
