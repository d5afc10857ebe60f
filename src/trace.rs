use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    pub step:      usize,
    pub agent:     String,
    pub event:     String,
    pub data:      String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn new() -> Self { Self { entries: Vec::new() } }

    /// Appends an entry stamped with the current time.
    pub fn record(&mut self, step: usize, agent: &str, event: &str, data: &str) {
        tracing::debug!(step, agent, event, data, "pipeline trace");
        self.entries.push(TraceEntry {
            step,
            agent:     agent.to_string(),
            event:     event.to_string(),
            data:      data.to_string(),
            timestamp: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns all entries for a given agent name
    pub fn for_agent(&self, agent: &str) -> Vec<&TraceEntry> {
        self.entries.iter().filter(|e| e.agent == agent).collect()
    }

    /// Serializes the trace to a pretty-printed JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.entries)
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Prints a human-readable trace table to stderr
    pub fn print(&self) {
        eprintln!("\n{:<6} {:<12} {:<16} {}", "step", "agent", "event", "data");
        eprintln!("{}", "─".repeat(80));
        for e in &self.entries {
            eprintln!("{:<6} {:<12} {:<16} {}", e.step, e.agent, e.event, &e.data.chars().take(40).collect::<String>());
        }
    }
}
