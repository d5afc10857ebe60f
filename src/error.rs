use thiserror::Error;

#[derive(Debug, Error)]
pub enum TravelError {
    #[error("Missing API keys: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed {service} response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source:  serde_json::Error,
    },

    #[error("Malformed {service} feed: {source}")]
    Feed {
        service: &'static str,
        #[source]
        source:  feed_rs::parser::ParseFeedError,
    },

    #[error("LLM caller error: {0}")]
    Llm(String),

    #[error("Agent '{agent}' requires '{field}' but it has not been set")]
    MissingField { agent: &'static str, field: &'static str },

    #[error("Field '{0}' is write-once and was already set")]
    FieldAlreadySet(&'static str),

    #[error("Build error: {0}")]
    BuildError(String),
}
