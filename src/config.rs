//! Process configuration, read once at startup and passed into the pipeline.

use crate::error::TravelError;

pub const SERPAPI_KEY_VAR:     &str = "SERPAPI_API_KEY";
pub const OPENCAGE_KEY_VAR:    &str = "OPENCAGE_API_KEY";
pub const OPENWEATHER_KEY_VAR: &str = "OPENWEATHER_API_KEY";
pub const OPENAI_KEY_VAR:      &str = "OPENAI_API_KEY";

pub const DEFAULT_MODEL:       &str = "gpt-4";
pub const DEFAULT_TEMPERATURE: f32  = 0.7;

/// Base URLs of the external services. Overridable so tests and proxies can
/// point the clients elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub serpapi:     String,
    pub opencage:    String,
    pub openweather: String,
    pub arxiv:       String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            serpapi:     "https://serpapi.com".to_string(),
            opencage:    "https://api.opencagedata.com".to_string(),
            openweather: "https://api.openweathermap.org".to_string(),
            arxiv:       "https://export.arxiv.org".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TravelConfig {
    pub serpapi_key:     String,
    pub opencage_key:    String,
    pub openweather_key: String,
    pub openai_key:      String,

    /// Custom base URL for OpenAI-compatible providers (Groq, Together, ...).
    pub openai_api_base: Option<String>,
    pub model:           String,
    pub temperature:     f32,

    pub endpoints:       Endpoints,

    /// Initial pipeline inputs.
    pub interest:        String,
    pub season:          String,
}

impl TravelConfig {
    /// Loads `.env` (if present) and then reads the process environment.
    pub fn from_env() -> Result<Self, TravelError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "failed to load .env file");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// All four credentials are required; an empty value counts as missing.
    /// Every missing name is reported in a single error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TravelError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let required = [SERPAPI_KEY_VAR, OPENCAGE_KEY_VAR, OPENWEATHER_KEY_VAR, OPENAI_KEY_VAR];
        let missing: Vec<String> = required.iter()
            .copied()
            .filter(|&k| get(k).is_none())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(TravelError::MissingCredentials(missing));
        }

        let defaults = Endpoints::default();
        let temperature = match get("OPENAI_TEMPERATURE") {
            Some(raw) => raw.parse::<f32>().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid OPENAI_TEMPERATURE, using default");
                DEFAULT_TEMPERATURE
            }),
            None => DEFAULT_TEMPERATURE,
        };

        Ok(Self {
            serpapi_key:     get(SERPAPI_KEY_VAR).unwrap_or_default(),
            opencage_key:    get(OPENCAGE_KEY_VAR).unwrap_or_default(),
            openweather_key: get(OPENWEATHER_KEY_VAR).unwrap_or_default(),
            openai_key:      get(OPENAI_KEY_VAR).unwrap_or_default(),
            openai_api_base: get("OPENAI_API_BASE"),
            model:           get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature,
            endpoints: Endpoints {
                serpapi:     get("SERPAPI_BASE_URL").unwrap_or(defaults.serpapi),
                opencage:    get("OPENCAGE_BASE_URL").unwrap_or(defaults.opencage),
                openweather: get("OPENWEATHER_BASE_URL").unwrap_or(defaults.openweather),
                arxiv:       get("ARXIV_BASE_URL").unwrap_or(defaults.arxiv),
            },
            interest: get("TRAVEL_INTEREST").unwrap_or_else(|| "art and history".to_string()),
            season:   get("TRAVEL_SEASON").unwrap_or_else(|| "spring".to_string()),
        })
    }
}
