//! # Travel Concierge
//!
//! Picks a destination for an interest and season, geocodes it, looks up the
//! current weather and related papers, then asks an LLM for a short guide.
//!
//! # Usage
//! ```bash
//! SERPAPI_API_KEY=.. OPENCAGE_API_KEY=.. OPENWEATHER_API_KEY=.. OPENAI_API_KEY=sk-.. \
//!     cargo run
//! RUST_LOG=debug TRAVEL_INTEREST="food" TRAVEL_SEASON="autumn" cargo run
//! ```

use concierge::{render_report, TravelConfig, TravelPipeline, TripPlan};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Structured logging to stderr; set RUST_LOG=debug|info|warn
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = TravelConfig::from_env()?;
    let mut pipeline = TravelPipeline::standard(&config)?;

    let initial = TripPlan::new(config.interest.as_str(), config.season.as_str());
    let plan = pipeline.run(initial).await?;

    print!("{}", render_report(&plan));

    if tracing::enabled!(tracing::Level::DEBUG) {
        pipeline.trace().print();
    }

    Ok(())
}
