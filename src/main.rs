use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use tripweaver::config::PlannerConfig;
use tripweaver::pipeline::TripPlanner;
use tripweaver::web;

#[tokio::main]
async fn main() -> Result<()> {
    let config = PlannerConfig::load().context("Failed to load configuration")?;

    init_logging(&config);

    tracing::info!(
        "starting TripWeaver v{} (generative service: {}, places service: {})",
        tripweaver::VERSION,
        if config.generative.api_key.is_some() {
            "configured"
        } else {
            "not configured, deterministic fallbacks active"
        },
        if config.places.api_key.is_some() {
            "configured"
        } else {
            "fixture catalog"
        },
    );

    let planner = Arc::new(TripPlanner::from_config(&config));

    web::run(planner, config.server.port).await
}

fn init_logging(config: &PlannerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    if config.logging.format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
