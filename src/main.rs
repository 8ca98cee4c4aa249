use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use triplens::api::AppState;
use triplens::{
    GeminiClient, ImageResolver, PlacesClient, TransportService, TripLensConfig, TripPlanner,
    cache, telemetry, web,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = TripLensConfig::load().context("Failed to load configuration")?;
    telemetry::init(&config.logging)?;

    if config.places.api_key.is_none() {
        warn!("No Places API key configured; every image will use its fallback");
    }
    if config.generative.api_key.is_none() {
        warn!("No generative API key configured; transport and trip planning will fail");
    }

    let cache = cache::init(config.cache.max_entries)?;
    let places = PlacesClient::new(&config.places).context("Failed to create Places client")?;
    let generator = Arc::new(
        GeminiClient::new(&config.generative).context("Failed to create generative client")?,
    );

    let state = AppState::new(
        ImageResolver::new(Arc::new(places), cache),
        TransportService::new(generator.clone()),
        TripPlanner::new(generator),
    );

    info!("Starting TripLens {}", triplens::VERSION);
    web::run(&config.server, state).await
}
