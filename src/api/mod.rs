use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::{
    TripLensError,
    images::ImageResolver,
    itinerary,
    models::{ItineraryDay, ResolvedImage, TripData, TripRecord, TripRequest},
    transport::{TransportLookup, TransportService},
    trip::{TripOverview, TripPlanner, TripView},
};

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub resolver: ImageResolver,
    pub view: TripView,
    pub transport: Arc<TransportService>,
    pub planner: Arc<TripPlanner>,
}

impl AppState {
    pub fn new(
        resolver: ImageResolver,
        transport: TransportService,
        planner: TripPlanner,
    ) -> Self {
        Self {
            view: TripView::new(resolver.clone()),
            resolver,
            transport: Arc::new(transport),
            planner: Arc::new(planner),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cached_images: usize,
}

#[derive(Deserialize)]
pub struct ImageQuery {
    pub name: Option<String>,
    pub context: Option<String>,
}

#[derive(Deserialize)]
pub struct TransportRequest {
    pub source: Option<String>,
    pub destination: Option<String>,
}

fn status_for(err: &TripLensError) -> StatusCode {
    match err {
        TripLensError::Validation { .. } => StatusCode::BAD_REQUEST,
        TripLensError::Transport { .. } | TripLensError::Extraction(_) => StatusCode::BAD_GATEWAY,
        TripLensError::NotFound { .. } => StatusCode::NOT_FOUND,
        TripLensError::Config { .. } => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn reject(err: TripLensError) -> StatusCode {
    warn!("Request failed: {}", err);
    status_for(&err)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/image", get(resolve_image))
        .route("/transport", post(transport_options))
        .route("/itinerary/normalize", post(normalize_itinerary))
        .route("/trips/view", post(view_trip))
        .route("/trips/transport", post(trip_transport))
        .route("/trips/plan", post(plan_trip))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        cached_images: state.resolver.cache().len(),
    })
}

async fn resolve_image(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> Result<Json<ResolvedImage>, StatusCode> {
    let name = query.name.unwrap_or_default();
    let image = state
        .resolver
        .resolve(&name, query.context.as_deref())
        .await
        .map_err(reject)?;
    Ok(Json(image))
}

async fn transport_options(
    State(state): State<AppState>,
    Json(request): Json<TransportRequest>,
) -> Result<Json<TransportLookup>, StatusCode> {
    let lookup = state
        .transport
        .lookup(
            request.source.as_deref().unwrap_or_default(),
            request.destination.as_deref().unwrap_or_default(),
        )
        .await
        .map_err(reject)?;
    Ok(Json(lookup))
}

async fn normalize_itinerary(Json(payload): Json<Value>) -> Json<Vec<ItineraryDay>> {
    Json(itinerary::normalize_value(&payload))
}

async fn view_trip(
    State(state): State<AppState>,
    Json(record): Json<TripRecord>,
) -> Json<TripOverview> {
    Json(state.view.build(&record).await)
}

async fn trip_transport(
    State(state): State<AppState>,
    Json(record): Json<TripRecord>,
) -> Result<Json<TransportLookup>, StatusCode> {
    let lookup = state
        .transport
        .lookup_for_trip(&record)
        .await
        .map_err(reject)?;
    Ok(Json(lookup))
}

async fn plan_trip(
    State(state): State<AppState>,
    Json(request): Json<TripRequest>,
) -> Result<Json<TripData>, StatusCode> {
    let trip = state.planner.plan(&request).await.map_err(reject)?;
    Ok(Json(trip))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use rstest::rstest;

    #[rstest]
    #[case(TripLensError::validation("empty"), StatusCode::BAD_REQUEST)]
    #[case(TripLensError::transport("reset"), StatusCode::BAD_GATEWAY)]
    #[case(ExtractionError::NoJsonFound.into(), StatusCode::BAD_GATEWAY)]
    #[case(TripLensError::config("no key"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(TripLensError::not_found("nothing"), StatusCode::NOT_FOUND)]
    fn test_status_for(#[case] err: TripLensError, #[case] expected: StatusCode) {
        assert_eq!(status_for(&err), expected);
    }
}
