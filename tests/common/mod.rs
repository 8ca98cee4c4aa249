//! Stub collaborators and request helpers shared by the integration tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use triplens::api::AppState;
use triplens::places::{Photo, Place, SearchResponse};
use triplens::{
    ImageResolver, PlaceSearch, QueryCache, TextGenerator, TransportService, TripLensError,
    TripPlanner, web,
};

/// Returns a photo for any query that contains one of the known names
pub struct StubSearch {
    known: Vec<String>,
    pub queries: Mutex<Vec<String>>,
}

impl StubSearch {
    pub fn knowing(names: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            known: names.iter().map(|n| n.to_string()).collect(),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl PlaceSearch for StubSearch {
    async fn search_text(&self, query: &str) -> triplens::Result<SearchResponse> {
        self.queries.lock().unwrap().push(query.to_string());
        let places = self
            .known
            .iter()
            .filter(|name| query.contains(name.as_str()))
            .map(|name| Place {
                photos: vec![Photo {
                    name: format!("places/{}/photos/1", name.replace(' ', "-")),
                }],
                ..Place::default()
            })
            .collect();
        Ok(SearchResponse { places })
    }

    fn photo_url(&self, photo_reference: &str) -> String {
        format!("https://photos.test/{photo_reference}")
    }
}

/// Replies with fixed text, or fails like an unreachable upstream
pub struct StubGenerator {
    reply: Option<String>,
}

impl StubGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_string()),
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self { reply: None })
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, _prompt: &str) -> triplens::Result<String> {
        self.reply
            .clone()
            .ok_or_else(|| TripLensError::transport("upstream unreachable"))
    }
}

pub fn app(search: Arc<StubSearch>, generator: Arc<StubGenerator>) -> axum::Router {
    let resolver = ImageResolver::new(search, Arc::new(QueryCache::new()));
    let state = AppState::new(
        resolver,
        TransportService::new(generator.clone()),
        TripPlanner::new(generator),
    );
    web::app(state, 64)
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("app should handle request");
    let status = response.status();
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("response body should be readable");
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

/// Send a GET request and return `(status, json_body)`; non-JSON bodies come back as null.
pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request build should succeed");
    send(app, request).await
}

/// Send a POST request with a JSON body and return `(status, json_body)`
pub async fn post_json(app: axum::Router, uri: &str, payload: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request build should succeed");
    send(app, request).await
}
