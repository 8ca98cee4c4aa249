use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use super::{PhotoUrlTemplate, PlaceSearch, SearchRequest, SearchResponse};
use crate::config::PlacesConfig;
use crate::{Result, TripLensError};

const FIELD_MASK: &str =
    "places.photos,places.displayName,places.id,places.formattedAddress,places.location";

/// Google Places (New) text-search client
pub struct PlacesClient {
    client: Client,
    api_key: Option<String>,
    search_url: String,
    photos: PhotoUrlTemplate,
}

impl PlacesClient {
    /// Create a new client
    pub fn new(config: &PlacesConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TripLens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripLensError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            search_url: format!("{}/places:searchText", config.base_url.trim_end_matches('/')),
            photos: PhotoUrlTemplate::from_config(config),
        })
    }
}

#[async_trait]
impl PlaceSearch for PlacesClient {
    #[instrument(name = "places_search", skip(self))]
    async fn search_text(&self, query: &str) -> Result<SearchResponse> {
        // The endpoint answers 400 for an empty textQuery.
        if query.trim().is_empty() {
            return Err(TripLensError::validation("Search query cannot be empty"));
        }
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TripLensError::config("Places API key is not configured"))?;

        let response = self
            .client
            .post(&self.search_url)
            .header("X-Goog-Api-Key", api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&SearchRequest {
                text_query: query.to_string(),
            })
            .send()
            .await
            .map_err(|e| TripLensError::transport(format!("Places request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return Err(match status.as_u16() {
                400 => TripLensError::transport(format!(
                    "Places API rejected the query: {error_text}"
                )),
                401 | 403 => {
                    TripLensError::transport("Invalid or missing Places API key".to_string())
                }
                429 => TripLensError::transport("Places API rate limit exceeded".to_string()),
                _ => TripLensError::transport(format!("Places API error {status}: {error_text}")),
            });
        }

        let search_response: SearchResponse = response.json().await.map_err(|e| {
            TripLensError::transport(format!("Failed to parse Places response: {e}"))
        })?;

        debug!("Places returned {} results", search_response.places.len());
        Ok(search_response)
    }

    fn photo_url(&self, photo_reference: &str) -> String {
        self.photos.render(photo_reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = PlacesConfig::default();
        let client = PlacesClient::new(&config).unwrap();
        assert_eq!(client.search_url, "https://places.googleapis.com/v1/places:searchText");
    }

    #[test]
    fn test_photo_url_uses_configured_dimensions() {
        let config = PlacesConfig {
            api_key: Some("abc123".to_string()),
            max_height_px: 400,
            max_width_px: 600,
            ..PlacesConfig::default()
        };
        let client = PlacesClient::new(&config).unwrap();
        assert_eq!(
            client.photo_url("places/p/photos/q"),
            "https://places.googleapis.com/v1/places/p/photos/q/media?maxHeightPx=400&maxWidthPx=600&key=abc123"
        );
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected_before_sending() {
        let client = PlacesClient::new(&PlacesConfig::default()).unwrap();
        let err = client.search_text("   ").await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_request() {
        let client = PlacesClient::new(&PlacesConfig::default()).unwrap();
        let err = client.search_text("Taj Mahal").await.unwrap_err();
        assert!(matches!(err, TripLensError::Config { .. }));
    }
}
