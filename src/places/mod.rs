//! Place search collaborator
//!
//! This module provides the text-search contract used by the image resolver:
//! - `PlaceSearch`: the trait every search backend implements
//! - Response types for the Places `searchText` endpoint
//! - `PhotoUrlTemplate`: turns a photo reference into a servable URL

pub mod google;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::config::PlacesConfig;

pub use google::PlacesClient;

/// Body of a text-search request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub text_query: String,
}

/// Text-search response. Every field is optional upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub places: Vec<Place>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<DisplayName>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub location: Option<LatLng>,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayName {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// Photo reference; `name` is an opaque resource path such as `places/ID/photos/REF`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub name: String,
}

impl SearchResponse {
    /// First photo reference of the first place that has any photos
    #[must_use]
    pub fn first_photo_reference(&self) -> Option<&str> {
        self.places
            .iter()
            .find_map(|place| place.photos.first())
            .map(|photo| photo.name.as_str())
    }
}

/// External text search
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Run one text search. Implementations must reject empty queries without sending them.
    async fn search_text(&self, query: &str) -> Result<SearchResponse>;

    /// Build the servable URL for a photo reference
    fn photo_url(&self, photo_reference: &str) -> String;
}

/// `{base}/{photoResourceName}/media?maxHeightPx=H&maxWidthPx=W&key={apiKey}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUrlTemplate {
    base_url: String,
    max_height_px: u32,
    max_width_px: u32,
    api_key: String,
}

impl PhotoUrlTemplate {
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        max_height_px: u32,
        max_width_px: u32,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_height_px,
            max_width_px,
            api_key: api_key.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &PlacesConfig) -> Self {
        Self::new(
            config.photo_base_url.clone(),
            config.max_height_px,
            config.max_width_px,
            config.api_key.clone().unwrap_or_default(),
        )
    }

    /// The resource name is substituted verbatim.
    #[must_use]
    pub fn render(&self, photo_reference: &str) -> String {
        format!(
            "{}/{}/media?maxHeightPx={}&maxWidthPx={}&key={}",
            self.base_url, photo_reference, self.max_height_px, self.max_width_px, self.api_key
        )
    }
}
