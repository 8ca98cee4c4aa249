use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::fallback::fallback_image_url;
use super::strategy::plan_attempts;
use crate::cache::{CacheKey, QueryCache};
use crate::models::{ImageOrigin, Resolution, ResolvedImage};
use crate::places::PlaceSearch;
use crate::{Result, TripLensError};

/// Turns a hotel or place name into a photo URL.
///
/// Search attempts run one at a time and stop at the first result with a photo.
/// Successful lookups are cached under the name/context key; fallback images are not.
/// Concurrent resolutions of the same key may both search; the later write wins.
#[derive(Clone)]
pub struct ImageResolver {
    search: Arc<dyn PlaceSearch>,
    cache: Arc<QueryCache>,
}

impl ImageResolver {
    pub fn new(search: Arc<dyn PlaceSearch>, cache: Arc<QueryCache>) -> Self {
        Self { search, cache }
    }

    /// Resolver backed by the process-wide cache
    pub fn with_global_cache(search: Arc<dyn PlaceSearch>) -> Self {
        Self::new(search, crate::cache::global())
    }

    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Resolve a name to an image URL. Only an empty name is an error.
    pub async fn resolve(&self, primary: &str, context: Option<&str>) -> Result<ResolvedImage> {
        self.resolve_detailed(primary, context)
            .await
            .map(|resolution| resolution.image)
    }

    /// Like [`resolve`](Self::resolve) but also reports where the image came from.
    #[instrument(name = "resolve_image", skip(self))]
    pub async fn resolve_detailed(
        &self,
        primary: &str,
        context: Option<&str>,
    ) -> Result<Resolution> {
        if primary.trim().is_empty() {
            return Err(TripLensError::validation("Name to resolve cannot be empty"));
        }

        let key = CacheKey::new(primary, context);
        if let Some(image) = self.cache.get(&key) {
            debug!("Serving image from cache");
            return Ok(Resolution {
                image,
                origin: ImageOrigin::Cache,
            });
        }

        match self.search_photo(primary, context).await {
            Ok((attempt, image)) => {
                self.cache.put(key, image.clone());
                Ok(Resolution {
                    image,
                    origin: ImageOrigin::Search { attempt },
                })
            }
            Err(e) => {
                info!("Using fallback image: {}", e);
                Ok(Resolution {
                    image: ResolvedImage::new(fallback_image_url(primary)),
                    origin: ImageOrigin::Fallback,
                })
            }
        }
    }

    /// Walk the attempt list; returns the 1-based attempt number that produced a photo.
    async fn search_photo(
        &self,
        primary: &str,
        context: Option<&str>,
    ) -> Result<(usize, ResolvedImage)> {
        for (index, attempt) in plan_attempts(primary, context).into_iter().enumerate() {
            let number = index + 1;
            match self.search.search_text(&attempt.query).await {
                Ok(response) => match response.first_photo_reference() {
                    Some(reference) => {
                        debug!(
                            "Attempt {} ({}) found a photo for '{}'",
                            number, attempt.strategy, attempt.query
                        );
                        return Ok((number, ResolvedImage::new(self.search.photo_url(reference))));
                    }
                    None => debug!(
                        "Attempt {} ({}) returned no photos for '{}'",
                        number, attempt.strategy, attempt.query
                    ),
                },
                Err(e) => warn!(
                    "Attempt {} ({}) failed for '{}': {}",
                    number, attempt.strategy, attempt.query, e
                ),
            }
        }

        Err(TripLensError::not_found(format!("No photo found for '{primary}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::fallback::DEFAULT_IMAGE;
    use crate::places::{Photo, Place, SearchResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers each call from a script; records the queries it saw.
    struct ScriptedSearch {
        script: Mutex<Vec<Result<SearchResponse>>>,
        queries: Mutex<Vec<String>>,
    }

    impl ScriptedSearch {
        fn new(script: Vec<Result<SearchResponse>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into_iter().rev().collect()),
                queries: Mutex::new(Vec::new()),
            })
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PlaceSearch for ScriptedSearch {
        async fn search_text(&self, query: &str) -> Result<SearchResponse> {
            self.queries.lock().unwrap().push(query.to_string());
            self.script
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(SearchResponse::default()))
        }

        fn photo_url(&self, photo_reference: &str) -> String {
            format!("https://photos.test/{photo_reference}")
        }
    }

    fn with_photo(reference: &str) -> Result<SearchResponse> {
        Ok(SearchResponse {
            places: vec![Place {
                photos: vec![
                    Photo { name: reference.to_string() },
                    Photo { name: "second".to_string() },
                ],
                ..Place::default()
            }],
        })
    }

    fn empty() -> Result<SearchResponse> {
        Ok(SearchResponse::default())
    }

    fn failure() -> Result<SearchResponse> {
        Err(TripLensError::transport("connection reset"))
    }

    fn resolver(search: Arc<ScriptedSearch>) -> ImageResolver {
        ImageResolver::new(search, Arc::new(QueryCache::new()))
    }

    #[tokio::test]
    async fn test_first_attempt_success() {
        let search = ScriptedSearch::new(vec![with_photo("p1")]);
        let resolver = resolver(Arc::clone(&search));

        let resolution = resolver
            .resolve_detailed("Gateway of India", Some("Mumbai"))
            .await
            .unwrap();

        assert_eq!(resolution.image.url, "https://photos.test/p1");
        assert_eq!(resolution.origin, ImageOrigin::Search { attempt: 1 });
        assert_eq!(search.queries(), ["Gateway of India Mumbai"]);
    }

    #[tokio::test]
    async fn test_call_count_matches_successful_attempt() {
        for n in 1..=3 {
            let mut script: Vec<Result<SearchResponse>> = (1..n).map(|_| empty()).collect();
            script.push(with_photo("hit"));
            let search = ScriptedSearch::new(script);
            let resolver = resolver(Arc::clone(&search));

            let image = resolver.resolve("Amber Fort", Some("Jaipur")).await.unwrap();

            assert_eq!(image.url, "https://photos.test/hit");
            assert_eq!(search.queries().len(), n);
        }
    }

    #[tokio::test]
    async fn test_transport_errors_fall_through_to_next_attempt() {
        let search = ScriptedSearch::new(vec![failure(), with_photo("p2")]);
        let resolver = resolver(Arc::clone(&search));

        let resolution = resolver
            .resolve_detailed("Amber Fort", Some("Jaipur"))
            .await
            .unwrap();

        assert_eq!(resolution.origin, ImageOrigin::Search { attempt: 2 });
        assert_eq!(search.queries(), ["Amber Fort Jaipur", "Amber Fort"]);
    }

    #[tokio::test]
    async fn test_empty_name_makes_no_calls() {
        let search = ScriptedSearch::new(vec![with_photo("p1")]);
        let resolver = resolver(Arc::clone(&search));

        let err = resolver.resolve("", Some("Goa")).await.unwrap_err();
        assert!(err.is_validation());
        let err = resolver.resolve("   ", None).await.unwrap_err();
        assert!(err.is_validation());
        assert!(search.queries().is_empty());
    }

    #[tokio::test]
    async fn test_second_resolution_is_cache_hit() {
        let search = ScriptedSearch::new(vec![with_photo("p1")]);
        let resolver = resolver(Arc::clone(&search));

        let first = resolver.resolve("Red Fort", Some("Delhi")).await.unwrap();
        let second = resolver
            .resolve_detailed("Red Fort", Some("Delhi"))
            .await
            .unwrap();

        assert_eq!(first, second.image);
        assert_eq!(second.origin, ImageOrigin::Cache);
        assert_eq!(search.queries().len(), 1);
    }

    #[tokio::test]
    async fn test_different_context_is_not_deduplicated() {
        let search = ScriptedSearch::new(vec![with_photo("a"), with_photo("b")]);
        let resolver = resolver(Arc::clone(&search));

        resolver.resolve("Central Park", Some("New York")).await.unwrap();
        resolver.resolve("Central Park", Some("Kolkata")).await.unwrap();

        assert_eq!(search.queries().len(), 2);
        assert_eq!(resolver.cache().len(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_attempts_use_category_fallback() {
        let search = ScriptedSearch::new(vec![empty(), failure(), empty()]);
        let resolver = resolver(Arc::clone(&search));

        let resolution = resolver
            .resolve_detailed("Kashi Vishwanath Temple", Some("Varanasi"))
            .await
            .unwrap();

        assert!(resolution.is_fallback());
        assert!(resolution.image.url.contains("photo-1509516425643"));
        assert_eq!(search.queries().len(), 3);
        assert_eq!(search.queries()[2], "Kashi Vishwanath Temple landmark");
        assert!(resolver.cache().is_empty());
    }

    #[tokio::test]
    async fn test_fallback_is_not_cached() {
        let search = ScriptedSearch::new(vec![empty(), empty(), with_photo("late")]);
        let resolver = resolver(Arc::clone(&search));

        let first = resolver.resolve("Unknown Spot", None).await.unwrap();
        assert_eq!(first.url, DEFAULT_IMAGE);

        let second = resolver.resolve("Unknown Spot", None).await.unwrap();
        assert_eq!(second.url, "https://photos.test/late");
        assert_eq!(search.queries().len(), 3);
    }

    #[tokio::test]
    async fn test_lodging_names_disambiguate_with_hotel() {
        let search = ScriptedSearch::new(vec![empty(), with_photo("h")]);
        let resolver = resolver(Arc::clone(&search));

        resolver.resolve("Windamere Hotel", None).await.unwrap();

        assert_eq!(search.queries(), ["Windamere Hotel", "Windamere Hotel hotel"]);
    }
}
