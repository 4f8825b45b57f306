//! Client for the places API: text search, nearby search and photo fetch.
//!
//! Every public call follows the same failure policy. A malformed URL, a
//! network error, a non-success status or an undecodable body is logged at
//! `warn` and turned into an empty result (or `None` for photos). Callers
//! that need to tell these cases apart use the `try_*` variants.

use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use url::{Url, form_urlencoded};

use crate::{
    config::PlacesConfig,
    error::RemoteError,
    models::{NearbyPlace, Place},
};

pub mod search;

pub use search::PlaceSearch;

/// Search radius for nearby search, in meters.
pub const NEARBY_RADIUS_METERS: u32 = 100;
/// Requested width of fetched photos, in pixels.
pub const PHOTO_MAX_WIDTH: u32 = 400;

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    results: Vec<Place>,
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    results: Vec<NearbyPlaceResult>,
}

#[derive(Debug, Deserialize)]
struct NearbyPlaceResult {
    place_id: String,
    name: String,
    #[serde(default)]
    photos: Option<Vec<PhotoRef>>,
}

#[derive(Debug, Deserialize)]
struct PhotoRef {
    photo_reference: String,
}

impl From<NearbyPlaceResult> for NearbyPlace {
    fn from(result: NearbyPlaceResult) -> Self {
        let photo_reference = result
            .photos
            .and_then(|photos| photos.into_iter().next())
            .map(|photo| photo.photo_reference);

        Self {
            id: result.place_id,
            name: result.name,
            photo_reference,
        }
    }
}

/// HTTP client for the places API.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl PlacesClient {
    /// Creates a client with reqwest's default settings.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_http(Client::new(), base_url, api_key)
    }

    /// Creates a client that shares an existing HTTP connection pool.
    pub fn with_http(http: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Creates a client from the `places` configuration section.
    pub fn from_config(config: &PlacesConfig, timeout: Duration) -> Result<Self, RemoteError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http(http, &config.base_url, &config.api_key))
    }

    /// Builds the text-search URL.
    ///
    /// The query is percent-encoded (a space becomes `%20`); the coordinate
    /// pair is written verbatim as `lat,lng`.
    pub fn text_search_url(&self, query: &str, lat: f64, lng: f64) -> Result<Url, RemoteError> {
        let location = format_location(lat, lng)?;
        let url = format!(
            "{}/textsearch/json?query={}&location={location}&key={}",
            self.base_url,
            encode_component(query),
            encode_component(&self.api_key),
        );
        Ok(Url::parse(&url)?)
    }

    /// Builds the nearby-search URL with the fixed search radius.
    pub fn nearby_search_url(&self, lat: f64, lng: f64) -> Result<Url, RemoteError> {
        let location = format_location(lat, lng)?;
        let url = format!(
            "{}/nearbysearch/json?location={location}&radius={NEARBY_RADIUS_METERS}&key={}",
            self.base_url,
            encode_component(&self.api_key),
        );
        Ok(Url::parse(&url)?)
    }

    /// Builds the photo URL. References that are empty or contain
    /// whitespace or control characters are rejected.
    pub fn photo_url(&self, reference: &str) -> Result<Url, RemoteError> {
        if reference.is_empty()
            || reference
                .chars()
                .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(RemoteError::InvalidUrl(format!(
                "unusable photo reference {reference:?}"
            )));
        }

        let url = format!(
            "{}/photo?maxwidth={PHOTO_MAX_WIDTH}&photoreference={}&key={}",
            self.base_url,
            encode_component(reference),
            encode_component(&self.api_key),
        );
        Ok(Url::parse(&url)?)
    }

    /// Searches places matching `query` around a location.
    pub async fn search_by_text(&self, query: &str, lat: f64, lng: f64) -> Vec<Place> {
        self.try_search_by_text(query, lat, lng)
            .await
            .unwrap_or_else(|e| {
                warn!("Text search for {query:?} failed: {e}");
                Vec::new()
            })
    }

    pub async fn try_search_by_text(
        &self,
        query: &str,
        lat: f64,
        lng: f64,
    ) -> Result<Vec<Place>, RemoteError> {
        let url = self.text_search_url(query, lat, lng)?;
        let body = self.get_bytes(url).await?;
        let response: TextSearchResponse = serde_json::from_slice(&body)?;
        debug!("Text search returned {} places", response.results.len());
        Ok(response.results)
    }

    /// Lists places within the fixed radius of a location.
    pub async fn search_nearby(&self, lat: f64, lng: f64) -> Vec<NearbyPlace> {
        self.try_search_nearby(lat, lng).await.unwrap_or_else(|e| {
            warn!("Nearby search at {lat},{lng} failed: {e}");
            Vec::new()
        })
    }

    pub async fn try_search_nearby(&self, lat: f64, lng: f64) -> Result<Vec<NearbyPlace>, RemoteError> {
        let url = self.nearby_search_url(lat, lng)?;
        let body = self.get_bytes(url).await?;
        let response: NearbySearchResponse = serde_json::from_slice(&body)?;
        debug!("Nearby search returned {} places", response.results.len());
        Ok(response.results.into_iter().map(Into::into).collect())
    }

    /// Downloads a place photo. Returns `None` on any failure, including a
    /// payload that is not a recognised image.
    pub async fn fetch_photo(&self, reference: &str) -> Option<Vec<u8>> {
        match self.try_fetch_photo(reference).await {
            Ok(bytes) => Some(bytes),
            Err(RemoteError::InvalidUrl(reason)) => {
                debug!("Skipping photo fetch: {reason}");
                None
            }
            Err(e) => {
                warn!("Photo fetch failed: {e}");
                None
            }
        }
    }

    pub async fn try_fetch_photo(&self, reference: &str) -> Result<Vec<u8>, RemoteError> {
        let url = self.photo_url(reference)?;
        let body = self.get_bytes(url).await?;

        match image::guess_format(&body) {
            Ok(format) => {
                debug!("Fetched {} byte {format:?} photo", body.len());
                Ok(body)
            }
            Err(_) => Err(RemoteError::NotAnImage),
        }
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, RemoteError> {
        debug!("GET {}", redact_key(&url));

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Percent-encodes a query component, spaces as `%20`.
fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn format_location(lat: f64, lng: f64) -> Result<String, RemoteError> {
    if !lat.is_finite() || !lng.is_finite() {
        return Err(RemoteError::InvalidUrl(format!(
            "coordinates must be finite, got {lat},{lng}"
        )));
    }
    Ok(format!("{lat},{lng}"))
}

/// Renders a URL for logging with the `key` parameter masked.
fn redact_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
