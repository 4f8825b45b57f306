//! Places returned by the places API.
//!
//! These are transient: they live for the duration of a search session and
//! are never written to the store.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Recommended viewport for displaying a place.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub northeast: Location,
    pub southwest: Location,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Geometry {
    pub location: Location,
    pub viewport: Viewport,
}

/// A text-search result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    /// Provider identifier
    #[serde(rename = "place_id")]
    pub id: String,
    pub name: String,
    pub formatted_address: String,
    pub geometry: Geometry,
}

impl Place {
    pub fn location(&self) -> Location {
        self.geometry.location
    }
}

/// A nearby-search result reduced to what the carousel needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NearbyPlace {
    pub id: String,
    pub name: String,
    /// Reference of the first photo the provider listed, if any
    pub photo_reference: Option<String>,
}
