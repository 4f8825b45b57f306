//! Photo ownership for out-of-line blob storage.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of record a stored photo belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhotoOwnerKind {
    /// Itinerary cover photo
    Itinerary,

    /// Planner item photo
    PlannerItem,
}

impl FromStr for PhotoOwnerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "itinerary" | "trip" => Ok(PhotoOwnerKind::Itinerary),
            "planner_item" | "item" => Ok(PhotoOwnerKind::PlannerItem),
            _ => Err(format!("Invalid photo owner: {s}")),
        }
    }
}

impl PhotoOwnerKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PhotoOwnerKind::Itinerary => "itinerary",
            PhotoOwnerKind::PlannerItem => "planner_item",
        }
    }
}

/// Identifies the record whose photo is read or replaced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhotoOwner {
    pub kind: PhotoOwnerKind,
    pub id: u64,
}

impl PhotoOwner {
    pub fn itinerary(id: u64) -> Self {
        Self {
            kind: PhotoOwnerKind::Itinerary,
            id,
        }
    }

    pub fn planner_item(id: u64) -> Self {
        Self {
            kind: PhotoOwnerKind::PlannerItem,
            id,
        }
    }
}
