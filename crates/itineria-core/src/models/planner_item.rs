//! Planner item model definition.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

/// A single destination entry within an itinerary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannerItem {
    /// Unique identifier for the item
    pub id: u64,

    /// ID of the owning itinerary
    pub itinerary_id: u64,

    /// Destination name
    pub destination: String,

    /// Optional arrival date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,

    /// Optional departure date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,

    /// Free-form notes
    pub notes: String,

    /// Whether a photo is stored for this item
    #[serde(default)]
    pub has_photo: bool,

    /// Position of the item within the itinerary (0-indexed)
    pub position: u32,

    /// Timestamp when the item was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the item was last updated (UTC)
    pub updated_at: Timestamp,
}
