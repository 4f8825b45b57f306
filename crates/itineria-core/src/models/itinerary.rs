//! Itinerary model definition.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

use super::PlannerItem;

/// A trip record owning an ordered collection of planner items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Itinerary {
    /// Unique identifier for the itinerary
    pub id: u64,

    /// Trip name
    pub name: String,

    /// First day of the trip
    pub start_date: Date,

    /// Last day of the trip, never before `start_date`
    pub end_date: Date,

    /// Free-form trip description
    pub description: String,

    /// Whether a cover photo is stored for this itinerary
    #[serde(default)]
    pub has_photo: bool,

    /// Timestamp when the itinerary was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the itinerary or one of its items was last modified (UTC)
    pub updated_at: Timestamp,

    /// Owned planner items, ordered by position
    #[serde(default)]
    pub items: Vec<PlannerItem>,
}

impl Itinerary {
    /// Number of days covered by the trip, counting both ends.
    pub fn duration_days(&self) -> i64 {
        let span = self.end_date - self.start_date;
        i64::from(span.get_days()) + 1
    }
}
