//! Itinerary summary types.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

use super::Itinerary;

/// Summary information about an itinerary with item statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItinerarySummary {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub start_date: Date,
    pub end_date: Date,
    pub has_photo: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Number of planner items in the itinerary
    pub total_items: u32,
    /// Number of planner items with both dates scheduled
    pub scheduled_items: u32,
}

impl From<&Itinerary> for ItinerarySummary {
    fn from(itinerary: &Itinerary) -> Self {
        let total_items = itinerary.items.len() as u32;
        let scheduled_items = itinerary
            .items
            .iter()
            .filter(|item| item.start_date.is_some() && item.end_date.is_some())
            .count() as u32;

        Self {
            id: itinerary.id,
            name: itinerary.name.clone(),
            description: itinerary.description.clone(),
            start_date: itinerary.start_date,
            end_date: itinerary.end_date,
            has_photo: itinerary.has_photo,
            created_at: itinerary.created_at,
            updated_at: itinerary.updated_at,
            total_items,
            scheduled_items,
        }
    }
}
