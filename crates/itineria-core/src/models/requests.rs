//! Request types for updating models.

use jiff::civil::Date;

use crate::error::{ItineraryError, Result};

/// Partial update of an itinerary's settings.
#[derive(Debug, Clone, Default)]
pub struct UpdateItineraryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl UpdateItineraryRequest {
    /// Returns true when the request would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

/// Partial update of a planner item.
#[derive(Debug, Clone, Default)]
pub struct UpdatePlannerItemRequest {
    pub destination: Option<String>,
    pub notes: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl UpdatePlannerItemRequest {
    /// Returns true when the request would not change anything.
    pub fn is_empty(&self) -> bool {
        self.destination.is_none()
            && self.notes.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

/// Rejects an end date that falls before the start date.
///
/// Either bound may be absent, in which case there is nothing to check.
///
/// ```rust
/// use itineria_core::models::validate_date_range;
/// use jiff::civil::date;
///
/// assert!(validate_date_range(Some(date(2024, 1, 1)), Some(date(2024, 1, 1))).is_ok());
/// assert!(validate_date_range(Some(date(2024, 1, 2)), Some(date(2024, 1, 1))).is_err());
/// assert!(validate_date_range(None, Some(date(2024, 1, 1))).is_ok());
/// ```
pub fn validate_date_range(start: Option<Date>, end: Option<Date>) -> Result<()> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(ItineraryError::invalid_input("end_date")
            .with_reason(format!("End date {end} is before start date {start}"))),
        _ => Ok(()),
    }
}

/// Rejects blank values for required text fields.
pub(crate) fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ItineraryError::invalid_input(field).with_reason("must not be empty"));
    }
    Ok(())
}
