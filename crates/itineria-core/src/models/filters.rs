//! Filter types for querying itineraries.

use jiff::civil::Date;

/// Filter options for querying itineraries.
#[derive(Debug, Clone, Default)]
pub struct ItineraryFilter {
    /// Filter by trip name (case-insensitive partial match)
    pub name_contains: Option<String>,

    /// Only trips that are still running on or after this day
    pub ends_on_or_after: Option<Date>,
}

impl ItineraryFilter {
    /// Filter matching trip names that contain `needle`.
    ///
    /// ```rust
    /// use itineria_core::models::ItineraryFilter;
    ///
    /// let filter = ItineraryFilter::by_name("tokyo");
    /// assert_eq!(filter.name_contains.as_deref(), Some("tokyo"));
    /// ```
    pub fn by_name(needle: impl Into<String>) -> Self {
        Self {
            name_contains: Some(needle.into()),
            ..Default::default()
        }
    }
}

impl From<&crate::params::ListItineraries> for ItineraryFilter {
    fn from(params: &crate::params::ListItineraries) -> Self {
        Self {
            name_contains: params
                .name_contains
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            ends_on_or_after: params.upcoming_from,
        }
    }
}
