//! Parameter structures for itinerary operations
//!
//! These structures are shared by every interface (the CLI today) and carry
//! no framework-specific derives. Interface layers define their own argument
//! types and convert into these with `From`:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │───▶│  Core Params    │───▶│   TripPlanner   │
//! │  (clap derives) │    │ (minimal deps)  │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ItineraryError, Result},
    models::{
        PhotoOwner, UpdateItineraryRequest, UpdatePlannerItemRequest, requests::require_text,
        validate_date_range,
    },
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new itinerary.
///
/// Unset dates default to today when the itinerary is stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateItinerary {
    pub name: String,
    pub description: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl CreateItinerary {
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_text("description", &self.description)?;
        validate_date_range(self.start_date, self.end_date)
    }
}

/// Parameters for listing itineraries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListItineraries {
    /// Case-insensitive substring of the trip name
    #[serde(default)]
    pub name_contains: Option<String>,
    /// Hide trips that ended before this day
    #[serde(default)]
    pub upcoming_from: Option<Date>,
}

/// Parameters for updating an itinerary's settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateItinerary {
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl TryFrom<UpdateItinerary> for UpdateItineraryRequest {
    type Error = ItineraryError;

    fn try_from(params: UpdateItinerary) -> Result<Self> {
        if let Some(name) = &params.name {
            require_text("name", name)?;
        }
        if let Some(description) = &params.description {
            require_text("description", description)?;
        }
        validate_date_range(params.start_date, params.end_date)?;

        let request = Self {
            name: params.name,
            description: params.description,
            start_date: params.start_date,
            end_date: params.end_date,
        };
        if request.is_empty() {
            return Err(ItineraryError::invalid_input("update")
                .with_reason("Nothing to update; give a name, description or date"));
        }
        Ok(request)
    }
}

/// Parameters for permanently deleting an itinerary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteItinerary {
    pub id: u64,
    /// Must be true; deletion also removes every planner item
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for adding a planner item to an itinerary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddPlannerItem {
    pub itinerary_id: u64,
    #[serde(default)]
    pub destination: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    #[serde(default)]
    pub notes: String,
}

impl AddPlannerItem {
    pub fn validate(&self) -> Result<()> {
        validate_date_range(self.start_date, self.end_date)
    }
}

/// Parameters for updating a planner item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlannerItem {
    pub id: u64,
    pub destination: Option<String>,
    pub notes: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl TryFrom<UpdatePlannerItem> for UpdatePlannerItemRequest {
    type Error = ItineraryError;

    fn try_from(params: UpdatePlannerItem) -> Result<Self> {
        validate_date_range(params.start_date, params.end_date)?;

        let request = Self {
            destination: params.destination,
            notes: params.notes,
            start_date: params.start_date,
            end_date: params.end_date,
        };
        if request.is_empty() {
            return Err(ItineraryError::invalid_input("update")
                .with_reason("Nothing to update; give a destination, notes or date"));
        }
        Ok(request)
    }
}

/// Parameters for replacing the photo of an itinerary or planner item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPhoto {
    pub owner: PhotoOwner,
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_create_itinerary_requires_name() {
        let params = CreateItinerary {
            name: "   ".to_string(),
            description: "Somewhere warm".to_string(),
            ..Default::default()
        };

        let err = params.validate().unwrap_err();
        assert!(matches!(err, ItineraryError::InvalidInput { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_create_itinerary_requires_description() {
        let params = CreateItinerary {
            name: "Bali".to_string(),
            description: String::new(),
            ..Default::default()
        };

        let err = params.validate().unwrap_err();
        assert!(
            matches!(err, ItineraryError::InvalidInput { ref field, .. } if field == "description")
        );
    }

    #[test]
    fn test_create_itinerary_rejects_reversed_dates() {
        let params = CreateItinerary {
            name: "Bali".to_string(),
            description: "Beach".to_string(),
            start_date: Some(date(2024, 5, 10)),
            end_date: Some(date(2024, 5, 1)),
        };

        assert!(params.validate().is_err());
    }

    #[test]
    fn test_update_itinerary_conversion() {
        let params = UpdateItinerary {
            id: 3,
            name: Some("Renamed".to_string()),
            end_date: Some(date(2024, 6, 1)),
            ..Default::default()
        };

        let request: UpdateItineraryRequest = params.try_into().unwrap();
        assert_eq!(request.name.as_deref(), Some("Renamed"));
        assert_eq!(request.end_date, Some(date(2024, 6, 1)));
        assert!(request.description.is_none());
    }

    #[test]
    fn test_update_itinerary_rejects_blank_name() {
        let params = UpdateItinerary {
            id: 3,
            name: Some(String::new()),
            ..Default::default()
        };

        let result: Result<UpdateItineraryRequest> = params.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_add_planner_item_allows_missing_dates() {
        let params = AddPlannerItem {
            itinerary_id: 1,
            destination: "Kyoto".to_string(),
            ..Default::default()
        };

        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_update_planner_item_rejects_reversed_dates() {
        let params = UpdatePlannerItem {
            id: 1,
            start_date: Some(date(2024, 2, 2)),
            end_date: Some(date(2024, 2, 1)),
            ..Default::default()
        };

        let result: Result<UpdatePlannerItemRequest> = params.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_updates_are_rejected() {
        let trip: Result<UpdateItineraryRequest> = UpdateItinerary {
            id: 3,
            ..Default::default()
        }
        .try_into();
        assert!(matches!(
            trip,
            Err(ItineraryError::InvalidInput { ref field, .. }) if field == "update"
        ));

        let item: Result<UpdatePlannerItemRequest> = UpdatePlannerItem {
            id: 1,
            ..Default::default()
        }
        .try_into();
        assert!(matches!(item, Err(ItineraryError::InvalidInput { .. })));
    }
}
