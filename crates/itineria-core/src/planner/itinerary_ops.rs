//! Itinerary operations for the TripPlanner.

use super::TripPlanner;
use crate::{
    error::Result,
    models::{Itinerary, ItineraryFilter, PhotoOwner, UpdateItineraryRequest},
    params::{CreateItinerary, Id, SetPhoto, UpdateItinerary},
};

impl TripPlanner {
    /// Creates a new itinerary. Unset dates default to today.
    pub async fn create_itinerary(&self, params: &CreateItinerary) -> Result<Itinerary> {
        params.validate()?;
        let params = params.clone();

        self.with_database(move |db| {
            db.create_itinerary(
                &params.name,
                &params.description,
                params.start_date,
                params.end_date,
            )
        })
        .await
    }

    /// Retrieves an itinerary with its planner items.
    pub async fn get_itinerary(&self, params: &Id) -> Result<Option<Itinerary>> {
        let id = params.id;
        self.with_database(move |db| db.get_itinerary(id)).await
    }

    /// Lists itineraries, newest first, with optional filtering.
    pub async fn list_itineraries(&self, filter: Option<ItineraryFilter>) -> Result<Vec<Itinerary>> {
        self.with_database(move |db| db.list_itineraries(filter.as_ref()))
            .await
    }

    /// Applies a settings edit to an itinerary.
    pub async fn update_itinerary(&self, params: &UpdateItinerary) -> Result<Itinerary> {
        let id = params.id;
        let request = UpdateItineraryRequest::try_from(params.clone())?;

        self.with_database(move |db| db.update_itinerary(id, request))
            .await
    }

    /// Permanently deletes an itinerary and every planner item it owns.
    pub async fn delete_itinerary_by_id(&self, params: &Id) -> Result<()> {
        let id = params.id;
        self.with_database(move |db| db.delete_itinerary(id)).await
    }

    /// Replaces the photo of an itinerary or planner item.
    pub async fn set_photo(&self, params: SetPhoto) -> Result<()> {
        self.with_database(move |db| db.set_photo(params.owner, &params.data))
            .await
    }

    /// Reads the stored photo of an itinerary or planner item.
    pub async fn photo(&self, owner: PhotoOwner) -> Result<Option<Vec<u8>>> {
        self.with_database(move |db| db.photo(owner)).await
    }

    /// Removes the stored photo of an itinerary or planner item.
    pub async fn clear_photo(&self, owner: PhotoOwner) -> Result<bool> {
        self.with_database(move |db| db.clear_photo(owner)).await
    }
}
