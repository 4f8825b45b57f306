//! Handler operations that return display wrapper types for the TripPlanner.

use super::TripPlanner;
use crate::{
    display::{ItinerarySummaries, PlannerItems},
    error::{ItineraryError, Result},
    models::{Itinerary, ItineraryFilter, ItinerarySummary, PlannerItem},
    params::{DeleteItinerary, Id},
};

impl TripPlanner {
    /// Handle listing itineraries as summaries for list display.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use itineria_core::{params::ListItineraries, TripPlannerBuilder};
    /// # async {
    /// let planner = TripPlannerBuilder::new().build().await?;
    /// let summaries = planner
    ///     .list_itinerary_summaries(&ListItineraries::default())
    ///     .await?;
    /// println!("{summaries}");
    /// # Result::<(), itineria_core::ItineraryError>::Ok(())
    /// # };
    /// ```
    pub async fn list_itinerary_summaries(
        &self,
        params: &crate::params::ListItineraries,
    ) -> Result<ItinerarySummaries> {
        let filter = Some(ItineraryFilter::from(params));
        let itineraries = self.list_itineraries(filter).await?;
        let summaries: Vec<ItinerarySummary> = itineraries.iter().map(Into::into).collect();
        Ok(ItinerarySummaries(summaries))
    }

    /// Handle listing the items of one itinerary.
    ///
    /// Returns `ItineraryError::ItineraryNotFound` when the parent is unknown,
    /// so an empty list always means an itinerary with no items yet.
    pub async fn list_planner_items(&self, params: &Id) -> Result<PlannerItems> {
        let itinerary = self
            .get_itinerary(params)
            .await?
            .ok_or(ItineraryError::ItineraryNotFound { id: params.id })?;

        let items: Vec<PlannerItem> = itinerary.items;
        Ok(PlannerItems(items))
    }

    /// Handle permanently deleting an itinerary with confirmation.
    ///
    /// Uses get-before-delete so the caller can show what was removed.
    /// Returns `None` if the itinerary doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `ItineraryError::InvalidInput` if `confirmed` is false.
    pub async fn delete_itinerary(&self, params: &DeleteItinerary) -> Result<Option<Itinerary>> {
        if !params.confirmed {
            return Err(ItineraryError::invalid_input("confirmed").with_reason(
                "Itinerary deletion removes every planner item and requires explicit confirmation",
            ));
        }

        let id_params = Id { id: params.id };
        let itinerary = self.get_itinerary(&id_params).await?;

        if itinerary.is_some() {
            self.delete_itinerary_by_id(&id_params).await?;
        }

        Ok(itinerary)
    }

    /// Handle removing a planner item, returning what was deleted.
    pub async fn delete_item(&self, params: &Id) -> Result<Option<PlannerItem>> {
        let item = self.get_item(params).await?;

        if item.is_some() {
            self.delete_item_by_id(params).await?;
        }

        Ok(item)
    }
}
