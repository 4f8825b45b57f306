//! Planner item operations for the TripPlanner.

use super::TripPlanner;
use crate::{
    error::Result,
    models::{PlannerItem, UpdatePlannerItemRequest},
    params::{AddPlannerItem, Id, UpdatePlannerItem},
};

impl TripPlanner {
    /// Appends a new planner item to an itinerary.
    pub async fn add_item(&self, params: &AddPlannerItem) -> Result<PlannerItem> {
        params.validate()?;
        let params = params.clone();

        self.with_database(move |db| {
            db.add_item(
                params.itinerary_id,
                &params.destination,
                params.start_date,
                params.end_date,
                &params.notes,
            )
        })
        .await
    }

    /// Lists the planner items of an itinerary in position order.
    pub async fn get_items(&self, params: &Id) -> Result<Vec<PlannerItem>> {
        let itinerary_id = params.id;
        self.with_database(move |db| db.get_items(itinerary_id))
            .await
    }

    /// Retrieves a single planner item.
    pub async fn get_item(&self, params: &Id) -> Result<Option<PlannerItem>> {
        let id = params.id;
        self.with_database(move |db| db.get_item(id)).await
    }

    /// Applies a partial update to a planner item.
    pub async fn update_item(&self, params: &UpdatePlannerItem) -> Result<PlannerItem> {
        let id = params.id;
        let request = UpdatePlannerItemRequest::try_from(params.clone())?;

        self.with_database(move |db| db.update_item(id, request))
            .await
    }

    /// Removes a single planner item; its itinerary is kept.
    pub async fn delete_item_by_id(&self, params: &Id) -> Result<()> {
        let id = params.id;
        self.with_database(move |db| db.delete_item(id)).await
    }
}
