//! Planner item CRUD operations and queries.

use jiff::{Timestamp, civil::Date};
use rusqlite::{OptionalExtension, Row, params};

use super::utils::{optional_date_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, ItineraryError, Result},
    models::{PlannerItem, UpdatePlannerItemRequest, validate_date_range},
};

const CHECK_ITINERARY_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM itineraries WHERE id = ?1)";
const GET_NEXT_POSITION_SQL: &str =
    "SELECT COALESCE(MAX(position), -1) + 1 FROM planner_items WHERE itinerary_id = ?1";
const INSERT_ITEM_SQL: &str = "INSERT INTO planner_items (itinerary_id, destination, notes, start_date, end_date, position, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const UPDATE_ITINERARY_TIMESTAMP_SQL: &str = "UPDATE itineraries SET updated_at = ?1 WHERE id = ?2";
const ITEM_COLUMNS: &str = "it.id, it.itinerary_id, it.destination, it.notes, it.start_date, it.end_date, it.position, it.created_at, it.updated_at, EXISTS(SELECT 1 FROM photos p WHERE p.owner_kind = 'planner_item' AND p.owner_id = it.id)";
const SELECT_ITEM_LOCATION_SQL: &str =
    "SELECT itinerary_id, position FROM planner_items WHERE id = ?1";
const UPDATE_ITEM_SQL: &str = "UPDATE planner_items SET destination = ?1, notes = ?2, start_date = ?3, end_date = ?4, updated_at = ?5 WHERE id = ?6";
const DELETE_ITEM_PHOTO_SQL: &str =
    "DELETE FROM photos WHERE owner_kind = 'planner_item' AND owner_id = ?1";
const DELETE_ITEM_SQL: &str = "DELETE FROM planner_items WHERE id = ?1";
const COMPACT_POSITIONS_SQL: &str = "UPDATE planner_items SET position = position - 1 WHERE itinerary_id = ?1 AND position > ?2";

impl super::Database {
    /// Constructs a PlannerItem from a row selected with `ITEM_COLUMNS`.
    fn build_item_from_row(row: &Row) -> rusqlite::Result<PlannerItem> {
        Ok(PlannerItem {
            id: row.get::<_, i64>(0)? as u64,
            itinerary_id: row.get::<_, i64>(1)? as u64,
            destination: row.get(2)?,
            notes: row.get(3)?,
            start_date: optional_date_column(row, 4)?,
            end_date: optional_date_column(row, 5)?,
            position: row.get::<_, i64>(6)? as u32,
            created_at: timestamp_column(row, 7)?,
            updated_at: timestamp_column(row, 8)?,
            has_photo: row.get(9)?,
        })
    }

    /// Creates a planner item owned by the itinerary and appends it to the
    /// end of the itinerary's item collection.
    pub fn add_item(
        &mut self,
        itinerary_id: u64,
        destination: &str,
        start_date: Option<Date>,
        end_date: Option<Date>,
        notes: &str,
    ) -> Result<PlannerItem> {
        validate_date_range(start_date, end_date)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let itinerary_exists: bool = tx
            .query_row(
                CHECK_ITINERARY_EXISTS_SQL,
                params![itinerary_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check itinerary existence")?;

        if !itinerary_exists {
            return Err(ItineraryError::ItineraryNotFound { id: itinerary_id });
        }

        let position: i64 = tx
            .query_row(GET_NEXT_POSITION_SQL, params![itinerary_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to get next item position")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_ITEM_SQL,
            params![
                itinerary_id as i64,
                destination,
                notes,
                start_date.map(|d| d.to_string()),
                end_date.map(|d| d.to_string()),
                position,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert planner item")?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(
            UPDATE_ITINERARY_TIMESTAMP_SQL,
            params![&now_str, itinerary_id as i64],
        )
        .db_context("Failed to update itinerary timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(PlannerItem {
            id,
            itinerary_id,
            destination: destination.into(),
            start_date,
            end_date,
            notes: notes.into(),
            has_photo: false,
            position: position as u32,
            created_at: now,
            updated_at: now,
        })
    }

    /// Lists the items of an itinerary in position order.
    pub fn get_items(&self, itinerary_id: u64) -> Result<Vec<PlannerItem>> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM planner_items it WHERE it.itinerary_id = ?1 ORDER BY it.position"
        );

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let items = stmt
            .query_map(params![itinerary_id as i64], Self::build_item_from_row)
            .db_context("Failed to query planner items")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch planner items");
        items
    }

    /// Retrieves a single planner item by ID.
    pub fn get_item(&self, id: u64) -> Result<Option<PlannerItem>> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM planner_items it WHERE it.id = ?1");

        self.connection
            .query_row(&query, params![id as i64], Self::build_item_from_row)
            .optional()
            .db_context("Failed to query planner item")
    }

    /// Applies a partial update to a planner item and returns the stored
    /// result. The merged date range must not be reversed.
    pub fn update_item(
        &mut self,
        id: u64,
        request: UpdatePlannerItemRequest,
    ) -> Result<PlannerItem> {
        let current = self
            .get_item(id)?
            .ok_or(ItineraryError::PlannerItemNotFound { id })?;

        let destination = request.destination.unwrap_or(current.destination);
        let notes = request.notes.unwrap_or(current.notes);
        let start_date = request.start_date.or(current.start_date);
        let end_date = request.end_date.or(current.end_date);
        validate_date_range(start_date, end_date)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        tx.execute(
            UPDATE_ITEM_SQL,
            params![
                destination,
                notes,
                start_date.map(|d| d.to_string()),
                end_date.map(|d| d.to_string()),
                &now,
                id as i64
            ],
        )
        .db_context("Failed to update planner item")?;

        tx.execute(
            UPDATE_ITINERARY_TIMESTAMP_SQL,
            params![&now, current.itinerary_id as i64],
        )
        .db_context("Failed to update itinerary timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_item(id)?
            .ok_or(ItineraryError::PlannerItemNotFound { id })
    }

    /// Removes a single planner item and its photo. The owning itinerary is
    /// kept and the remaining items close the gap in their positions.
    pub fn delete_item(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let location: Option<(i64, i64)> = tx
            .query_row(SELECT_ITEM_LOCATION_SQL, params![id as i64], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()
            .db_context("Failed to locate planner item")?;

        let Some((itinerary_id, position)) = location else {
            return Err(ItineraryError::PlannerItemNotFound { id });
        };

        tx.execute(DELETE_ITEM_PHOTO_SQL, params![id as i64])
            .db_context("Failed to delete planner item photo")?;
        tx.execute(DELETE_ITEM_SQL, params![id as i64])
            .db_context("Failed to delete planner item")?;
        tx.execute(COMPACT_POSITIONS_SQL, params![itinerary_id, position])
            .db_context("Failed to reorder planner items")?;
        tx.execute(
            UPDATE_ITINERARY_TIMESTAMP_SQL,
            params![Timestamp::now().to_string(), itinerary_id],
        )
        .db_context("Failed to update itinerary timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
