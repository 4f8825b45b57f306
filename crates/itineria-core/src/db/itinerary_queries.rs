//! Itinerary CRUD operations and queries.

use jiff::{Timestamp, Zoned, civil::Date};
use rusqlite::{OptionalExtension, Row, params};

use super::utils::{date_column, name_matches, timestamp_column};
use crate::{
    error::{DatabaseResultExt, ItineraryError, Result},
    models::{
        Itinerary, ItineraryFilter, UpdateItineraryRequest, requests::require_text,
        validate_date_range,
    },
};

const INSERT_ITINERARY_SQL: &str = "INSERT INTO itineraries (name, description, start_date, end_date, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const ITINERARY_COLUMNS: &str = "i.id, i.name, i.description, i.start_date, i.end_date, i.created_at, i.updated_at, EXISTS(SELECT 1 FROM photos p WHERE p.owner_kind = 'itinerary' AND p.owner_id = i.id)";
const CHECK_ITINERARY_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM itineraries WHERE id = ?1)";
const SELECT_ITINERARY_FIELDS_SQL: &str =
    "SELECT name, description, start_date, end_date FROM itineraries WHERE id = ?1";
const UPDATE_ITINERARY_SQL: &str = "UPDATE itineraries SET name = ?1, description = ?2, start_date = ?3, end_date = ?4, updated_at = ?5 WHERE id = ?6";
const DELETE_ITEM_PHOTOS_SQL: &str = "DELETE FROM photos WHERE owner_kind = 'planner_item' AND owner_id IN (SELECT id FROM planner_items WHERE itinerary_id = ?1)";
const DELETE_ITINERARY_PHOTO_SQL: &str =
    "DELETE FROM photos WHERE owner_kind = 'itinerary' AND owner_id = ?1";
const DELETE_ITINERARY_ITEMS_SQL: &str = "DELETE FROM planner_items WHERE itinerary_id = ?1";
const DELETE_ITINERARY_SQL: &str = "DELETE FROM itineraries WHERE id = ?1";

/// Today's date in the system time zone.
pub(crate) fn today() -> Date {
    Zoned::now().date()
}

impl super::Database {
    /// Constructs an Itinerary (without items) from a row selected with
    /// `ITINERARY_COLUMNS`.
    fn build_itinerary_from_row(row: &Row) -> rusqlite::Result<Itinerary> {
        Ok(Itinerary {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            description: row.get(2)?,
            start_date: date_column(row, 3)?,
            end_date: date_column(row, 4)?,
            created_at: timestamp_column(row, 5)?,
            updated_at: timestamp_column(row, 6)?,
            has_photo: row.get(7)?,
            items: Vec::new(),
        })
    }

    /// Creates a new itinerary with an empty item collection.
    ///
    /// A missing start date defaults to today. A missing end date defaults to
    /// the later of the start date and today, so the stored range is never
    /// reversed.
    pub fn create_itinerary(
        &mut self,
        name: &str,
        description: &str,
        start_date: Option<Date>,
        end_date: Option<Date>,
    ) -> Result<Itinerary> {
        require_text("name", name)?;
        require_text("description", description)?;

        let today = today();
        let start_date = start_date.unwrap_or(today);
        let end_date = end_date.unwrap_or_else(|| start_date.max(today));
        validate_date_range(Some(start_date), Some(end_date))?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_ITINERARY_SQL,
            params![
                name,
                description,
                start_date.to_string(),
                end_date.to_string(),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert itinerary")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Itinerary {
            id,
            name: name.into(),
            start_date,
            end_date,
            description: description.into(),
            has_photo: false,
            created_at: now,
            updated_at: now,
            items: Vec::new(),
        })
    }

    /// Retrieves an itinerary by its ID with its items eagerly loaded.
    pub fn get_itinerary(&self, id: u64) -> Result<Option<Itinerary>> {
        let query = format!("SELECT {ITINERARY_COLUMNS} FROM itineraries i WHERE i.id = ?1");

        let mut itinerary = self
            .connection
            .query_row(&query, params![id as i64], Self::build_itinerary_from_row)
            .optional()
            .db_context("Failed to query itinerary")?;

        if let Some(ref mut itinerary) = itinerary {
            itinerary.items = self.get_items(itinerary.id)?;
        }

        Ok(itinerary)
    }

    /// Lists itineraries, newest first, with optional filtering.
    pub fn list_itineraries(&self, filter: Option<&ItineraryFilter>) -> Result<Vec<Itinerary>> {
        let mut query = format!("SELECT {ITINERARY_COLUMNS} FROM itineraries i");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(ref day) = f.ends_on_or_after {
                conditions.push("i.end_date >= ?");
                params_vec.push(Box::new(day.to_string()));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        // Newest first; rowids grow with insertion order.
        query.push_str(" ORDER BY i.id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let mut itineraries: Vec<Itinerary> = stmt
            .query_map(&params_refs[..], Self::build_itinerary_from_row)
            .db_context("Failed to query itineraries")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch itineraries")?;

        if let Some(needle) = filter.and_then(|f| f.name_contains.as_deref()) {
            itineraries.retain(|itinerary| name_matches(&itinerary.name, needle));
        }

        for itinerary in &mut itineraries {
            itinerary.items = self.get_items(itinerary.id)?;
        }

        Ok(itineraries)
    }

    /// Applies a settings edit to an itinerary and returns the stored result.
    pub fn update_itinerary(
        &mut self,
        id: u64,
        request: UpdateItineraryRequest,
    ) -> Result<Itinerary> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current: Option<(String, String, String, String)> = tx
            .query_row(SELECT_ITINERARY_FIELDS_SQL, params![id as i64], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })
            .optional()
            .db_context("Failed to load itinerary for update")?;

        let Some((name, description, start, end)) = current else {
            return Err(ItineraryError::ItineraryNotFound { id });
        };

        let name = request.name.unwrap_or(name);
        let description = request.description.unwrap_or(description);
        require_text("name", &name)?;
        require_text("description", &description)?;

        let start_date = match request.start_date {
            Some(date) => date,
            None => parse_stored_date("start_date", &start)?,
        };
        let end_date = match request.end_date {
            Some(date) => date,
            None => parse_stored_date("end_date", &end)?,
        };
        validate_date_range(Some(start_date), Some(end_date))?;

        let now = Timestamp::now().to_string();
        tx.execute(
            UPDATE_ITINERARY_SQL,
            params![
                name,
                description,
                start_date.to_string(),
                end_date.to_string(),
                &now,
                id as i64
            ],
        )
        .db_context("Failed to update itinerary")?;

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_itinerary(id)?
            .ok_or(ItineraryError::ItineraryNotFound { id })
    }

    /// Permanently deletes an itinerary together with every planner item it
    /// owns and all of their photos. Runs as a single transaction, so either
    /// everything goes or nothing does.
    pub fn delete_itinerary(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_ITINERARY_EXISTS_SQL, params![id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check itinerary existence")?;

        if !exists {
            return Err(ItineraryError::ItineraryNotFound { id });
        }

        // Photos are keyed by owner, not foreign keys, so they go first.
        tx.execute(DELETE_ITEM_PHOTOS_SQL, params![id as i64])
            .db_context("Failed to delete planner item photos")?;
        tx.execute(DELETE_ITINERARY_PHOTO_SQL, params![id as i64])
            .db_context("Failed to delete itinerary photo")?;
        tx.execute(DELETE_ITINERARY_ITEMS_SQL, params![id as i64])
            .db_context("Failed to delete planner items")?;
        tx.execute(DELETE_ITINERARY_SQL, params![id as i64])
            .db_context("Failed to delete itinerary")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Returns true when an itinerary with this ID exists.
    pub fn itinerary_exists(&self, id: u64) -> Result<bool> {
        self.connection
            .query_row(CHECK_ITINERARY_EXISTS_SQL, params![id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check itinerary existence")
    }
}

fn parse_stored_date(field: &str, value: &str) -> Result<Date> {
    value.parse::<Date>().map_err(|e| {
        ItineraryError::invalid_input(field).with_reason(format!("Stored date '{value}': {e}"))
    })
}
