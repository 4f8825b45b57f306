//! Out-of-line photo storage for itineraries and planner items.

use jiff::Timestamp;
use rusqlite::{OptionalExtension, params};

use crate::{
    error::{DatabaseResultExt, ItineraryError, Result},
    models::{PhotoOwner, PhotoOwnerKind},
};

const CHECK_ITINERARY_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM itineraries WHERE id = ?1)";
const CHECK_ITEM_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM planner_items WHERE id = ?1)";
const UPSERT_PHOTO_SQL: &str = "INSERT INTO photos (owner_kind, owner_id, data, byte_len, updated_at) VALUES (?1, ?2, ?3, ?4, ?5) \
     ON CONFLICT (owner_kind, owner_id) DO UPDATE SET data = excluded.data, byte_len = excluded.byte_len, updated_at = excluded.updated_at";
const SELECT_PHOTO_SQL: &str = "SELECT data FROM photos WHERE owner_kind = ?1 AND owner_id = ?2";
const DELETE_PHOTO_SQL: &str = "DELETE FROM photos WHERE owner_kind = ?1 AND owner_id = ?2";
const TOUCH_ITINERARY_SQL: &str = "UPDATE itineraries SET updated_at = ?1 WHERE id = ?2";
const TOUCH_ITEM_SQL: &str = "UPDATE planner_items SET updated_at = ?1 WHERE id = ?2";

impl super::Database {
    /// Replaces the photo of an itinerary or planner item.
    pub fn set_photo(&mut self, owner: PhotoOwner, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Err(ItineraryError::invalid_input("photo").with_reason("photo data is empty"));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let (exists_sql, touch_sql) = match owner.kind {
            PhotoOwnerKind::Itinerary => (CHECK_ITINERARY_EXISTS_SQL, TOUCH_ITINERARY_SQL),
            PhotoOwnerKind::PlannerItem => (CHECK_ITEM_EXISTS_SQL, TOUCH_ITEM_SQL),
        };

        let exists: bool = tx
            .query_row(exists_sql, params![owner.id as i64], |row| row.get(0))
            .db_context("Failed to check photo owner existence")?;

        if !exists {
            return Err(not_found(owner));
        }

        let now = Timestamp::now().to_string();
        tx.execute(
            UPSERT_PHOTO_SQL,
            params![
                owner.kind.as_str(),
                owner.id as i64,
                data,
                data.len() as i64,
                &now
            ],
        )
        .db_context("Failed to store photo")?;

        tx.execute(touch_sql, params![&now, owner.id as i64])
            .db_context("Failed to update photo owner timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Reads the stored photo bytes, if any.
    pub fn photo(&self, owner: PhotoOwner) -> Result<Option<Vec<u8>>> {
        self.connection
            .query_row(
                SELECT_PHOTO_SQL,
                params![owner.kind.as_str(), owner.id as i64],
                |row| row.get(0),
            )
            .optional()
            .db_context("Failed to query photo")
    }

    /// Removes a stored photo. Returns false when there was none.
    pub fn clear_photo(&mut self, owner: PhotoOwner) -> Result<bool> {
        let removed = self
            .connection
            .execute(DELETE_PHOTO_SQL, params![owner.kind.as_str(), owner.id as i64])
            .db_context("Failed to delete photo")?;

        Ok(removed > 0)
    }
}

fn not_found(owner: PhotoOwner) -> ItineraryError {
    match owner.kind {
        PhotoOwnerKind::Itinerary => ItineraryError::ItineraryNotFound { id: owner.id },
        PhotoOwnerKind::PlannerItem => ItineraryError::PlannerItemNotFound { id: owner.id },
    }
}
