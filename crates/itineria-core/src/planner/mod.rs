//! High-level async API for itineraries and planner items.
//!
//! [`TripPlanner`] is the entry point for the persistent store. Each call
//! opens a connection on tokio's blocking pool, so the caller's task never
//! blocks on SQLite.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │   (handlers)    │───▶│ (itinerary_ops, │───▶│   (via db/)     │
//! │                 │    │  item_ops)      │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!  Display wrappers        Param plumbing        Data persistence
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use itineria_core::{TripPlannerBuilder, params::{AddPlannerItem, CreateItinerary}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = TripPlannerBuilder::new()
//!     .with_database_path(Some("/tmp/itineria.db"))
//!     .build()
//!     .await?;
//!
//! let trip = planner
//!     .create_itinerary(&CreateItinerary {
//!         name: "Japan".to_string(),
//!         description: "Two weeks in spring".to_string(),
//!         start_date: None,
//!         end_date: None,
//!     })
//!     .await?;
//!
//! planner
//!     .add_item(&AddPlannerItem {
//!         itinerary_id: trip.id,
//!         destination: "Kyoto".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tokio::task;

use crate::{
    db::Database,
    error::{ItineraryError, Result},
};

pub mod builder;
pub mod handlers;
pub mod item_ops;
pub mod itinerary_ops;


pub use builder::TripPlannerBuilder;

/// Main interface for managing itineraries and planner items.
#[derive(Debug, Clone)]
pub struct TripPlanner {
    pub(crate) db_path: PathBuf,
}

impl TripPlanner {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the SQLite file backing this planner.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Runs `op` against a fresh connection on the blocking pool.
    pub(crate) async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(ItineraryError::join)?
    }
}
