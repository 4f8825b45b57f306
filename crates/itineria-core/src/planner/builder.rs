//! Builder for creating and configuring TripPlanner instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::TripPlanner;
use crate::{
    config::default_data_file,
    db::Database,
    error::{ItineraryError, Result},
};

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "itineria.db";

/// Builder for creating and configuring TripPlanner instances.
#[derive(Debug, Clone, Default)]
pub struct TripPlannerBuilder {
    database_path: Option<PathBuf>,
}

impl TripPlannerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG data directory:
    /// `$XDG_DATA_HOME/itineria/itineria.db` or
    /// `~/.local/share/itineria/itineria.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the planner, creating the database file and schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `ItineraryError::FileSystem` if the parent directory cannot be
    /// created, `ItineraryError::Database` if schema initialization fails.
    pub async fn build(self) -> Result<TripPlanner> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => default_data_file(DATABASE_FILE_NAME)?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ItineraryError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!("Opening itinerary database at {}", db_path.display());

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), ItineraryError>(())
        })
        .await
        .map_err(ItineraryError::join)??;

        Ok(TripPlanner::new(db_path))
    }
}
