//! Core library for the Itineria trip planner.
//!
//! This crate holds everything behind the `itin` front-end:
//!
//! - [`planner`]: itineraries and their planner items in SQLite, behind the
//!   async [`TripPlanner`] facade
//! - [`places`]: text search, nearby search and photo fetch against a places
//!   API
//! - [`chat`]: the travel assistant's chat-completion client and in-memory
//!   conversation
//! - [`profile`]: name, initials, email and username in a key-value store
//! - [`config`]: API keys, endpoints and file locations
//! - [`display`]: markdown formatting for all of the above
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use itineria_core::{TripPlannerBuilder, params::{CreateItinerary, ListItineraries}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = TripPlannerBuilder::new()
//!     .with_database_path(Some("trips.db"))
//!     .build()
//!     .await?;
//!
//! let itinerary = planner
//!     .create_itinerary(&CreateItinerary {
//!         name: "Portugal".to_string(),
//!         description: "Lisbon and Porto".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{itinerary}");
//!
//! let summaries = planner
//!     .list_itinerary_summaries(&ListItineraries::default())
//!     .await?;
//! for summary in &summaries {
//!     println!("{}: {} items", summary.name, summary.total_items);
//! }
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod places;
pub mod planner;
pub mod profile;

pub use chat::{ChatClient, ChatCompletion, ChatSession};
pub use config::Config;
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, ItinerarySummaries, NearbyPlaces, OperationStatus, Places,
    PlannerItems, UpdateResult, format_date,
};
pub use error::{ItineraryError, RemoteError, Result};
pub use models::{
    AssistantReply, Itinerary, ItineraryFilter, ItinerarySummary, Message, NearbyPlace,
    PhotoOwner, PhotoOwnerKind, Place, PlannerItem, Profile, Role,
};
pub use places::{PlaceSearch, PlacesClient};
pub use planner::{TripPlanner, TripPlannerBuilder};
pub use profile::{JsonFileBackend, MemoryBackend, ProfileBackend, ProfileStore};
