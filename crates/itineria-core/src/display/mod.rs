//! Display formatting for models, collections and operation results.
//!
//! Domain models implement `Display` directly (see [`models`]); collections
//! and operation outcomes get newtype wrappers. Everything renders as
//! markdown so the CLI can pass it to termimad unchanged.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │   Collections   │    │    Markdown     │
//! │ (Itinerary, ..) │───▶│ & Result Types  │───▶│     Output      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: ItinerarySummaries, PlannerItems, Places, NearbyPlaces
//! - [`results`]: CreateResult, UpdateResult, DeleteResult
//! - [`status`]: OperationStatus
//! - [`datetime`]: medium dates and local timestamps
//! - [`models`]: Display implementations for domain models
//!
//! ```rust
//! use itineria_core::display::OperationStatus;
//!
//! println!("{}", OperationStatus::success("Profile saved"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{ItinerarySummaries, NearbyPlaces, Places, PlannerItems};
pub use datetime::{LocalDateTime, MEDIUM_DATE_FORMAT, MediumDate, format_date};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
