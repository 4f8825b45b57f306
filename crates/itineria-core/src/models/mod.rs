//! Data models for itineraries, planner items, places, chat and profile.
//!
//! Display implementations for these models live in
//! [`crate::display::models`] so that data structures stay free of
//! presentation logic.
//!
//! # Examples
//!
//! ```rust
//! use itineria_core::models::Itinerary;
//! use jiff::{Timestamp, civil::date};
//!
//! let itinerary = Itinerary {
//!     id: 1,
//!     name: "Japan".to_string(),
//!     start_date: date(2024, 3, 1),
//!     end_date: date(2024, 3, 14),
//!     description: "Spring trip".to_string(),
//! #   has_photo: false,
//! #   created_at: Timestamp::now(),
//! #   updated_at: Timestamp::now(),
//! #   items: vec![],
//! };
//! assert_eq!(itinerary.duration_days(), 14);
//! println!("{itinerary}");
//! ```

pub mod chat;
pub mod filters;
pub mod itinerary;
pub mod photo;
pub mod place;
pub mod planner_item;
pub mod profile;
pub mod requests;
pub mod summary;


pub use chat::{AssistantReply, Message, Role};
pub use filters::ItineraryFilter;
pub use itinerary::Itinerary;
pub use photo::{PhotoOwner, PhotoOwnerKind};
pub use place::{Geometry, Location, NearbyPlace, Place, Viewport};
pub use planner_item::PlannerItem;
pub use profile::Profile;
pub use requests::{UpdateItineraryRequest, UpdatePlannerItemRequest, validate_date_range};
pub use summary::ItinerarySummary;
