//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{Itinerary, PlannerItem};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use itineria_core::{display::CreateResult, models::Itinerary};
/// use jiff::{Timestamp, civil::date};
///
/// let itinerary = Itinerary {
///     id: 1,
///     name: "Peru".to_string(),
///     start_date: date(2024, 5, 1),
///     end_date: date(2024, 5, 9),
///     description: "Inca trail".to_string(),
///     has_photo: false,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     items: vec![],
/// };
///
/// let output = CreateResult::new(itinerary).to_string();
/// assert!(output.starts_with("Created itinerary with ID: 1"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Itinerary> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created itinerary with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<PlannerItem> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Added planner item with ID: {} to itinerary {}",
            self.resource.id, self.resource.itinerary_id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, optionally
/// listing what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }

    fn fmt_changes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for UpdateResult<Itinerary> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated itinerary with ID: {}", self.resource.id)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<PlannerItem> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated planner item with ID: {}", self.resource.id)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Itinerary> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.resource.items.len();
        writeln!(
            f,
            "Deleted itinerary '{}' (ID: {}) and {count} planner item{}",
            self.resource.name,
            self.resource.id,
            if count == 1 { "" } else { "s" }
        )
    }
}

impl fmt::Display for DeleteResult<PlannerItem> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted planner item '{}' (ID: {})",
            self.resource.destination, self.resource.id
        )
    }
}
