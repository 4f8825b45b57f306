//! Display implementations for domain models.
//!
//! All output is markdown so the CLI can render it through termimad.

use std::fmt;

use super::datetime::{LocalDateTime, MediumDate};
use crate::models::{
    Itinerary, ItinerarySummary, NearbyPlace, PhotoOwnerKind, Place, PlannerItem, Profile, Role,
};

impl fmt::Display for PhotoOwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        writeln!(
            f,
            "- Dates: {} to {} ({} days)",
            MediumDate(self.start_date),
            MediumDate(self.end_date),
            self.duration_days()
        )?;
        if self.has_photo {
            writeln!(f, "- Photo: yes")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        writeln!(f)?;
        writeln!(f, "{}", self.description)?;

        if self.items.is_empty() {
            writeln!(f, "\nNo destinations planned yet.")?;
        } else {
            writeln!(f, "\n## Planner")?;
            writeln!(f)?;
            for item in &self.items {
                write!(f, "{item}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for PlannerItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let destination = if self.destination.is_empty() {
            "(no destination)"
        } else {
            &self.destination
        };
        writeln!(f, "### {}. {}", self.id, destination)?;
        writeln!(f)?;

        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => {
                writeln!(f, "- Dates: {} to {}", MediumDate(start), MediumDate(end))?
            }
            (Some(start), None) => writeln!(f, "- From: {}", MediumDate(start))?,
            (None, Some(end)) => writeln!(f, "- Until: {}", MediumDate(end))?,
            (None, None) => writeln!(f, "- Dates: not scheduled")?,
        }
        if self.has_photo {
            writeln!(f, "- Photo: yes")?;
        }
        writeln!(f)?;

        if !self.notes.is_empty() {
            writeln!(f, "{}", self.notes)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for ItinerarySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_items > 0 {
            format!(" ({}/{} scheduled)", self.scheduled_items, self.total_items)
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){progress}", self.name, self.id)?;
        writeln!(f)?;
        writeln!(
            f,
            "- **Dates**: {} to {}",
            MediumDate(self.start_date),
            MediumDate(self.end_date)
        )?;
        writeln!(f, "- **Description**: {}", self.description)?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.location();
        writeln!(f, "## {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "- **Address**: {}", self.formatted_address)?;
        writeln!(f, "- **Location**: {},{}", location.lat, location.lng)?;
        writeln!(f, "- **Place ID**: `{}`", self.id)?;
        writeln!(f)
    }
}

impl fmt::Display for NearbyPlace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}** (`{}`)", self.name, self.id)?;
        if let Some(reference) = &self.photo_reference {
            write!(f, " photo: `{reference}`")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No profile saved.");
        }

        let or_dash = |value: &str| {
            if value.is_empty() {
                "-".to_string()
            } else {
                value.to_string()
            }
        };

        writeln!(f, "# {} ({})", or_dash(&self.name), or_dash(&self.initials))?;
        writeln!(f)?;
        writeln!(f, "- **Email**: {}", or_dash(&self.email))?;
        writeln!(f, "- **Username**: {}", or_dash(&self.username))
    }
}
