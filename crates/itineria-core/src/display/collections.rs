//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper prints its elements one after another and a fixed message
//! when there are none.

use std::{fmt, ops::Index};

use crate::models::{ItinerarySummary, NearbyPlace, Place, PlannerItem};

macro_rules! collection_wrapper {
    ($(#[$meta:meta])* $name:ident, $item:ty, $empty:literal) => {
        $(#[$meta])*
        pub struct $name(pub Vec<$item>);

        impl $name {
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $name {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.0.is_empty() {
                    writeln!(f, $empty)
                } else {
                    for entry in &self.0 {
                        write!(f, "{entry}")?;
                    }
                    Ok(())
                }
            }
        }
    };
}

collection_wrapper!(
    /// Itinerary summaries, as listed by `trip list`.
    ///
    /// ```rust
    /// use itineria_core::display::ItinerarySummaries;
    ///
    /// let summaries = ItinerarySummaries(vec![]);
    /// assert_eq!(summaries.to_string(), "No itineraries found.\n");
    /// ```
    ItinerarySummaries,
    ItinerarySummary,
    "No itineraries found."
);

collection_wrapper!(
    /// Planner items of one itinerary, in position order.
    PlannerItems,
    PlannerItem,
    "No planner items found."
);

collection_wrapper!(
    /// Text-search results.
    Places,
    Place,
    "No places found."
);

collection_wrapper!(
    /// Nearby-search results.
    NearbyPlaces,
    NearbyPlace,
    "No nearby places found."
);
