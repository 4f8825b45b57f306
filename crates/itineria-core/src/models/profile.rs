//! User profile snapshot.

use serde::{Deserialize, Serialize};

/// The stored profile fields. Unset fields read as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub initials: String,
    pub email: String,
    pub username: String,
}

impl Profile {
    /// True when nothing has been saved yet.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.initials.is_empty()
            && self.email.is_empty()
            && self.username.is_empty()
    }
}
