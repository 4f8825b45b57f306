//! User profile: name, initials, email and username.
//!
//! Each field is an independent entry in a flat key-value backend. Reads of
//! keys that were never written return empty strings.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::{error::Result, models::Profile};

pub mod backend;

pub use backend::{JsonFileBackend, MemoryBackend, ProfileBackend};

pub const NAME_KEY: &str = "NAME_KEY";
pub const INITIAL_KEY: &str = "INITIAL_KEY";
pub const EMAIL_KEY: &str = "EMAIL_KEY";
pub const USER_KEY: &str = "USER_KEY";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.com$").expect("email pattern is valid")
});

/// True when `email` is an address ending in `.com`.
///
/// Other top-level domains are rejected.
pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Abbreviates a full name to its initials.
///
/// Takes the first letter of the first and last whitespace-separated
/// components, uppercased. Returns `None` for blank input or when any
/// component does not start with a letter.
///
/// ```
/// use itineria_core::profile::derive_initials;
///
/// assert_eq!(derive_initials("Daniel La").as_deref(), Some("DL"));
/// assert_eq!(derive_initials("ada"), Some("A".to_string()));
/// assert_eq!(derive_initials("1"), None);
/// ```
pub fn derive_initials(full_name: &str) -> Option<String> {
    let leading: Vec<char> = full_name
        .split_whitespace()
        .map(|part| part.chars().next().filter(|c| c.is_alphabetic()))
        .collect::<Option<_>>()?;

    let (first, rest) = leading.split_first()?;
    let mut initials: String = first.to_uppercase().collect();
    if let Some(last) = rest.last() {
        initials.extend(last.to_uppercase());
    }

    Some(initials)
}

/// Profile fields over a pluggable backend.
#[derive(Debug)]
pub struct ProfileStore<B> {
    backend: B,
}

impl<B: ProfileBackend> ProfileStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Stores name, email and username, then the initials derived from the
    /// name. When no initials can be derived the stored ones are kept.
    pub fn save(&mut self, name: &str, email: &str, username: &str) -> Result<()> {
        let initials = derive_initials(name);
        if initials.is_none() {
            debug!("No initials derivable from {name:?}; keeping previous value");
        }

        let mut entries = vec![(NAME_KEY, name), (EMAIL_KEY, email), (USER_KEY, username)];
        if let Some(initials) = initials.as_deref() {
            entries.push((INITIAL_KEY, initials));
        }

        self.backend.set_many(&entries)
    }

    pub fn name(&self) -> Result<String> {
        self.read(NAME_KEY)
    }

    pub fn initials(&self) -> Result<String> {
        self.read(INITIAL_KEY)
    }

    pub fn email(&self) -> Result<String> {
        self.read(EMAIL_KEY)
    }

    pub fn username(&self) -> Result<String> {
        self.read(USER_KEY)
    }

    /// Snapshot of all profile fields.
    pub fn profile(&self) -> Result<Profile> {
        Ok(Profile {
            name: self.name()?,
            initials: self.initials()?,
            email: self.email()?,
            username: self.username()?,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn read(&self, key: &str) -> Result<String> {
        Ok(self.backend.get(key)?.unwrap_or_default())
    }
}
