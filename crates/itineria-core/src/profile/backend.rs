//! Key-value backends for the profile store.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use log::debug;

use crate::error::{ItineraryError, Result};

/// Flat string key-value storage.
pub trait ProfileBackend {
    /// Reads a value; `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes several entries as one update.
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()>;

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_many(&[(key, value)])
    }
}

/// Ephemeral backend, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: BTreeMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        for (key, value) in entries {
            self.entries.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }
}

/// Backend persisted as a single JSON object file.
///
/// The file is read once on open. Every write replaces it through a
/// temporary file and a rename, so readers never see a half-written file.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileBackend {
    /// Opens the backend, treating a missing file as empty.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(ItineraryError::FileSystem { path, source: e });
            }
        };

        debug!("Opened profile store at {}", path.display());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let fs_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| ItineraryError::FileSystem { path, source }
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(fs_error(parent))?;
        }

        let json = serde_json::to_vec_pretty(&self.entries)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(fs_error(&tmp_path))?;
        fs::rename(&tmp_path, &self.path).map_err(fs_error(&self.path))
    }
}

impl ProfileBackend for JsonFileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        let previous = self.entries.clone();
        for (key, value) in entries {
            self.entries.insert((*key).to_string(), (*value).to_string());
        }

        // Keep memory and disk in agreement when the write fails.
        if let Err(e) = self.persist() {
            self.entries = previous;
            return Err(e);
        }
        Ok(())
    }
}
