//! This module provides persistent key-value storage backends
//!
//! [`FileStore`] keeps the whole store in a single JSON file, which is plenty for the
//! two keys this crate persists (`user` and `specialDays`). [`MemoryStore`] backs
//! tests and ephemeral sessions.

use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::traits::KeyValueStore;

/// A key-value store that saves its whole content to a local file on every write
#[derive(Debug, PartialEq)]
pub struct FileStore {
    backing_file: PathBuf,
    data: StoredData,
}

#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
struct StoredData {
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Initialize a store from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let data = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };

        Ok(Self {
            backing_file: PathBuf::from(path),
            data,
        })
    }

    /// Initialize an empty store that will save to the given file
    pub fn new(path: &Path) -> Self {
        Self {
            backing_file: PathBuf::from(path),
            data: StoredData::default(),
        }
    }

    /// Store the current content to the backing file
    fn save_to_file(&self) -> Result<(), Box<dyn Error>> {
        let path = &self.backing_file;
        let file = match std::fs::File::create(path) {
            Err(err) => {
                return Err(format!("Unable to save file {:?}: {}", path, err).into());
            },
            Ok(f) => f,
        };
        serde_json::to_writer(file, &self.data)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        self.data.entries.insert(key.to_string(), value.to_string());
        self.save_to_file()
    }

    fn remove(&mut self, key: &str) -> Result<(), Box<dyn Error>> {
        self.data.entries.remove(key);
        self.save_to_file()
    }
}

/// A key-value store that does not persist anything
#[derive(Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Box<dyn Error>> {
        self.entries.remove(key);
        Ok(())
    }
}
