//! JSON persistence for map collections.
//!
//! A store file holds every map plus the index of the active one. Loading
//! is forgiving the same way parsing is: an absent file is an empty
//! collection, and partial records are filled with defaults on the way in.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::types::FlatMap;

/// The persisted collection: all maps and which one is active.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub maps: Vec<FlatMap>,

    /// Index of the active map.
    #[serde(default)]
    pub index: usize,
}

impl StoreData {
    pub fn active(&self) -> Option<&FlatMap> {
        self.maps.get(self.index)
    }
}

/// A map collection on disk.
#[derive(Debug, Clone)]
pub struct MapStore {
    path: PathBuf,
}

impl MapStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection. An absent file is an empty collection; every
    /// loaded map is normalized and an out-of-range active index snaps
    /// back to the first map.
    pub fn load(&self) -> Result<StoreData> {
        if !self.path.exists() {
            return Ok(StoreData::default());
        }

        let raw = fs::read_to_string(&self.path).map_err(|err| MapError::Io {
            path: self.path.clone(),
            message: err.to_string(),
        })?;
        let mut data: StoreData = serde_json::from_str(&raw).map_err(|err| MapError::Store {
            message: format!("{} is not a valid map store: {err}", self.path.display()),
            help: Some("the store is a JSON object with a \"maps\" array".to_string()),
        })?;

        for map in &mut data.maps {
            map.normalize();
        }
        if data.index >= data.maps.len() {
            data.index = 0;
        }
        Ok(data)
    }

    /// Write the collection, creating parent directories as needed.
    pub fn save(&self, data: &StoreData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| MapError::Io {
                    path: parent.to_path_buf(),
                    message: err.to_string(),
                })?;
            }
        }

        let json = serde_json::to_string_pretty(data).map_err(|err| MapError::Store {
            message: format!("failed to encode map store: {err}"),
            help: None,
        })?;
        fs::write(&self.path, json).map_err(|err| MapError::Io {
            path: self.path.clone(),
            message: err.to_string(),
        })
    }
}
