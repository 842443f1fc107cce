//! Disk-backed key/value store.
//!
//! The whole store is a single JSON object. Every `set` rewrites the file
//! through a tempfile in the same directory, so a crash mid-write leaves the
//! previous contents intact. There is no locking: two processes writing the
//! same store race and the last writer wins.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::errors::StoreError;

type Result<T> = std::result::Result<T, StoreError>;

/// Default file name inside the ezlo config directory.
pub const STORE_FILE: &str = "store.json";

#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    data: Map<String, Value>,
}

impl Store {
    /// Open the store at `path`. A missing file is an empty store; the file
    /// is only created on the first `set`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                data: Map::new(),
            });
        }

        let raw = std::fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;

        if raw.trim().is_empty() {
            return Ok(Self {
                path,
                data: Map::new(),
            });
        }

        let value: Value = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: path.clone(),
            source,
        })?;

        match value {
            Value::Object(data) => Ok(Self { path, data }),
            _ => Err(StoreError::InvalidRoot { path }),
        }
    }

    /// Default location: `<config dir>/ezlo/store.json`, falling back to the
    /// current directory when the platform has no config dir.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("ezlo"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(STORE_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read `key`. Absent keys and explicit `null` read as `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.data.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|source| StoreError::Decode {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        matches!(self.data.get(key), Some(v) if !v.is_null())
    }

    /// Write `value` under `key` and flush the store to disk.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.data.insert(key.to_string(), value);
        self.flush()
    }

    /// Remove `key` and flush. Removing an absent key is a no-op write.
    pub fn remove(&mut self, key: &str) -> Result<()> {
        self.data.remove(key);
        self.flush()
    }

    fn flush(&self) -> Result<()> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(write_err)?;

        let body = serde_json::to_vec_pretty(&self.data).map_err(|source| StoreError::Encode {
            key: String::new(),
            source,
        })?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(&body).map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}
