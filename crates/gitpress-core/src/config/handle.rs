//! Write-through key/value handle over a config file.

use gitpress_fs::{ConfigFormat, ConfigStore, NormalizedPath, TomlDocument};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Where writes go.
///
/// TOML files are edited as documents so unrelated keys, comments and
/// datetimes are written back exactly as they were read.
#[derive(Debug, Clone)]
enum Backing {
    Toml(TomlDocument),
    Store(ConfigStore),
}

/// An explicitly loaded, write-through view of one config file.
#[derive(Debug, Clone)]
pub struct Config {
    path: NormalizedPath,
    backing: Backing,
    values: Map<String, Value>,
}

impl Config {
    /// Load the config file at `path`.
    ///
    /// The format is chosen by extension (see [`ConfigStore`]). Missing files
    /// and parse errors are returned as filesystem errors.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let (backing, values) = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => {
                let document = TomlDocument::load(path)?;
                let values = document.to_json();
                (Backing::Toml(document), values)
            }
            _ => {
                let store = ConfigStore::new();
                let values: Map<String, Value> = store.load(path)?;
                (Backing::Store(store), values)
            }
        };
        tracing::debug!(path = %path, keys = values.len(), "Loaded config");
        Ok(Self {
            path: path.clone(),
            backing,
            values,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String value for `key`; `None` when missing or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Table value for `key`, validated strictly.
    ///
    /// A missing key yields an empty table; a key holding anything other
    /// than a table is a [`Error::ConfigType`].
    pub fn get_table(&self, key: &str) -> Result<Map<String, Value>> {
        match self.values.get(key) {
            None => Ok(Map::new()),
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(_) => Err(Error::ConfigType {
                key: key.to_string(),
                expected: "table",
            }),
        }
    }

    /// Table value for `key`, tolerating a malformed entry by returning an
    /// empty table.
    pub fn get_table_lenient(&self, key: &str) -> Map<String, Value> {
        self.get_table(key).unwrap_or_else(|e| {
            tracing::debug!(path = %self.path, error = %e, "Ignoring malformed config value");
            Map::new()
        })
    }

    /// Array-of-strings value for `key`, validated strictly.
    pub fn get_string_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        let Some(value) = self.values.get(key) else {
            return Ok(None);
        };
        let type_error = || Error::ConfigType {
            key: key.to_string(),
            expected: "list of strings",
        };
        let items = value.as_array().ok_or_else(type_error)?;
        items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(type_error))
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    /// Set `key` to `value` and persist, returning the previous value.
    ///
    /// If writing the file fails, the in-memory state is rolled back.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<Option<Value>> {
        let value = value.into();
        let snapshot = self.backing.clone();
        if let Backing::Toml(document) = &mut self.backing {
            document.set(key, &value);
        }
        let previous = self.values.insert(key.to_string(), value);
        if let Err(e) = self.save() {
            self.backing = snapshot;
            self.restore(key, previous);
            return Err(e);
        }
        Ok(previous)
    }

    /// Remove `key` and persist, returning the removed value.
    pub fn remove(&mut self, key: &str) -> Result<Option<Value>> {
        let previous = self.values.remove(key);
        if previous.is_none() {
            return Ok(None);
        }
        let snapshot = self.backing.clone();
        if let Backing::Toml(document) = &mut self.backing {
            document.remove(key);
        }
        if let Err(e) = self.save() {
            self.backing = snapshot;
            self.restore(key, previous);
            return Err(e);
        }
        Ok(previous)
    }

    fn save(&self) -> Result<()> {
        match &self.backing {
            Backing::Toml(document) => document.save(&self.path)?,
            Backing::Store(store) => store.save(&self.path, &self.values)?,
        }
        Ok(())
    }

    fn restore(&mut self, key: &str, previous: Option<Value>) {
        match previous {
            Some(value) => {
                self.values.insert(key.to_string(), value);
            }
            None => {
                self.values.remove(key);
            }
        }
    }
}
