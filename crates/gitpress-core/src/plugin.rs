//! Plugin requirements declared in the repository config.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

/// One entry of the `plugins` config table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRequirement {
    /// Plugin identifier, unique within a repository
    pub name: String,

    /// Plugin-specific options
    pub options: BTreeMap<String, String>,
}

impl PluginRequirement {
    /// A requirement with no options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: BTreeMap::new(),
        }
    }

    /// Build a requirement from its config entry.
    ///
    /// Scalar options are kept in their string form; nested tables and
    /// arrays are skipped. A non-table entry yields no options.
    pub fn from_config(name: &str, value: &Value) -> Self {
        let options = value
            .as_object()
            .map(|table| {
                table
                    .iter()
                    .filter_map(|(key, value)| scalar_to_string(value).map(|v| (key.clone(), v)))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            name: name.to_string(),
            options,
        }
    }

    /// The `version` option, if declared.
    pub fn version(&self) -> Option<&str> {
        self.options.get("version").map(String::as_str)
    }

    /// The config entry for this requirement.
    pub fn to_value(&self) -> Value {
        let table: Map<String, Value> = self
            .options
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();
        Value::Object(table)
    }
}

impl fmt::Display for PluginRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version() {
            Some(version) => write!(f, "{} {}", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
