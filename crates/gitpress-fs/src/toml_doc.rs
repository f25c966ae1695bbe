//! Format-preserving TOML documents
//!
//! [`TomlDocument`] keeps a config file as a `toml_edit` document so that
//! writes touch only the keys they change. Comments, key order and TOML-only
//! values such as datetimes survive every save. Reads go through a JSON view
//! in which datetimes appear as their RFC 3339 strings.

use serde_json::{Map, Number, Value as Json};
use toml_edit::{Array, DocumentMut, InlineTable, Item, Table, Value};

use crate::{Error, NormalizedPath, Result, io};

/// An editable TOML file.
#[derive(Debug, Clone, Default)]
pub struct TomlDocument {
    doc: DocumentMut,
}

impl TomlDocument {
    /// Read and parse the file at `path`.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let content = io::read_text(path)?;
        Self::parse(path, &content)
    }

    /// Parse TOML text that came from `path`.
    pub fn parse(path: &NormalizedPath, content: &str) -> Result<Self> {
        let doc = content
            .parse::<DocumentMut>()
            .map_err(|e: toml_edit::TomlError| Error::ConfigParse {
                path: path.to_native(),
                format: "TOML".into(),
                message: e.to_string(),
            })?;
        Ok(Self { doc })
    }

    /// The document as a JSON object.
    pub fn to_json(&self) -> Map<String, Json> {
        table_to_json(self.doc.as_table())
    }

    /// Set the top-level `key` to `value`.
    ///
    /// Parts of the existing entry whose JSON view already equals the new
    /// value are left untouched. A JSON `null` removes the key.
    pub fn set(&mut self, key: &str, value: &Json) {
        if value.is_null() {
            self.doc.remove(key);
            return;
        }
        match self.doc.get_mut(key) {
            Some(item) if !item.is_none() => merge_item(item, value),
            _ => {
                self.doc.insert(key, to_item(value, true));
            }
        }
    }

    /// Remove the top-level `key`.
    pub fn remove(&mut self, key: &str) -> bool {
        self.doc.remove(key).is_some()
    }

    /// Write the document to `path` atomically.
    pub fn save(&self, path: &NormalizedPath) -> Result<()> {
        tracing::debug!(path = %path, format = "TOML", "Saving config");
        io::write_atomic(path, self.doc.to_string().as_bytes())
    }
}

impl std::fmt::Display for TomlDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.doc)
    }
}

fn merge_item(item: &mut Item, value: &Json) {
    if item_to_json(item) == *value {
        return;
    }
    match value {
        Json::Object(map) if item.is_table() => {
            if let Some(table) = item.as_table_mut() {
                merge_table(table, map);
            }
        }
        _ => {
            let as_table = item.is_table();
            *item = to_item(value, as_table);
        }
    }
}

fn merge_table(table: &mut Table, map: &Map<String, Json>) {
    let stale: Vec<String> = table
        .iter()
        .map(|(key, _)| key.to_string())
        .filter(|key| !map.contains_key(key))
        .collect();
    for key in stale {
        table.remove(&key);
    }

    for (key, value) in map {
        match table.get_mut(key) {
            Some(item) if !item.is_none() => merge_item(item, value),
            _ if value.is_null() => {}
            _ => {
                table.insert(key, to_item(value, true));
            }
        }
    }
}

/// Objects become standard tables when `as_table`, inline tables otherwise.
fn to_item(value: &Json, as_table: bool) -> Item {
    match value {
        Json::Object(map) if as_table => {
            let mut table = Table::new();
            for (key, value) in map {
                let item = to_item(value, true);
                if !item.is_none() {
                    table.insert(key, item);
                }
            }
            Item::Table(table)
        }
        value => to_value(value).map(Item::Value).unwrap_or(Item::None),
    }
}

fn to_value(value: &Json) -> Option<Value> {
    let value = match value {
        Json::Null => return None,
        Json::Bool(b) => Value::from(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::from(i),
            None => Value::from(n.as_f64()?),
        },
        Json::String(s) => Value::from(s.as_str()),
        Json::Array(items) => {
            let mut array = Array::new();
            for item in items.iter().filter_map(to_value) {
                array.push(item);
            }
            Value::from(array)
        }
        Json::Object(map) => {
            let mut table = InlineTable::new();
            for (key, value) in map {
                if let Some(value) = to_value(value) {
                    table.insert(key.clone(), value);
                }
            }
            Value::from(table)
        }
    };
    Some(value)
}

fn table_to_json(table: &Table) -> Map<String, Json> {
    table
        .iter()
        .map(|(key, item)| (key.to_string(), item_to_json(item)))
        .collect()
}

fn item_to_json(item: &Item) -> Json {
    match item {
        Item::Value(value) => value_to_json(value),
        Item::Table(table) => Json::Object(table_to_json(table)),
        Item::ArrayOfTables(tables) => Json::Array(
            tables
                .iter()
                .map(|table| Json::Object(table_to_json(table)))
                .collect(),
        ),
        Item::None => Json::Null,
    }
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::String(s) => Json::String(s.value().to_string()),
        Value::Integer(i) => Json::Number((*i.value()).into()),
        Value::Float(f) => Number::from_f64(*f.value())
            .map(Json::Number)
            .unwrap_or(Json::Null),
        Value::Boolean(b) => Json::Bool(*b.value()),
        Value::Datetime(d) => Json::String(d.value().to_string()),
        Value::Array(items) => Json::Array(items.iter().map(value_to_json).collect()),
        Value::InlineTable(table) => Json::Object(
            table
                .iter()
                .map(|(key, value)| (key.to_string(), value_to_json(value)))
                .collect(),
        ),
    }
}
