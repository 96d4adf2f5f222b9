use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("item must be an object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("value of '{key}' must be a scalar, found {found}")]
    NestedValue { key: String, found: &'static str },
}

/// One row of an array-of-objects field: string keys mapped to string values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(IndexMap<String, String>);

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: &Value) -> Result<Self, ItemError> {
        let Value::Object(map) = value else {
            return Err(ItemError::NotAnObject {
                found: kind_name(value),
            });
        };
        let mut entries = IndexMap::with_capacity(map.len());
        for (key, raw) in map {
            if raw.is_null() {
                continue;
            }
            let Some(text) = scalar_text(raw) else {
                return Err(ItemError::NestedValue {
                    key: key.clone(),
                    found: kind_name(raw),
                });
            };
            entries.insert(key.clone(), text);
        }
        Ok(Self(entries))
    }

    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .0
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();
        Value::Object(map)
    }

    /// Write this item over `original`, keeping the stored JSON value of every key
    /// whose text did not change. Keys missing from the item are dropped unless
    /// they were `null`, which the item never carries.
    pub fn merge_into(&self, original: &Value) -> Value {
        let Value::Object(stored) = original else {
            return self.to_value();
        };
        let mut merged = Map::with_capacity(stored.len().max(self.len()));
        for (key, raw) in stored {
            match self.get(key) {
                Some(text) if scalar_text(raw).as_deref() == Some(text) => {
                    merged.insert(key.clone(), raw.clone());
                }
                Some(text) => {
                    merged.insert(key.clone(), Value::String(text.to_string()));
                }
                None if raw.is_null() => {
                    merged.insert(key.clone(), Value::Null);
                }
                None => {}
            }
        }
        for (key, value) in &self.0 {
            if !merged.contains_key(key) {
                merged.insert(key.clone(), Value::String(value.clone()));
            }
        }
        Value::Object(merged)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Keys in lexicographic order of the raw key strings.
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        keys
    }
}

impl<K, V> FromIterator<(K, V)> for Item
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(num) => Some(num.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// JSON type name used in shape errors.
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
