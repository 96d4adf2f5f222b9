use serde_json::{Map, Value};

use crate::domain::kind_name;

use super::error::FormError;

/// Bound document shared by every field of the form. Fields address their value
/// with a JSON pointer; every mutation bumps the revision.
#[derive(Debug, Clone)]
pub struct FormStore {
    root: Value,
    revision: u64,
    clean_revision: u64,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new(Value::Object(Map::new()))
    }
}

impl FormStore {
    pub fn new(root: Value) -> Self {
        Self {
            root,
            revision: 0,
            clean_revision: 0,
        }
    }

    pub fn value(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_dirty(&self) -> bool {
        self.revision != self.clean_revision
    }

    pub fn mark_clean(&mut self) {
        self.clean_revision = self.revision;
    }

    pub fn value_at(&self, pointer: &str) -> Option<&Value> {
        self.root.pointer(pointer)
    }

    /// Replace the value at `pointer`, creating intermediate objects on the way.
    pub fn set_value(&mut self, pointer: &str, value: Value) {
        let path = split_pointer(pointer);
        insert_path(&mut self.root, &path, value);
        self.bump();
    }

    /// Remove one element of the array at `pointer`. Indexes past the end leave the
    /// document untouched.
    pub fn remove_at(&mut self, pointer: &str, index: usize) -> Result<Option<Value>, FormError> {
        let removed = match self.root.pointer_mut(pointer) {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => {
                if index < items.len() {
                    Some(items.remove(index))
                } else {
                    None
                }
            }
            Some(other) => {
                return Err(FormError::NotAnArray {
                    pointer: pointer.to_string(),
                    found: kind_name(other),
                });
            }
        };
        if removed.is_some() {
            self.bump();
        }
        Ok(removed)
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

pub(crate) fn join_pointer(base: &str, segment: &str) -> String {
    let mut encoded = String::new();
    for ch in segment.chars() {
        match ch {
            '~' => encoded.push_str("~0"),
            '/' => encoded.push_str("~1"),
            other => encoded.push(other),
        }
    }
    if base.ends_with('/') {
        format!("{base}{encoded}")
    } else {
        format!("{base}/{encoded}")
    }
}

fn split_pointer(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer
        .trim_start_matches('/')
        .split('/')
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect()
}

fn insert_path(root: &mut Value, path: &[String], value: Value) {
    let Some((head, rest)) = path.split_first() else {
        *root = value;
        return;
    };

    if let Value::Array(items) = root {
        if let Ok(index) = head.parse::<usize>() {
            if index < items.len() {
                insert_path(&mut items[index], rest, value);
                return;
            }
            if index == items.len() {
                let mut slot = Value::Null;
                insert_path(&mut slot, rest, value);
                items.push(slot);
                return;
            }
        }
    }

    if !root.is_object() {
        *root = Value::Object(Map::new());
    }

    if let Value::Object(obj) = root {
        let entry = obj.entry(head.clone()).or_insert(Value::Null);
        insert_path(entry, rest, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_value_creates_intermediate_objects() {
        let mut store = FormStore::default();
        store.set_value("/connection/headers", json!([{"name": "a"}]));
        assert_eq!(
            store.value(),
            &json!({"connection": {"headers": [{"name": "a"}]}})
        );
        assert_eq!(store.revision(), 1);
        assert!(store.is_dirty());
        store.mark_clean();
        assert!(!store.is_dirty());
    }

    #[test]
    fn remove_at_ignores_out_of_range_and_missing() {
        let mut store = FormStore::new(json!({"list": [1, 2, 3]}));
        assert_eq!(store.remove_at("/list", 1).expect("remove"), Some(json!(2)));
        assert_eq!(store.remove_at("/list", 9).expect("remove"), None);
        assert_eq!(store.remove_at("/missing", 0).expect("remove"), None);
        assert_eq!(store.value(), &json!({"list": [1, 3]}));
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn remove_at_rejects_non_arrays() {
        let mut store = FormStore::new(json!({"list": "nope"}));
        let err = store.remove_at("/list", 0).unwrap_err();
        assert_eq!(
            err,
            FormError::NotAnArray {
                pointer: "/list".to_string(),
                found: "string"
            }
        );
    }

    #[test]
    fn root_pointer_replaces_document() {
        let mut store = FormStore::new(json!({"a": 1}));
        store.set_value("", json!([]));
        assert_eq!(store.value(), &json!([]));
    }

    #[test]
    fn pointers_escape_segments() {
        assert_eq!(join_pointer("/headers", "0"), "/headers/0");
        assert_eq!(join_pointer("", "a/b"), "/a~1b");
        assert_eq!(split_pointer("/a~1b/c~0d"), vec!["a/b", "c~d"]);
    }
}
