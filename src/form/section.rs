use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{FieldDefinition, Item, kind_name};

use super::{
    error::FormError,
    format::ItemDetails,
    store::{FormStore, join_pointer},
};

/// Where a save from the item editor lands, reconciled against the current
/// array length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Existing(usize),
    Append,
}

#[derive(Debug, Clone)]
struct DetailsMemo {
    revision: u64,
    details: Vec<ItemDetails>,
}

/// Coordinates an array-of-objects field bound at `path` in a [`FormStore`] with
/// the transient edit index of the list editor.
#[derive(Debug, Clone)]
pub struct ArraySection {
    definition: FieldDefinition,
    path: String,
    disabled: bool,
    edit_index: Option<usize>,
    memo: Option<DetailsMemo>,
}

impl ArraySection {
    pub fn new(definition: FieldDefinition, path: impl Into<String>) -> Self {
        Self {
            definition,
            path: path.into(),
            disabled: false,
            edit_index: None,
            memo: None,
        }
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn definition(&self) -> &FieldDefinition {
        &self.definition
    }

    pub fn set_definition(&mut self, definition: FieldDefinition) {
        self.definition = definition;
        self.memo = None;
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn edit_index(&self) -> Option<usize> {
        self.edit_index
    }

    pub fn is_editing(&self) -> bool {
        self.edit_index.is_some()
    }

    /// Items bound at the section path. An absent or `null` value reads as empty.
    pub fn items(&self, store: &FormStore) -> Result<Vec<Item>, FormError> {
        self.raw_items(store)?
            .iter()
            .enumerate()
            .map(|(index, value)| {
                Item::from_value(value).map_err(|source| FormError::InvalidItem {
                    pointer: join_pointer(&self.path, &index.to_string()),
                    source,
                })
            })
            .collect()
    }

    pub fn len(&self, store: &FormStore) -> usize {
        match store.value_at(&self.path) {
            Some(Value::Array(items)) => items.len(),
            _ => 0,
        }
    }

    pub fn edit_target(&self, len: usize) -> Option<EditTarget> {
        let index = self.edit_index?;
        if index < len {
            Some(EditTarget::Existing(index))
        } else {
            Some(EditTarget::Append)
        }
    }

    /// Item currently open in the editor; `None` when nothing is open or a new
    /// item is being added. An existing slot that cannot be read as an item is an
    /// error, never a fresh item.
    pub fn editing_item(&self, store: &FormStore) -> Result<Option<Item>, FormError> {
        let values = self.raw_items(store)?;
        match self.edit_target(values.len()) {
            Some(EditTarget::Existing(index)) => Item::from_value(&values[index])
                .map(Some)
                .map_err(|source| FormError::InvalidItem {
                    pointer: join_pointer(&self.path, &index.to_string()),
                    source,
                }),
            Some(EditTarget::Append) | None => Ok(None),
        }
    }

    /// Sub-path handed to the item editor.
    pub fn editor_path(&self) -> String {
        join_pointer(&self.path, &self.edit_index.unwrap_or(0).to_string())
    }

    pub fn on_start_edit(&mut self, index: usize) {
        debug!(path = %self.path, index, "start editing array item");
        self.edit_index = Some(index);
    }

    pub fn on_remove(&mut self, store: &mut FormStore, index: usize) -> Result<(), FormError> {
        let removed = store.remove_at(&self.path, index)?;
        debug!(path = %self.path, index, removed = removed.is_some(), "remove array item");
        Ok(())
    }

    /// Splice `updated` into the array: replace the item under edit, or append
    /// when the edit index is unset or out of range. Clears the edit index.
    pub fn on_done(&mut self, store: &mut FormStore, updated: Item) -> Result<EditTarget, FormError> {
        let mut values = self.raw_items(store)?;
        let target = self
            .edit_target(values.len())
            .unwrap_or(EditTarget::Append);
        match target {
            EditTarget::Existing(index) => values[index] = updated.merge_into(&values[index]),
            EditTarget::Append => {
                if let Some(index) = self.edit_index
                    && index > values.len()
                {
                    warn!(
                        path = %self.path,
                        index,
                        len = values.len(),
                        "edit index past end of array, appending"
                    );
                }
                values.push(updated.to_value());
            }
        }
        store.set_value(&self.path, Value::Array(values));
        debug!(path = %self.path, ?target, "saved array item");
        self.edit_index = None;
        Ok(target)
    }

    pub fn on_cancel(&mut self) {
        debug!(path = %self.path, "cancel array item edit");
        self.edit_index = None;
    }

    /// Per-item labels, recomputed only when the store revision changed since the
    /// last call.
    pub fn details(&mut self, store: &FormStore) -> &[ItemDetails] {
        let revision = store.revision();
        let stale = self
            .memo
            .as_ref()
            .is_none_or(|memo| memo.revision != revision);
        if stale {
            let details = self.compute_details(store);
            self.memo = Some(DetailsMemo { revision, details });
        }
        match &self.memo {
            Some(memo) => &memo.details,
            None => &[],
        }
    }

    fn compute_details(&self, store: &FormStore) -> Vec<ItemDetails> {
        let values = match self.raw_items(store) {
            Ok(values) => values,
            Err(err) => {
                warn!(error = %err, "array field is not an array");
                return Vec::new();
            }
        };
        values
            .iter()
            .map(|value| match Item::from_value(value) {
                Ok(item) => ItemDetails::from_item(&item, &self.definition.properties),
                Err(err) => ItemDetails {
                    name: format!("<{err}>"),
                    ..ItemDetails::default()
                },
            })
            .collect()
    }

    fn raw_items(&self, store: &FormStore) -> Result<Vec<Value>, FormError> {
        match store.value_at(&self.path) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(other) => Err(FormError::NotAnArray {
                pointer: self.path.clone(),
                found: kind_name(other),
            }),
        }
    }
}

#[cfg(test)]
impl ArraySection {
    pub(crate) fn memo_revision(&self) -> Option<u64> {
        self.memo.as_ref().map(|memo| memo.revision)
    }
}
