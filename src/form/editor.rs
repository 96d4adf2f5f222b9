use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use jsonschema::validator_for;
use serde_json::Value;
use tracing::debug;

use crate::domain::{FieldDefinition, Item, PropertyMeta};

/// Result of a key press that closes the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    Done(Item),
    Cancel,
}

/// Text input bound to one property of the item.
#[derive(Debug, Clone)]
pub struct EditorInput {
    pub property: PropertyMeta,
    pub buffer: String,
    pub error: Option<String>,
}

/// Modal form editing one array item. Mounted either on an existing item or on
/// the slot one past the end of the array.
#[derive(Debug, Clone)]
pub struct ItemEditor {
    path: String,
    title: String,
    item_schema: Value,
    inputs: Vec<EditorInput>,
    extras: Item,
    focus: usize,
    read_only: bool,
    error: Option<String>,
}

impl ItemEditor {
    pub fn new(definition: &FieldDefinition, path: impl Into<String>, item: Option<&Item>) -> Self {
        let inputs = definition
            .properties
            .iter()
            .map(|property| {
                let buffer = match item {
                    Some(item) => item.get(&property.field_key).unwrap_or_default().to_string(),
                    None => property.default.clone().unwrap_or_default(),
                };
                EditorInput {
                    property: property.clone(),
                    buffer,
                    error: None,
                }
            })
            .collect();
        let extras: Item = item
            .map(|item| {
                item.iter()
                    .filter(|(key, _)| definition.property(key).is_none())
                    .collect()
            })
            .unwrap_or_default();
        if !extras.is_empty() {
            debug!(keys = ?extras.keys().collect::<Vec<_>>(), "item carries keys without metadata");
        }
        let title = match item {
            Some(_) => format!("Edit {}", definition.display_title()),
            None => format!("Add {}", definition.display_title()),
        };
        Self {
            path: path.into(),
            title,
            item_schema: definition.item_schema(),
            inputs,
            extras,
            focus: 0,
            read_only: false,
            error: None,
        }
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn inputs(&self) -> &[EditorInput] {
        &self.inputs
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn focus_step(&mut self, delta: i32) {
        if self.inputs.is_empty() {
            return;
        }
        let len = self.inputs.len() as i64;
        let next = ((self.focus as i64 + i64::from(delta)) % len + len) % len;
        self.focus = next as usize;
    }

    pub fn set_input(&mut self, key: &str, value: impl Into<String>) -> bool {
        if self.read_only {
            return false;
        }
        match self
            .inputs
            .iter_mut()
            .find(|input| input.property.field_key == key)
        {
            Some(input) => {
                input.buffer = value.into();
                input.error = None;
                true
            }
            None => false,
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<EditorOutcome> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Some(EditorOutcome::Cancel),
            KeyCode::Char('s') | KeyCode::Char('S') if ctrl => self.submit(),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.focus_step(1);
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_step(-1);
                None
            }
            _ => {
                self.edit_focused(key);
                None
            }
        }
    }

    /// Save, or cancel when read-only. Stays open when validation fails.
    pub fn submit(&mut self) -> Option<EditorOutcome> {
        if self.read_only {
            return Some(EditorOutcome::Cancel);
        }
        self.try_save().ok().map(EditorOutcome::Done)
    }

    /// Build the item from the inputs and validate it against the item schema.
    /// Returns the number of issues on failure; each issue is attached to its input
    /// or to the editor-level error.
    pub fn try_save(&mut self) -> Result<Item, usize> {
        self.error = None;
        for input in &mut self.inputs {
            input.error = None;
        }

        let mut item = Item::new();
        let mut issues = 0usize;
        for input in &mut self.inputs {
            if input.buffer.is_empty() {
                if input.property.required {
                    input.error = Some("required".to_string());
                    issues += 1;
                }
                continue;
            }
            item.insert(input.property.field_key.clone(), input.buffer.clone());
        }
        for (key, value) in self.extras.iter() {
            item.insert(key, value);
        }
        if issues > 0 {
            return Err(issues);
        }

        let validator = match validator_for(&self.item_schema) {
            Ok(validator) => validator,
            Err(err) => {
                self.error = Some(format!("invalid item schema: {err}"));
                return Err(1);
            }
        };
        let value = item.to_value();
        let mut general = Vec::new();
        for error in validator.iter_errors(&value) {
            issues += 1;
            let pointer = error.instance_path.to_string();
            let message = error.to_string();
            let key = pointer
                .trim_start_matches('/')
                .replace("~1", "/")
                .replace("~0", "~");
            match self
                .inputs
                .iter_mut()
                .find(|input| !key.is_empty() && input.property.field_key == key)
            {
                Some(input) => input.error = Some(message),
                None => general.push(message),
            }
        }
        if !general.is_empty() {
            self.error = Some(general.join("; "));
        }
        if issues > 0 {
            debug!(path = %self.path, issues, "item editor validation failed");
            return Err(issues);
        }
        Ok(item)
    }

    fn edit_focused(&mut self, key: &KeyEvent) -> bool {
        if self.read_only {
            return false;
        }
        let Some(input) = self.inputs.get_mut(self.focus) else {
            return false;
        };
        let changed = match key.code {
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return false;
                }
                input.buffer.push(ch);
                true
            }
            KeyCode::Backspace => input.buffer.pop().is_some(),
            KeyCode::Delete => {
                let had_text = !input.buffer.is_empty();
                input.buffer.clear();
                had_text
            }
            _ => false,
        };
        if changed {
            input.error = None;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn definition() -> FieldDefinition {
        FieldDefinition::new(
            "headers",
            vec![
                PropertyMeta::new("name").with_title("Name").with_required(true),
                PropertyMeta::new("value").with_default("x"),
            ],
        )
    }

    #[test]
    fn new_slot_seeds_defaults_and_existing_item_seeds_values() {
        let fresh = ItemEditor::new(&definition(), "/headers/0", None);
        assert_eq!(fresh.inputs()[0].buffer, "");
        assert_eq!(fresh.inputs()[1].buffer, "x");
        assert_eq!(fresh.title(), "Add headers");

        let item: Item = [("name", "Accept")].into_iter().collect();
        let existing = ItemEditor::new(&definition(), "/headers/0", Some(&item));
        assert_eq!(existing.inputs()[0].buffer, "Accept");
        assert_eq!(existing.inputs()[1].buffer, "");
    }

    #[test]
    fn typing_and_enter_produce_item() {
        let mut editor = ItemEditor::new(&definition(), "/headers/0", None);
        for ch in "Host".chars() {
            assert_eq!(editor.handle_key(&key(KeyCode::Char(ch))), None);
        }
        let outcome = editor.handle_key(&key(KeyCode::Enter));
        let expected: Item = [("name", "Host"), ("value", "x")].into_iter().collect();
        assert_eq!(outcome, Some(EditorOutcome::Done(expected)));
    }

    #[test]
    fn missing_required_value_blocks_save() {
        let mut editor = ItemEditor::new(&definition(), "/headers/0", None);
        assert_eq!(editor.handle_key(&key(KeyCode::Enter)), None);
        assert_eq!(editor.inputs()[0].error.as_deref(), Some("required"));
        editor.handle_key(&key(KeyCode::Char('a')));
        assert!(editor.inputs()[0].error.is_none());
    }

    #[test]
    fn schema_violations_attach_to_inputs() {
        let mut definition = definition();
        definition.item_schema = json!({
            "type": "object",
            "properties": {"name": {"type": "string", "pattern": "^[A-Z]"}}
        });
        let mut editor = ItemEditor::new(&definition, "/headers/0", None);
        editor.set_input("name", "lower");
        assert_eq!(editor.try_save(), Err(1));
        assert!(editor.inputs()[0].error.is_some());
    }

    #[test]
    fn unknown_keys_survive_a_save() {
        let item: Item = [("name", "A"), ("legacy", "1")].into_iter().collect();
        let mut editor = ItemEditor::new(&definition(), "/headers/2", Some(&item));
        let saved = editor.try_save().expect("save");
        assert_eq!(saved.get("legacy"), Some("1"));
        assert_eq!(saved.get("name"), Some("A"));
    }

    #[test]
    fn escape_cancels_and_read_only_ignores_edits() {
        let mut editor = ItemEditor::new(&definition(), "/headers/0", None).with_read_only(true);
        editor.handle_key(&key(KeyCode::Char('z')));
        assert_eq!(editor.inputs()[0].buffer, "");
        assert_eq!(editor.handle_key(&key(KeyCode::Enter)), Some(EditorOutcome::Cancel));
        assert_eq!(editor.handle_key(&key(KeyCode::Esc)), Some(EditorOutcome::Cancel));
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut editor = ItemEditor::new(&definition(), "/headers/0", None);
        editor.handle_key(&key(KeyCode::BackTab));
        assert_eq!(editor.focus(), 1);
        editor.handle_key(&key(KeyCode::Tab));
        assert_eq!(editor.focus(), 0);
    }
}
