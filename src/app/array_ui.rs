use anyhow::{Context, Result};
use serde_json::Value;

use crate::{
    domain::{FieldDefinition, field_key_from_pointer, parse_array_field},
    form::{ArraySection, FormStore},
};

use super::{options::UiOptions, runtime::App};

/// Interactive editor for one array-of-objects field of a document.
#[derive(Debug)]
pub struct ArraySectionUI {
    definition: FieldDefinition,
    document: Value,
    path: String,
    options: UiOptions,
}

impl ArraySectionUI {
    /// Edit the field described by `definition`, bound at the document root
    /// unless [`with_path`](Self::with_path) says otherwise.
    pub fn new(definition: FieldDefinition, document: Value) -> Self {
        Self {
            definition,
            document,
            path: String::new(),
            options: UiOptions::default(),
        }
    }

    /// Build the field definition from a JSON Schema array fragment bound at `path`.
    pub fn from_schema(schema: &Value, document: Value, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let field_key = field_key_from_pointer(&path);
        let definition = parse_array_field(schema, &field_key)
            .with_context(|| format!("failed to read array schema for '{field_key}'"))?;
        Ok(Self::new(definition, document).with_path(path))
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.definition.title = Some(title.into());
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    pub fn definition(&self) -> &FieldDefinition {
        &self.definition
    }

    /// Run the terminal UI and return the saved document.
    pub fn run(self) -> Result<Value> {
        let mut app = self.into_app()?;
        app.run()
    }

    pub(crate) fn into_app(self) -> Result<App> {
        let ArraySectionUI {
            definition,
            document,
            path,
            options,
        } = self;
        let store = FormStore::new(document);
        let section = ArraySection::new(definition, path);
        section
            .items(&store)
            .with_context(|| format!("document value at '{}' is not editable", section.path()))?;
        Ok(App::new(store, section, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_schema_uses_pointer_for_field_key() {
        let schema = json!({
            "type": "array",
            "items": {"type": "object", "properties": {"name": {"type": "string"}}}
        });
        let ui = ArraySectionUI::from_schema(&schema, json!({}), "/source/headers")
            .expect("ui")
            .with_title("Headers");
        assert_eq!(ui.definition().field_key, "headers");
        assert_eq!(ui.definition().display_title(), "Headers");
    }

    #[test]
    fn into_app_rejects_non_array_documents() {
        let definition = FieldDefinition::new("headers", Vec::new());
        let ui = ArraySectionUI::new(definition, json!({"headers": "oops"})).with_path("/headers");
        assert!(ui.into_app().is_err());
    }
}
