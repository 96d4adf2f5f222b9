use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value, json};

/// Display and validation descriptor for one key of an array item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMeta {
    pub field_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "isRequired")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, rename = "isSecret")]
    pub secret: bool,
}

impl PropertyMeta {
    pub fn new(field_key: impl Into<String>) -> Self {
        Self {
            field_key: field_key.into(),
            title: None,
            description: None,
            required: false,
            default: None,
            secret: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_secret(mut self, secret: bool) -> Self {
        self.secret = secret;
        self
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.field_key)
    }
}

/// Definition of an array-of-objects field: the group header plus the shape of
/// every item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub field_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Item properties, either listed directly or wrapped in the item's group
    /// block (`{"properties": {"properties": [...]}}`).
    #[serde(default, deserialize_with = "item_properties")]
    pub properties: Vec<PropertyMeta>,
    /// JSON Schema of a single item. Derived from `properties` when absent.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub item_schema: Value,
}

impl FieldDefinition {
    pub fn new(field_key: impl Into<String>, properties: Vec<PropertyMeta>) -> Self {
        let mut definition = Self {
            field_key: field_key.into(),
            title: None,
            description: None,
            properties,
            item_schema: Value::Null,
        };
        definition.item_schema = definition.derived_item_schema();
        definition
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => &self.field_key,
        }
    }

    pub fn property(&self, key: &str) -> Option<&PropertyMeta> {
        self.properties
            .iter()
            .find(|property| property.field_key == key)
    }

    /// Item schema used for validation; falls back to one derived from the
    /// property list when the definition did not carry its own.
    pub fn item_schema(&self) -> Value {
        if self.item_schema.is_null() {
            self.derived_item_schema()
        } else {
            self.item_schema.clone()
        }
    }

    fn derived_item_schema(&self) -> Value {
        let mut properties = Map::new();
        for property in &self.properties {
            properties.insert(property.field_key.clone(), json!({"type": "string"}));
        }
        let required: Vec<&str> = self
            .properties
            .iter()
            .filter(|property| property.required)
            .map(|property| property.field_key.as_str())
            .collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemProperties {
    Flat(Vec<PropertyMeta>),
    Group {
        #[serde(default)]
        properties: Vec<PropertyMeta>,
    },
}

fn item_properties<'de, D>(deserializer: D) -> Result<Vec<PropertyMeta>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ItemProperties::deserialize(deserializer)? {
        ItemProperties::Flat(properties) | ItemProperties::Group { properties } => properties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_item_group_properties_are_accepted() {
        let definition: FieldDefinition = serde_json::from_value(json!({
            "fieldKey": "headers",
            "properties": {
                "_type": "formGroup",
                "fieldKey": "items",
                "properties": [
                    {"fieldKey": "name", "title": "Header", "isRequired": true},
                    {"fieldKey": "value", "isSecret": true}
                ]
            }
        }))
        .expect("definition");
        assert_eq!(definition.properties.len(), 2);
        assert_eq!(definition.properties[0].display_title(), "Header");
        assert!(definition.properties[0].required);
        assert!(definition.properties[1].secret);
    }

    #[test]
    fn flat_and_missing_properties_still_deserialize() {
        let flat: FieldDefinition = serde_json::from_value(json!({
            "fieldKey": "headers",
            "properties": [{"fieldKey": "name"}]
        }))
        .expect("flat");
        assert_eq!(flat.properties, vec![PropertyMeta::new("name")]);
        let bare: FieldDefinition =
            serde_json::from_value(json!({"fieldKey": "headers"})).expect("bare");
        assert!(bare.properties.is_empty());
        assert!(bare.item_schema().is_object());
    }
}
