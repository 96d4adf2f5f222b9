use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use super::schema::{FieldDefinition, PropertyMeta};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema for '{field}' is not an array")]
    NotAnArray { field: String },
    #[error("items of '{field}' must be an object schema with properties")]
    ItemsNotObject { field: String },
    #[error("property '{key}' has unsupported type '{kind}'; array items hold string values")]
    UnsupportedProperty { key: String, kind: String },
}

/// Translate a JSON Schema array-of-objects fragment into a field definition.
pub fn parse_array_field(schema: &Value, field_key: &str) -> Result<FieldDefinition, SchemaError> {
    let Some(object) = schema.as_object() else {
        return Err(SchemaError::NotAnArray {
            field: field_key.to_string(),
        });
    };
    let declared_array = match object.get("type") {
        Some(Value::String(kind)) => kind == "array",
        Some(Value::Array(kinds)) => kinds.iter().any(|kind| kind == "array"),
        _ => object.contains_key("items"),
    };
    if !declared_array {
        return Err(SchemaError::NotAnArray {
            field: field_key.to_string(),
        });
    }

    let items = object
        .get("items")
        .filter(|items| items.is_object())
        .ok_or_else(|| SchemaError::ItemsNotObject {
            field: field_key.to_string(),
        })?;
    let properties = items
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| SchemaError::ItemsNotObject {
            field: field_key.to_string(),
        })?;

    let required: HashSet<&str> = items
        .get("required")
        .and_then(Value::as_array)
        .map(|keys| keys.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let mut metas = Vec::with_capacity(properties.len());
    for (key, property) in properties {
        check_property_type(key, property)?;
        metas.push(PropertyMeta {
            field_key: key.clone(),
            title: string_field(property, "title"),
            description: string_field(property, "description"),
            required: required.contains(key.as_str()),
            default: property.get("default").and_then(scalar_to_string),
            secret: flag(property, "airbyte_secret") || flag(property, "writeOnly"),
        });
    }

    Ok(FieldDefinition {
        field_key: field_key.to_string(),
        title: string_field(schema, "title"),
        description: string_field(schema, "description"),
        properties: metas,
        item_schema: items.clone(),
    })
}

/// Field key for the array bound at `pointer`: its last segment, or `items` at the root.
pub fn field_key_from_pointer(pointer: &str) -> String {
    pointer
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .unwrap_or_else(|| "items".to_string())
}

fn check_property_type(key: &str, property: &Value) -> Result<(), SchemaError> {
    let accepted = match property.get("type") {
        None => true,
        Some(Value::String(kind)) => kind == "string",
        Some(Value::Array(kinds)) => kinds
            .iter()
            .all(|kind| kind == "string" || kind == "null"),
        Some(_) => false,
    };
    if accepted {
        Ok(())
    } else {
        let kind = property
            .get("type")
            .map(|kind| match kind {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default();
        Err(SchemaError::UnsupportedProperty {
            key: key.to_string(),
            kind,
        })
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(|text| text.to_string())
}

fn flag(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(num) => Some(num.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers_schema() -> Value {
        json!({
            "type": "array",
            "title": "Request headers",
            "description": "Extra headers sent with every request.",
            "items": {
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": {"type": "string", "title": "Header name"},
                    "value": {"type": "string", "airbyte_secret": true, "default": "none"}
                }
            }
        })
    }

    #[test]
    fn properties_keep_declaration_order_and_metadata() {
        let definition = parse_array_field(&headers_schema(), "headers").expect("definition");
        assert_eq!(definition.display_title(), "Request headers");
        let keys: Vec<_> = definition
            .properties
            .iter()
            .map(|property| property.field_key.as_str())
            .collect();
        assert_eq!(keys, vec!["name", "value"]);
        let name = &definition.properties[0];
        assert!(name.required);
        assert_eq!(name.display_title(), "Header name");
        let value = &definition.properties[1];
        assert!(value.secret);
        assert!(!value.required);
        assert_eq!(value.default.as_deref(), Some("none"));
        assert_eq!(value.display_title(), "value");
    }

    #[test]
    fn rejects_non_array_and_non_string_properties() {
        let err = parse_array_field(&json!({"type": "object"}), "headers").unwrap_err();
        assert!(matches!(err, SchemaError::NotAnArray { .. }));

        let err = parse_array_field(&json!({"type": "array", "items": {"type": "string"}}), "tags")
            .unwrap_err();
        assert!(matches!(err, SchemaError::ItemsNotObject { .. }));

        let schema = json!({
            "type": "array",
            "items": {"type": "object", "properties": {"port": {"type": "integer"}}}
        });
        let err = parse_array_field(&schema, "ports").unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnsupportedProperty {
                key: "port".to_string(),
                kind: "integer".to_string()
            }
        );
    }

    #[test]
    fn field_key_comes_from_last_pointer_segment() {
        assert_eq!(field_key_from_pointer("/connection/headers"), "headers");
        assert_eq!(field_key_from_pointer("/a~1b"), "a/b");
        assert_eq!(field_key_from_pointer(""), "items");
    }
}
