use anyhow::{Context, Result};
use serde_json::Value;

use super::DocumentFormat;

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => contents
            .parse::<toml::Value>()
            .with_context(|| "failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}

/// Try every enabled format in turn, JSON first.
pub fn parse_document_any(contents: &str) -> Result<(Value, DocumentFormat)> {
    let mut last_error = None;
    for format in DocumentFormat::available() {
        match parse_document_str(contents, *format) {
            Ok(value) => return Ok((value, *format)),
            Err(err) => last_error = Some(err),
        }
    }
    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("no document formats enabled")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_json_documents() {
        let value = parse_document_str(r#"{"headers": []}"#, DocumentFormat::Json).expect("json");
        assert_eq!(value, json!({"headers": []}));
        assert!(parse_document_str("{", DocumentFormat::Json).is_err());
    }

    #[test]
    fn any_format_reports_which_one_matched() {
        let (value, format) = parse_document_any("[1]").expect("parse");
        assert_eq!(value, json!([1]));
        assert_eq!(format, DocumentFormat::Json);
    }
}
