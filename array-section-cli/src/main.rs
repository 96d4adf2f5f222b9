use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use array_section::{
    ArraySectionUI, DocumentFormat, FieldDefinition, ModalSize, OutputDestination, OutputOptions,
    UiOptions, emit, io::parse_document_any, parse_document_str,
};
use clap::{ArgAction, Parser};
use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use serde_json::{Value, json};
use tracing::{Level, info};

mod logging;

#[derive(Debug, Parser)]
#[command(
    name = "array-section",
    version,
    about = "Edit an array-of-objects field of a configuration document in the terminal"
)]
struct Cli {
    /// Array JSON Schema fragment or form-block definition (file, inline, or "-")
    #[arg(short = 's', long = "schema", value_name = "SPEC")]
    schema: String,

    /// Document holding the array: file path, inline payload, or "-" for stdin
    #[arg(short = 'c', long = "config", alias = "data", value_name = "SPEC")]
    config: Option<String>,

    /// JSON pointer of the array inside the document ("" is the document root)
    #[arg(short = 'p', long = "path", value_name = "POINTER", default_value = "")]
    path: String,

    /// Title shown on the field group
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Output destinations ("-" writes to stdout)
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Output format; inferred from the first output file or the config file otherwise
    #[arg(long = "format", value_name = "FORMAT")]
    format: Option<DocumentFormat>,

    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Overwrite output files even if they already exist
    #[arg(short = 'f', long = "force", short_alias = 'y', alias = "yes")]
    force: bool,

    /// Open items read-only; adding and removing are disabled
    #[arg(long = "disabled", alias = "read-only")]
    disabled: bool,

    /// Size of the item editor popup (sm, md, lg)
    #[arg(long = "modal-size", value_name = "SIZE", default_value = "sm")]
    modal_size: ModalSize,

    /// Log file (defaults to array-section.log in the temp directory)
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log level; RUST_LOG is used when absent
    #[arg(long = "log-level", value_name = "LEVEL")]
    log_level: Option<Level>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(cli.log_file.clone(), cli.log_level)?;

    if cli.schema == "-" && cli.config.as_deref() == Some("-") {
        bail!("cannot read schema and config from stdin simultaneously");
    }

    let field_spec = load_value(&cli.schema, "schema")?;
    let document = match cli.config.as_deref() {
        Some(spec) => load_value(spec, "config")?,
        None if cli.path.is_empty() => json!([]),
        None => json!({}),
    };

    let ui = build_ui(field_spec, document, &cli)?;
    let output = build_output_options(&cli)?;
    info!(path = %cli.path, "starting array editor");

    let value = ui.run().map_err(|err| eyre!("{err:#}"))?;
    emit(&value, &output).map_err(|err| eyre!("{err:#}"))?;
    Ok(())
}

fn build_ui(field_spec: Value, document: Value, cli: &Cli) -> Result<ArraySectionUI> {
    let mut ui = if looks_like_form_block(&field_spec) {
        let definition: FieldDefinition = serde_json::from_value(field_spec)
            .wrap_err("failed to read form-block field definition")?;
        ArraySectionUI::new(definition, document).with_path(cli.path.clone())
    } else {
        ArraySectionUI::from_schema(&field_spec, document, cli.path.clone())
            .map_err(|err| eyre!("{err:#}"))?
    };
    if let Some(title) = &cli.title {
        ui = ui.with_title(title.clone());
    }
    let options = UiOptions::default()
        .with_disabled(cli.disabled)
        .with_modal_size(cli.modal_size);
    Ok(ui.with_options(options))
}

fn build_output_options(cli: &Cli) -> Result<OutputOptions> {
    let mut destinations = Vec::new();
    for raw in &cli.outputs {
        if raw.trim().is_empty() {
            bail!("output destination cannot be empty");
        }
        destinations.push(OutputDestination::parse(raw));
    }
    if destinations.is_empty() {
        destinations.push(OutputDestination::Stdout);
    }

    let inferred = destinations
        .iter()
        .find_map(|destination| match destination {
            OutputDestination::File(path) => DocumentFormat::from_path(path),
            OutputDestination::Stdout => None,
        })
        .or_else(|| {
            cli.config
                .as_deref()
                .filter(|spec| *spec != "-")
                .and_then(|spec| DocumentFormat::from_path(Path::new(spec)))
        });
    let format = cli.format.or(inferred).unwrap_or_default();

    Ok(OutputOptions::new(format)
        .with_pretty(!cli.no_pretty)
        .with_overwrite(cli.force)
        .with_destinations(destinations))
}

/// Load a spec given as `-` (stdin), a file path, or an inline payload.
fn load_value(spec: &str, label: &str) -> Result<Value> {
    if spec == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .wrap_err("failed to read from stdin")?;
        return parse_contents(&buffer, None, label);
    }

    let path = Path::new(spec);
    match fs::read_to_string(path) {
        Ok(contents) => parse_contents(&contents, DocumentFormat::from_path(path), label)
            .wrap_err_with(|| format!("failed to load {label} from {}", path.display())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            parse_contents(spec, None, &format!("inline {label}"))
        }
        Err(err) => Err(err).wrap_err_with(|| format!("failed to read file {}", path.display())),
    }
}

fn parse_contents(contents: &str, format: Option<DocumentFormat>, label: &str) -> Result<Value> {
    let parsed = match format {
        Some(format) => parse_document_str(contents, format),
        None => parse_document_any(contents).map(|(value, _)| value),
    };
    parsed.map_err(|err| eyre!("failed to parse {label}: {err:#}"))
}

fn looks_like_form_block(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.contains_key("fieldKey"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_blocks_are_told_apart_from_schemas() {
        assert!(looks_like_form_block(&json!({"fieldKey": "headers", "properties": []})));
        assert!(!looks_like_form_block(&json!({"type": "array", "items": {}})));
    }

    #[test]
    fn output_format_prefers_flag_then_files() {
        let cli = Cli::parse_from([
            "array-section",
            "--schema",
            "{}",
            "-o",
            "out.json",
            "--no-pretty",
        ]);
        let options = build_output_options(&cli).expect("options");
        assert_eq!(options.format, DocumentFormat::Json);
        assert!(!options.pretty);
        assert_eq!(options.destinations, vec![OutputDestination::file("out.json")]);
    }

    #[test]
    fn inline_specs_parse_when_no_file_exists() {
        let value = load_value(r#"{"fieldKey": "x"}"#, "schema").expect("inline");
        assert_eq!(value, json!({"fieldKey": "x"}));
    }

    #[test]
    fn modal_size_flag_parses() {
        let cli = Cli::parse_from(["array-section", "-s", "{}", "--modal-size", "lg"]);
        assert_eq!(cli.modal_size, ModalSize::Large);
    }
}
