// Rust guideline compliant 2026-10-12

//! Output formatting module for the preferred-id CLI.
//!
//! This module formats naming systems and `$preferred-id` results in the
//! supported output formats (JSON, table, plain text).

use preferred_id_app::OperationResult;
use preferred_id_core::{IdentifierEntry, NamingSystem, OutputFormat, Payload};
use serde_json::json;
use std::io::Write;
use tabled::{builder::Builder, settings::Style};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Output formatter trait.
pub trait OutputFormatter {
    /// Formats a list of naming systems for display.
    ///
    /// # Arguments
    /// * `naming_systems` - The naming systems to format
    ///
    /// # Returns
    /// A formatted string representation of the list
    fn format_naming_systems(&self, naming_systems: &[NamingSystem]) -> String;

    /// Formats the status code and payload of a resolution.
    ///
    /// # Arguments
    /// * `result` - The operation result to format
    ///
    /// # Returns
    /// A formatted string representation of the result
    fn format_resolution(&self, result: &OperationResult) -> String;

    /// Formats an error message for display.
    fn format_error(&self, error: &str) -> String;
}

/// JSON output formatter.
///
/// Resolutions are printed as `{ "status_code": .., "payload": .. }` where the
/// payload is the FHIR `Parameters` or `OperationOutcome` resource.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render(&self, value: &serde_json::Value) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| json!({ "error": "Failed to serialize output" }).to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_naming_systems(&self, naming_systems: &[NamingSystem]) -> String {
        self.render(&json!({
            "naming_systems": naming_systems,
            "total": naming_systems.len(),
        }))
    }

    fn format_resolution(&self, result: &OperationResult) -> String {
        match serde_json::to_value(result) {
            Ok(value) => self.render(&value),
            Err(_) => json!({ "error": "Failed to serialize result" }).to_string(),
        }
    }

    fn format_error(&self, error: &str) -> String {
        json!({ "error": error }).to_string()
    }
}

fn describe_entries(entries: &[IdentifierEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let marker = if entry.is_preferred() { "*" } else { "" };
            format!("{}{}:{}", marker, entry.kind, entry.value)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Table output formatter.
pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    /// Creates a new table formatter.
    ///
    /// # Arguments
    /// * `use_color` - Whether to use colored output
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }
}

impl OutputFormatter for TableFormatter {
    fn format_naming_systems(&self, naming_systems: &[NamingSystem]) -> String {
        if naming_systems.is_empty() {
            return "No NamingSystem resources found.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(vec!["ID", "Name", "Status", "Identifiers"]);

        for ns in naming_systems {
            builder.push_record(vec![
                ns.id.clone().unwrap_or_default(),
                ns.name.clone().unwrap_or_default(),
                ns.status.clone().unwrap_or_default(),
                describe_entries(&ns.unique_id),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }

    fn format_resolution(&self, result: &OperationResult) -> String {
        let mut builder = Builder::default();
        match &result.payload {
            Payload::Parameters(parameters) => {
                builder.push_record(vec!["Status", "Type", "Value"]);
                for parameter in &parameters.parameter {
                    builder.push_record(vec![
                        result.status_code.to_string(),
                        parameter.name.clone(),
                        parameter.value_string.clone(),
                    ]);
                }
            }
            Payload::OperationOutcome(_) => {
                builder.push_record(vec!["Status", "Message"]);
                for issue in result.payload.issues() {
                    builder.push_record(vec![
                        result.status_code.to_string(),
                        issue.message().unwrap_or_default().to_string(),
                    ]);
                }
            }
        }

        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }

    fn format_error(&self, error: &str) -> String {
        if self.use_color {
            let mut buffer = Buffer::ansi();
            let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
            let _ = write!(buffer, "Error: ");
            let _ = buffer.reset();
            let _ = write!(buffer, "{}", error);
            String::from_utf8_lossy(buffer.as_slice()).to_string()
        } else {
            format!("Error: {}", error)
        }
    }
}

/// Plain text output formatter.
///
/// A successful resolution prints only the identifier value, so the output
/// can be captured by scripts.
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format_naming_systems(&self, naming_systems: &[NamingSystem]) -> String {
        if naming_systems.is_empty() {
            return "No NamingSystem resources found.".to_string();
        }

        let mut output = String::new();
        for ns in naming_systems {
            output.push_str(&format!(
                "{} {}\n",
                ns.id.as_deref().unwrap_or("-"),
                describe_entries(&ns.unique_id)
            ));
        }
        output
    }

    fn format_resolution(&self, result: &OperationResult) -> String {
        match &result.payload {
            Payload::Parameters(parameters) => parameters
                .parameter
                .iter()
                .map(|parameter| parameter.value_string.clone())
                .collect::<Vec<_>>()
                .join("\n"),
            Payload::OperationOutcome(_) => result
                .payload
                .issues()
                .iter()
                .map(|issue| {
                    format!(
                        "{} {}",
                        result.status_code,
                        issue.message().unwrap_or_default()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}", error)
    }
}

/// Factory function to create an appropriate formatter.
///
/// # Arguments
/// * `format` - The desired output format
/// * `use_color` - Whether to use colored output (table only)
/// * `pretty_json` - Whether JSON output is indented
///
/// # Returns
/// A boxed OutputFormatter instance
pub fn create_formatter(
    format: OutputFormat,
    use_color: bool,
    pretty_json: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter::new(pretty_json)),
        OutputFormat::Table => Box::new(TableFormatter::new(use_color)),
        OutputFormat::Plain => Box::new(PlainFormatter),
    }
}
