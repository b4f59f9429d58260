//! Format resolutions, batches, entities, and validation results as text.

use crate::registry::{EntityDescriptor, ValidationResult};
use crate::resolver::{BatchResolution, ResolutionResult};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::Value;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Format a single resolution as human-readable text.
pub fn format_resolution_text(
    entity_id: &str,
    filename: &str,
    result: &ResolutionResult,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("{} / {}", entity_id, filename))
    ));
    out.push_str(&format!(
        "  Resolved: {}\n",
        if result.is_success() { "yes" } else { "no" }
    ));
    out.push_str(&format!("  Source: {}\n", result.source()));
    if let Some(error) = result.error() {
        out.push_str(&format!("  Error: {}\n", error));
    }
    if let Some(urls) = result.provenance() {
        for (label, url) in [("Raw", &urls.raw), ("API", &urls.api), ("Web", &urls.html)] {
            if let Some(url) = url {
                out.push_str(&format!("  {} URL: {}\n", label, url));
            }
        }
    }
    if let Some(data) = result.data() {
        out.push('\n');
        out.push_str(&format_data_text(data));
        out.push('\n');
    }
    out
}

/// Render a value. Arrays of objects become a table keyed by the first row's
/// columns; strings print verbatim; anything else is pretty JSON.
pub fn format_data_text(data: &Value) -> String {
    match data {
        Value::String(text) => text.clone(),
        Value::Array(rows) if !rows.is_empty() && rows.iter().all(Value::is_object) => {
            let header: Vec<String> = rows[0]
                .as_object()
                .map(|row| row.keys().cloned().collect())
                .unwrap_or_default();
            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            table.set_header(header.clone());
            for row in rows {
                table.add_row(
                    header
                        .iter()
                        .map(|column| cell_text(row.get(column)))
                        .collect::<Vec<_>>(),
                );
            }
            format!("{}\n\n{} rows.", table, rows.len())
        }
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Format a batch as a per-file summary table.
pub fn format_batch_text(batch: &BatchResolution) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("Batch: {}", batch.entity_id))
    ));
    if batch.results.is_empty() {
        out.push_str("Entity declares no files.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["File", "Resolved", "Source", "Error"]);
    for (file, result) in &batch.results {
        table.add_row(vec![
            file.clone(),
            if result.is_success() { "yes" } else { "no" }.to_string(),
            result.source().to_string(),
            result.error().unwrap_or("-").to_string(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!(
        "Total: {} files, {} resolved, {} failed.\n",
        batch.summary.attempted,
        batch.summary.succeeded,
        batch.summary.failed()
    ));
    out
}

/// Format the registered entities.
pub fn format_entities_text(entities: &[&EntityDescriptor]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Entities")));
    if entities.is_empty() {
        out.push_str("No entities configured.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Entity", "Files", "Remote folder", "Description"]);
    for entity in entities {
        table.add_row(vec![
            entity.entity_id.clone(),
            entity.files.join(", "),
            entity.remote_folder.clone(),
            entity.description.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("Total: {} entities.\n", entities.len()));
    out
}

/// Format validation results, one section per subject.
pub fn format_validation_text(results: &[ValidationResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Validation")));
    for result in results {
        out.push_str(&format!(
            "{} ({}/{} checks passed)\n",
            result.subject,
            result.passed_checks(),
            result.checks.len()
        ));
        for (description, passed) in &result.checks {
            let mark = if *passed { "ok" } else { "FAIL" };
            out.push_str(&format!("  [{}] {}\n", mark, description));
        }
        for error in &result.errors {
            out.push_str(&format!("  error: {}\n", error));
        }
        out.push('\n');
    }
    let valid = results.iter().filter(|r| r.is_valid()).count();
    out.push_str(&format!("Total: {} checked, {} valid.\n", results.len(), valid));
    out
}
