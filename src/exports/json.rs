//! JSON export functionality
//!
//! Serializes the assembled report model; useful for diffing inventories
//! between runs without opening the PDF.

use anyhow::{Context, Result};

use crate::report::model::ReportModel;

/// Export the full report model as pretty-printed JSON.
pub fn export_report_json(model: &ReportModel) -> Result<String> {
    serde_json::to_string_pretty(model).context("Failed to serialize report model")
}

/// Default output filename for the JSON format.
pub fn default_json_filename(model: &ReportModel) -> String {
    model.default_pdf_filename().replace(".pdf", ".json")
}
