//! Report model types
//!
//! The builder assembles these from flat API collections; nothing here is
//! mutated after the build finishes. The renderer and the JSON export both
//! consume this model.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::models::{Device, Rack, Site, Tenant};

/// TOC nesting level for a location section.
pub const LEVEL_LOCATION: u8 = 0;
/// TOC nesting level for a rack section.
pub const LEVEL_RACK: u8 = 1;
/// TOC nesting level for a device section. Level 2 is intentionally unused:
/// port and interface tables do not get their own TOC entries.
pub const LEVEL_DEVICE: u8 = 3;

/// Columns of a front/rear port connectivity table.
pub const PORT_COLUMNS: &[&str] = &["Name", "Type", "Connected To", "Cable Type", "Length", "Color"];

/// Columns of an interface connectivity table.
pub const INTERFACE_COLUMNS: &[&str] = &[
    "Name",
    "Type",
    "Possible VLANs",
    "IP Addresses",
    "Connected To",
    "Cable Type",
    "Length",
    "Color",
];

/// One table-of-contents entry, recorded at section emission time.
#[derive(Debug, Serialize, Clone)]
pub struct TocEntry {
    pub title: String,
    pub level: u8,
    /// Sequential section index at the moment the entry was emitted.
    pub position: usize,
}

/// A titled grid of connectivity data.
///
/// Front ports, rear ports and interfaces all render through this one shape;
/// only the column set and row extraction differ.
#[derive(Debug, Serialize, Clone)]
pub struct ConnectivityTable {
    pub title: String,
    pub columns: Vec<String>,
    /// Each row has exactly `columns.len()` cells.
    pub rows: Vec<Vec<String>>,
}

impl ConnectivityTable {
    pub fn new(title: &str, columns: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// A device section body: the device snapshot plus its connectivity tables.
#[derive(Debug, Serialize, Clone)]
pub struct DeviceDetails {
    pub device: Device,
    pub tables: Vec<ConnectivityTable>,
}

/// Payload of a report section.
#[derive(Debug, Serialize, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionBody {
    Location(Site),
    Rack(Rack),
    Device(DeviceDetails),
}

/// A titled block of report content with a TOC nesting level.
#[derive(Debug, Serialize, Clone)]
pub struct Section {
    pub title: String,
    pub level: u8,
    pub body: SectionBody,
}

/// The assembled report: tenant header, ordered sections, TOC index.
#[derive(Debug, Serialize)]
pub struct ReportModel {
    pub tenant: Tenant,
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<Section>,
    pub toc: Vec<TocEntry>,
}

impl ReportModel {
    /// Default output filename: `{tenant_name}_{YYYY-MM-DD_HH-MM-SS}.pdf`.
    pub fn default_pdf_filename(&self) -> String {
        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        format!("{}_{}.pdf", self.tenant.name, timestamp)
    }
}
