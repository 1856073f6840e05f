//! NetBox Tenant Report — Infrastructure Documentation Generator
//!
//! Queries a NetBox instance over its REST API and renders a tenant's
//! infrastructure into a paginated PDF (or JSON) report:
//! - Sites, racks and devices in hierarchy order
//! - Patch panel front/rear port connectivity via cable termination resolution
//! - Interface tables with VLAN and IP address cross-references
//! - Table of contents built from emitted sections

pub mod app;
pub mod cli;
mod command_handlers;
pub mod client;
pub mod config;
pub mod exports;
pub mod logging;
pub mod models;
pub mod report;

pub use cli::OutputFormat;
pub use client::{Inventory, InventoryClient};
pub use config::Settings;
pub use exports::{export_report_json, generate_report_pdf};
pub use models::*;
pub use report::{
    ConnectivityTable, ReportBuilder, ReportModel, Section, SectionBody, TocEntry,
    color_name_from_hex, interface_vlans, remote_termination,
};

// Re-export logging macros for use across crate
pub use crate::logging::macros;
