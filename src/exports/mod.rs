//! Export functionality for reports
//!
//! Provides PDF and JSON export capabilities

pub mod json;
pub mod pdf;

pub use json::*;
pub use pdf::*;
