//! Report assembly: hierarchy traversal and cross-referencing
//!
//! Resolves cable terminations, aggregates interface VLANs and assembles
//! the section/TOC model consumed by the exporters.

pub mod builder;
pub mod colors;
pub mod model;
pub mod terminations;
pub mod vlans;

pub use builder::ReportBuilder;
pub use colors::color_name_from_hex;
pub use model::*;
pub use terminations::remote_termination;
pub use vlans::interface_vlans;
