//! Display models for CLI output
//!
//! Catalog types converted into table rows and JSON-friendly shapes.

pub mod display;

pub use display::{CategoryDisplay, EntryDisplay, SectionDisplay};
