//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod pretty;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Format and print to stdout
    fn print(&self, format: OutputFormat) -> Result<()> {
        let output = self.format(format)?;
        println!("{}", output);
        Ok(())
    }
}

/// Rows print as a table in both table and pretty mode
impl<T: Tabled + Serialize> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(json::format_json(self)?),
            OutputFormat::Table | OutputFormat::Pretty => Ok(table::format_table(self)),
        }
    }
}
