//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

const EMPTY: &str = "No results found.";

/// Format rows as a rounded table with a centered header
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return EMPTY.to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// One titled table per section; sections without rows are skipped
pub fn format_sections<T: Tabled>(sections: &[(String, Vec<T>)]) -> String {
    let rendered: Vec<String> = sections
        .iter()
        .filter(|(_, rows)| !rows.is_empty())
        .map(|(title, rows)| format!("{} ({})\n{}", title, rows.len(), format_table(rows)))
        .collect();

    if rendered.is_empty() {
        return EMPTY.to_string();
    }
    rendered.join("\n\n")
}
