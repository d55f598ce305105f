//! Output formatting utilities for the CLI.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use console::style;
use serde::Serialize;

use crate::services::format_currency;

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// Create a standard list table with the given headers.
///
/// Uses the NOTHING preset (no borders) for a clean CLI aesthetic.
pub fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

/// Render the table to string with a count header.
pub fn render_list(entity_name: &str, table: &Table, total: usize) -> String {
    if total == 0 {
        return format!("No {entity_name}s found.");
    }
    let noun = if total == 1 {
        entity_name.to_string()
    } else {
        format!("{entity_name}s")
    };
    format!("{} {}:\n{}", style(total).bold(), noun, table)
}

/// Bold section heading.
pub fn heading(title: &str) -> String {
    style(title).bold().underlined().to_string()
}

/// Currency or "-" when absent.
pub fn money_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), format_currency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_opt() {
        assert_eq!(money_opt(None), "-");
        assert_eq!(money_opt(Some(350_000.0)), "$350,000");
    }

    #[test]
    fn test_render_list_empty() {
        let table = list_table(&["a"]);
        assert_eq!(render_list("move", &table, 0), "No moves found.");
    }
}
