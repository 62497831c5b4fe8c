use crate::api::models::{PicklistEntry, RateRow};
use crate::core::form::{FieldBindingStore, FieldName};
use crate::error::AppError;
use crate::error::DisplayError;
use comfy_table::{Attribute, Cell, Color, Table, presets};
use crossterm::terminal;
use serde_json::Value;
use unicode_width::UnicodeWidthChar;

const MAX_CELL_WIDTH: usize = 40;

/// Formatter and utilities for table display
pub struct TableDisplay {
    max_width: Option<usize>,
    use_colors: bool,
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDisplay {
    /// Create a new TableDisplay instance
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }

    /// Detect terminal width
    fn detect_terminal_width() -> Option<usize> {
        match terminal::size() {
            Ok((cols, _rows)) => {
                let width = cols as usize;
                // Clamp for stability on very narrow or very wide terminals
                if width < 40 {
                    Some(40)
                } else if width > 200 {
                    Some(200)
                } else {
                    Some(width)
                }
            }
            Err(_) => Some(80), // Default width
        }
    }

    /// Create a TableDisplay instance with maximum width setting
    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Set color usage
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn configure_table_width(&self, table: &mut Table) {
        if let Some(width) = self.max_width {
            table.set_width(width as u16);
        }
    }

    fn header_cell(&self, text: &str) -> Cell {
        if self.use_colors {
            Cell::new(text).add_attribute(Attribute::Bold).fg(Color::Cyan)
        } else {
            Cell::new(text)
        }
    }

    /// Render the returned rate rows. The column set is owned by the remote
    /// service, so columns are derived from the rows themselves: first-row
    /// order, extended by any columns that only later rows carry.
    pub fn render_rate_rows(&self, rows: &[RateRow]) -> Result<String, AppError> {
        if rows.is_empty() {
            return Ok("No rate cards matched the given filters.".to_string());
        }

        let mut columns: Vec<String> = Vec::new();
        for row in rows {
            for column in row.columns() {
                if !columns.iter().any(|c| c == column) {
                    columns.push(column.clone());
                }
            }
        }
        if columns.is_empty() {
            return Err(AppError::Display(DisplayError::TableFormat(
                "rate rows carry no columns".to_string(),
            )));
        }

        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
        self.configure_table_width(&mut table);

        table.set_header(columns.iter().map(|c| self.header_cell(c)).collect::<Vec<_>>());

        for row in rows {
            let cells: Vec<Cell> = columns
                .iter()
                .map(|column| {
                    let text = row.get(column).map(format_value).unwrap_or_default();
                    Cell::new(truncate_cell(&text, MAX_CELL_WIDTH))
                })
                .collect();
            table.add_row(cells);
        }

        Ok(table.to_string())
    }

    /// Render one named option set as a label/value table.
    pub fn render_option_set(&self, title: &str, options: &[PicklistEntry]) -> String {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        self.configure_table_width(&mut table);
        table.set_header(vec![self.header_cell(title), self.header_cell("Value")]);

        if options.is_empty() {
            table.add_row(vec![Cell::new("(no options available)"), Cell::new("")]);
        } else {
            for option in options {
                table.add_row(vec![
                    Cell::new(truncate_cell(&option.label, MAX_CELL_WIDTH)),
                    Cell::new(truncate_cell(&option.value, MAX_CELL_WIDTH)),
                ]);
            }
        }

        table.to_string()
    }

    /// Render the current filter bindings, record-sourced and user-supplied.
    pub fn render_filter_values(&self, store: &FieldBindingStore) -> String {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        self.configure_table_width(&mut table);
        table.set_header(vec![self.header_cell("Filter"), self.header_cell("Value")]);

        for field in FieldName::ALL {
            table.add_row(vec![
                Cell::new(field.label()),
                Cell::new(store.get(field).unwrap_or("—")),
            ]);
        }

        table.to_string()
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "—".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => value.to_string(),
    }
}

/// Truncate display text by terminal columns, not bytes or chars.
fn truncate_cell(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut result = String::new();
    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > max_width {
            result.push('…');
            return result;
        }
        width += char_width;
        result.push(c);
    }
    result
}
