use super::json_display;
use super::Severity;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::HashSet;

/// One rendered vulnerability inside a stacked table cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VulnerabilityCell {
    pub text: String,
    pub severity: Severity,
}

/// Value of one flattened column in one row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// A scalar copied from the record
    Scalar(Value),
    /// A sequence joined into one comma-separated string
    Joined(String),
    /// A sequence of CVE-bearing objects
    Vulnerabilities(Vec<VulnerabilityCell>),
}

impl Cell {
    /// Plain text of the cell; vulnerability blocks are joined by newlines
    pub fn text(&self) -> String {
        match self {
            Cell::Scalar(value) => json_display::display_text(value),
            Cell::Joined(text) => text.clone(),
            Cell::Vulnerabilities(cells) => cells
                .iter()
                .map(|c| c.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Mapping from dotted path to cell, derived from exactly one item record
///
/// Keys keep their first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedRow {
    cells: Vec<(String, Cell)>,
}

impl FlattenedRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a cell; a later write to the same path replaces the earlier one
    pub fn insert(&mut self, key: String, cell: Cell) {
        if let Some(slot) = self.cells.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = cell;
        } else {
            self.cells.push((key, cell));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.cells.iter().find(|(k, _)| k == key).map(|(_, c)| c)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for FlattenedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (key, cell) in &self.cells {
            map.serialize_entry(key, cell)?;
        }
        map.end()
    }
}

/// How a single cell should be drawn by a formatter
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedCell {
    /// Key absent from this row
    Empty,
    Plain(String),
    /// A numeric value in a cvss column, annotated with its severity
    Annotated { text: String, severity: Severity },
    /// Vulnerability blocks stacked vertically, each colored by severity
    Stacked(Vec<VulnerabilityCell>),
}

/// Flattened rows plus the union of their columns
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlatTable {
    pub columns: Vec<String>,
    pub rows: Vec<FlattenedRow>,
}

impl FlatTable {
    /// Builds the table; columns are the first-seen union of every row's keys
    pub fn from_rows(rows: Vec<FlattenedRow>) -> Self {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if seen.insert(key.to_string()) {
                    columns.push(key.to_string());
                }
            }
        }
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Columns whose header mentions "vuln" get extra width
    pub fn is_wide_column(column: &str) -> bool {
        column.to_lowercase().contains("vuln")
    }

    pub fn render_cell(row: &FlattenedRow, column: &str) -> RenderedCell {
        let Some(cell) = row.get(column) else {
            return RenderedCell::Empty;
        };

        match cell {
            Cell::Vulnerabilities(cells) => RenderedCell::Stacked(cells.clone()),
            other => {
                let text = other.text();
                if column.to_lowercase().contains("cvss") {
                    let numeric = match other {
                        Cell::Scalar(value) => json_display::as_number(value),
                        _ => json_display::as_number(&Value::String(text.clone())),
                    };
                    if let Some(score) = numeric {
                        let severity = Severity::classify(Some(score));
                        return RenderedCell::Annotated {
                            text: format!("{} ({})", text, severity),
                            severity,
                        };
                    }
                }
                RenderedCell::Plain(text)
            }
        }
    }
}
