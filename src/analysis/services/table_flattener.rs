use crate::analysis::domain::json_display;
use crate::analysis::domain::{Cell, FlatTable, FlattenedRow, Severity, VulnerabilityCell};
use crate::analysis::policies::ExclusionPolicy;
use crate::shared::error::DashboardError;
use crate::shared::Result;
use serde_json::{Map, Value};

/// Default limit on object nesting for the flattener and the extractor
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// TableFlattener - turns item records into dotted-path columns
///
/// Nested objects are flattened depth-first into `parent.child` columns.
/// Sequences of CVE-bearing objects become stacked vulnerability cells,
/// other sequences are joined into one comma-separated string.
#[derive(Debug, Clone)]
pub struct TableFlattener {
    policy: ExclusionPolicy,
    max_depth: usize,
}

impl TableFlattener {
    pub fn new(policy: ExclusionPolicy, max_depth: usize) -> Self {
        Self { policy, max_depth }
    }

    /// Flattens every record and collects the column union
    pub fn flatten(&self, items: &[Value]) -> Result<FlatTable> {
        let rows = items
            .iter()
            .map(|item| self.flatten_record(item))
            .collect::<Result<Vec<_>>>()?;
        Ok(FlatTable::from_rows(rows))
    }

    pub fn flatten_record(&self, record: &Value) -> Result<FlattenedRow> {
        let mut row = FlattenedRow::new();
        match record {
            Value::Object(map) => self.flatten_into(&mut row, map, "", 1)?,
            Value::Array(elements) => {
                // Sequences used as records are keyed by index
                let indexed: Map<String, Value> = elements
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v.clone()))
                    .collect();
                self.flatten_into(&mut row, &indexed, "", 1)?;
            }
            _ => {}
        }
        Ok(row)
    }

    fn flatten_into(
        &self,
        row: &mut FlattenedRow,
        map: &Map<String, Value>,
        prefix: &str,
        depth: usize,
    ) -> Result<()> {
        if depth > self.max_depth {
            return Err(DashboardError::NestingTooDeep {
                limit: self.max_depth,
            }
            .into());
        }

        for (key, value) in map {
            if self.policy.is_ignored_field(key) {
                continue;
            }

            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };

            if self.policy.is_excluded_path(&path) || json_display::is_empty(value) {
                continue;
            }

            match value {
                Value::Array(elements) => {
                    let cell = if is_vulnerability_list(elements) {
                        Cell::Vulnerabilities(elements.iter().map(render_vulnerability).collect())
                    } else {
                        Cell::Joined(join_elements(elements))
                    };
                    row.insert(path, cell);
                }
                Value::Object(nested) => self.flatten_into(row, nested, &path, depth + 1)?,
                scalar => row.insert(path, Cell::Scalar(scalar.clone())),
            }
        }

        Ok(())
    }
}

impl Default for TableFlattener {
    fn default() -> Self {
        Self::new(ExclusionPolicy::default(), DEFAULT_MAX_DEPTH)
    }
}

fn is_vulnerability_list(elements: &[Value]) -> bool {
    !elements.is_empty()
        && elements
            .iter()
            .all(|e| e.as_object().is_some_and(|o| o.contains_key("cve")))
}

fn join_elements(elements: &[Value]) -> String {
    elements
        .iter()
        .map(json_display::display_text)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `{cve} ({product} {version}, CVSS {cvss}, {severity}) – {description}`
fn render_vulnerability(entry: &Value) -> VulnerabilityCell {
    let field = |name: &str| entry.get(name).filter(|v| !v.is_null());
    let text_or = |name: &str, fallback: &str| {
        field(name)
            .map(json_display::display_text)
            .unwrap_or_else(|| fallback.to_string())
    };

    let severity = Severity::from_cvss_value(field("cvss"));
    let text = format!(
        "{} ({} {}, CVSS {}, {}) – {}",
        text_or("cve", "null"),
        text_or("product", "unknown"),
        text_or("version", "unknown"),
        text_or("cvss", "N/A"),
        severity,
        text_or("description", "")
    );

    VulnerabilityCell { text, severity }
}
