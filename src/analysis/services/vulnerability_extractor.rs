use super::table_flattener::DEFAULT_MAX_DEPTH;
use crate::analysis::domain::json_display;
use crate::analysis::domain::VulnerabilityEntry;
use crate::shared::error::DashboardError;
use crate::shared::Result;
use serde_json::Value;

/// VulnerabilityExtractor - collects every nested object with a CVE id
///
/// Traversal is depth-first pre-order through both object attributes and
/// array elements. A matching object is emitted before its children, and its
/// children are still scanned. Nothing is deduplicated.
#[derive(Debug, Clone)]
pub struct VulnerabilityExtractor {
    max_depth: usize,
}

impl VulnerabilityExtractor {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn extract(&self, document: &Value) -> Result<Vec<VulnerabilityEntry>> {
        let mut found = Vec::new();
        self.walk(document, 0, &mut found)?;
        log::debug!("extracted {} vulnerability record(s)", found.len());
        Ok(found)
    }

    fn walk(&self, value: &Value, depth: usize, found: &mut Vec<VulnerabilityEntry>) -> Result<()> {
        if depth > self.max_depth {
            return Err(DashboardError::NestingTooDeep {
                limit: self.max_depth,
            }
            .into());
        }

        match value {
            Value::Array(elements) => {
                for element in elements {
                    self.walk(element, depth + 1, found)?;
                }
            }
            Value::Object(map) => {
                if map.get("cve").is_some_and(json_display::is_truthy) {
                    found.push(VulnerabilityEntry::new(value.clone()));
                }
                for child in map.values() {
                    self.walk(child, depth + 1, found)?;
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        }

        Ok(())
    }
}

impl Default for VulnerabilityExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}
