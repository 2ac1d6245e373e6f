use super::json_display;
use super::Severity;
use serde::Serialize;
use serde_json::Value;

/// A nested object found anywhere in a result document that carries a CVE id
///
/// The source object is kept untouched; display fields are derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VulnerabilityEntry {
    pub record: Value,
    pub severity: Severity,
}

impl VulnerabilityEntry {
    pub fn new(record: Value) -> Self {
        let severity = Severity::from_cvss_value(record.get("cvss"));
        Self { record, severity }
    }

    pub fn cve(&self) -> String {
        self.truthy_field("cve")
    }

    pub fn ip(&self) -> String {
        self.truthy_field("ip")
    }

    pub fn product(&self) -> String {
        self.truthy_field("product")
    }

    pub fn version(&self) -> String {
        self.truthy_field("version")
    }

    pub fn owasp_category(&self) -> String {
        self.truthy_field("owasp_category")
    }

    /// Zero scores and ports are real values, so only null/absent fall back
    pub fn cvss(&self) -> String {
        self.present_field("cvss")
    }

    pub fn port(&self) -> String {
        self.present_field("port")
    }

    fn truthy_field(&self, name: &str) -> String {
        match self.record.get(name) {
            Some(v) if json_display::is_truthy(v) => json_display::display_text(v),
            _ => "-".to_string(),
        }
    }

    fn present_field(&self, name: &str) -> String {
        match self.record.get(name) {
            Some(Value::Null) | None => "-".to_string(),
            Some(v) => json_display::display_text(v),
        }
    }
}
