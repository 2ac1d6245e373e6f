//! Vulnerability list view
//!
//! Flat display strings for each extracted vulnerability record.

use crate::analysis::domain::{Severity, VulnerabilityEntry};
use serde::Serialize;

/// View representation of one vulnerability record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VulnerabilityView {
    pub cve: String,
    pub ip: String,
    pub cvss: String,
    pub port: String,
    pub product: String,
    pub version: String,
    pub owasp_category: String,
    pub severity: Severity,
}

impl From<&VulnerabilityEntry> for VulnerabilityView {
    fn from(entry: &VulnerabilityEntry) -> Self {
        Self {
            cve: entry.cve(),
            ip: entry.ip(),
            cvss: entry.cvss(),
            port: entry.port(),
            product: entry.product(),
            version: entry.version(),
            owasp_category: entry.owasp_category(),
            severity: entry.severity,
        }
    }
}
