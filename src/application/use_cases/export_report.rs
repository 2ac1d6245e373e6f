use super::document_analyzer::DocumentAnalyzer;
use crate::shared::Result;
use serde_json::Value;

const DEFAULT_REPORT_NAME: &str = "report";

/// A rendered export ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportExport {
    /// `{reportName}.json`
    pub file_name: String,
    pub content: String,
}

/// ExportReportUseCase - serializes a document's item records as JSON
///
/// The export holds exactly the normalized item list, pretty-printed with
/// two-space indentation, so re-parsing it gives back the same records.
pub struct ExportReportUseCase {
    analyzer: DocumentAnalyzer,
}

impl ExportReportUseCase {
    pub fn new(analyzer: DocumentAnalyzer) -> Self {
        Self { analyzer }
    }

    pub fn execute(&self, report_name: Option<&str>, document: Value) -> Result<ReportExport> {
        let normalized = self.analyzer.normalize(document);
        let content = serde_json::to_string_pretty(&normalized.items)?;
        let file_name = format!("{}.json", Self::report_name(report_name));
        log::debug!(
            "exporting {} item(s) as {}",
            normalized.items.len(),
            file_name
        );
        Ok(ReportExport { file_name, content })
    }

    /// Base name for the export: the result name without directories or
    /// its `.json` extension, or `report`
    pub fn report_name(result_name: Option<&str>) -> String {
        let base = result_name
            .and_then(|n| n.rsplit(['/', '\\']).next())
            .map(str::trim)
            .unwrap_or_default();
        let base = base.strip_suffix(".json").unwrap_or(base);
        if base.is_empty() {
            DEFAULT_REPORT_NAME.to_string()
        } else {
            base.to_string()
        }
    }
}
