/// Which sections of a dashboard report are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportView {
    /// Summary, chart, table and vulnerabilities
    #[default]
    Dashboard,
    /// Only the vulnerability list
    Vulnerabilities,
}
