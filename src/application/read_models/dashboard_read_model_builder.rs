//! Builder for constructing DashboardReadModel from analysis results

use super::dashboard_read_model::DashboardReadModel;
use super::summary_view::SummaryView;
use super::vulnerability_view::VulnerabilityView;
use crate::analysis::domain::{ChartOutcome, FlatTable, NormalizedDocument, VulnerabilityEntry};
use crate::application::dto::ReportView;
use chrono::Utc;

/// Builder for constructing DashboardReadModel from domain objects
pub struct DashboardReadModelBuilder;

impl DashboardReadModelBuilder {
    /// Builds the read model; the summary is taken from the raw document
    pub fn build(
        name: &str,
        source: &str,
        view: ReportView,
        document: &NormalizedDocument,
        table: FlatTable,
        chart: ChartOutcome,
        vulnerabilities: &[VulnerabilityEntry],
    ) -> DashboardReadModel {
        DashboardReadModel {
            name: name.to_string(),
            source: source.to_string(),
            generated_at: Utc::now(),
            view,
            summary: SummaryView::from_document(&document.raw),
            item_count: document.items.len(),
            chart,
            table,
            vulnerabilities: vulnerabilities.iter().map(VulnerabilityView::from).collect(),
        }
    }
}
