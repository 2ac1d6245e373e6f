//! Dashboard read model
//!
//! Everything a formatter needs to draw one result document.

use super::summary_view::SummaryView;
use super::vulnerability_view::VulnerabilityView;
use crate::analysis::domain::{ChartOutcome, FlatTable};
use crate::application::dto::ReportView;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Main read model for one analyzed result document
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReadModel {
    /// Report title, usually the result file name
    pub name: String,
    /// Where the document was loaded from
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub view: ReportView,
    pub summary: SummaryView,
    /// Number of item records found by normalization
    pub item_count: usize,
    pub chart: ChartOutcome,
    pub table: FlatTable,
    pub vulnerabilities: Vec<VulnerabilityView>,
}

impl DashboardReadModel {
    pub fn shows_dashboard(&self) -> bool {
        self.view == ReportView::Dashboard
    }
}
