use crate::analysis::domain::{ChartOutcome, FlatTable, NormalizedDocument};
use crate::analysis::policies::{ExclusionPolicy, GroupingRules, NormalizationRules};
use crate::analysis::services::{
    ChartAggregator, Normalizer, TableFlattener, VulnerabilityExtractor,
};
use crate::application::dto::{AnalysisOptions, ReportView};
use crate::application::read_models::{DashboardReadModel, DashboardReadModelBuilder};
use crate::shared::Result;
use serde_json::Value;

/// DocumentAnalyzer - runs the whole analysis pipeline over one document
///
/// Normalization feeds the flattener and the chart aggregator; the
/// vulnerability extractor walks the raw document. Every artifact is
/// recomputed from scratch on each call.
#[derive(Debug, Clone, Default)]
pub struct DocumentAnalyzer {
    normalizer: Normalizer,
    flattener: TableFlattener,
    aggregator: ChartAggregator,
    extractor: VulnerabilityExtractor,
}

impl DocumentAnalyzer {
    pub fn new(options: &AnalysisOptions) -> Self {
        let normalization = options
            .normalization_rules
            .clone()
            .map(NormalizationRules::new)
            .unwrap_or_default();

        let mut policy = ExclusionPolicy::default();
        if let Some(fields) = &options.ignored_fields {
            policy = policy.with_ignored_fields(fields.clone());
        }
        policy = policy.with_extra_prefixes(options.excluded_prefixes.clone());

        let grouping = GroupingRules::new(
            options
                .grouping_rules
                .clone()
                .unwrap_or_else(GroupingRules::default_rules),
            options
                .chart_ignored_fields
                .clone()
                .unwrap_or_else(GroupingRules::default_ignored_fields),
        );

        Self {
            normalizer: Normalizer::new(normalization),
            flattener: TableFlattener::new(policy, options.max_depth),
            aggregator: ChartAggregator::new(grouping),
            extractor: VulnerabilityExtractor::new(options.max_depth),
        }
    }

    pub fn normalize(&self, document: Value) -> NormalizedDocument {
        self.normalizer.normalize(document)
    }

    /// Analyzes a document into a read model
    ///
    /// # Errors
    /// Fails only when the item records nest deeper than the configured
    /// limit. A failing vulnerability scan yields an empty list instead.
    pub fn analyze(
        &self,
        name: &str,
        source: &str,
        view: ReportView,
        document: Value,
    ) -> Result<DashboardReadModel> {
        let normalized = self.normalize(document);

        let vulnerabilities = self.extractor.extract(&normalized.raw).unwrap_or_else(|e| {
            log::warn!("vulnerability extraction failed, showing none: {}", e);
            Vec::new()
        });

        let (table, chart) = match view {
            ReportView::Dashboard => (
                self.flattener.flatten(&normalized.items)?,
                self.aggregator.aggregate(&normalized.items),
            ),
            ReportView::Vulnerabilities => (FlatTable::default(), ChartOutcome::NoData),
        };

        Ok(DashboardReadModelBuilder::build(
            name,
            source,
            view,
            &normalized,
            table,
            chart,
            &vulnerabilities,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::policies::ExtractionRule;
    use serde_json::json;

    fn host_search() -> Value {
        json!({
            "query": "nginx",
            "matches": [
                {"ip_str": "1.1.1.1", "location": {"country_code": "US"}, "port": 80,
                 "vulns": [{"cve": "CVE-2021-1", "cvss": 9.8}]},
                {"ip_str": "2.2.2.2", "location": {"country_code": "FR"}, "port": 443}
            ]
        })
    }

    #[test]
    fn test_dashboard_analysis() {
        let model = DocumentAnalyzer::default()
            .analyze("search.json", "local", ReportView::Dashboard, host_search())
            .unwrap();

        assert_eq!(model.item_count, 2);
        assert_eq!(
            model.table.columns,
            vec!["ip_str", "location.country_code", "port", "vulns"]
        );
        // country_code is nested, so the top-level port field groups the chart
        assert!(matches!(&model.chart, ChartOutcome::Histogram { field, .. } if field == "port"));
        assert_eq!(model.vulnerabilities.len(), 1);
        assert_eq!(model.summary.entries[0].label, "Query");
    }

    #[test]
    fn test_vulnerability_view_skips_table() {
        let model = DocumentAnalyzer::default()
            .analyze("search.json", "local", ReportView::Vulnerabilities, host_search())
            .unwrap();
        assert!(model.table.columns.is_empty());
        assert_eq!(model.chart, ChartOutcome::NoData);
        assert_eq!(model.vulnerabilities[0].cve, "CVE-2021-1");
    }

    #[test]
    fn test_too_deep_extraction_degrades_to_empty() {
        let mut doc = json!({"cve": "CVE-DEEP"});
        for _ in 0..10 {
            doc = json!([doc]);
        }
        let options = AnalysisOptions {
            max_depth: 4,
            normalization_rules: Some(vec![ExtractionRule::field("nothing")]),
            ..AnalysisOptions::default()
        };
        let model = DocumentAnalyzer::new(&options)
            .analyze("deep.json", "local", ReportView::Dashboard, doc)
            .unwrap();
        assert!(model.vulnerabilities.is_empty());
    }

    #[test]
    fn test_too_deep_table_is_an_error() {
        let mut record = json!({"leaf": 1});
        for _ in 0..10 {
            record = json!({ "n": record });
        }
        let options = AnalysisOptions {
            max_depth: 4,
            ..AnalysisOptions::default()
        };
        let result = DocumentAnalyzer::new(&options).analyze(
            "deep.json",
            "local",
            ReportView::Dashboard,
            json!([record]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_ignore_list_and_prefixes() {
        let options = AnalysisOptions {
            ignored_fields: Some(vec!["port".to_string()]),
            excluded_prefixes: vec!["location".to_string()],
            ..AnalysisOptions::default()
        };
        let model = DocumentAnalyzer::new(&options)
            .analyze("s", "local", ReportView::Dashboard, host_search())
            .unwrap();
        assert_eq!(model.table.columns, vec!["ip_str", "vulns"]);
    }
}
