use crate::analysis::policies::{ExtractionRule, GroupingRule};
use crate::analysis::services::DEFAULT_MAX_DEPTH;

/// Tunables for the analysis pipeline, filled from the config file
///
/// `None` keeps the built-in defaults for that piece.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    pub max_depth: usize,
    pub ignored_fields: Option<Vec<String>>,
    pub chart_ignored_fields: Option<Vec<String>>,
    /// Dotted-path prefixes dropped in addition to the built-in exclusions
    pub excluded_prefixes: Vec<String>,
    pub normalization_rules: Option<Vec<ExtractionRule>>,
    pub grouping_rules: Option<Vec<GroupingRule>>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            ignored_fields: None,
            chart_ignored_fields: None,
            excluded_prefixes: Vec::new(),
            normalization_rules: None,
            grouping_rules: None,
        }
    }
}
