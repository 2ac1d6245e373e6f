//! Summary panel view
//!
//! A handful of well-known top-level counters shown above the table.

use crate::analysis::domain::json_display;
use serde::Serialize;
use serde_json::Value;

/// One labelled summary figure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    pub label: String,
    pub value: String,
}

/// Summary figures in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SummaryView {
    pub entries: Vec<SummaryEntry>,
}

/// `(attribute, label, shown only when truthy)`
const SUMMARY_FIELDS: &[(&str, &str, bool)] = &[
    ("query", "Query", true),
    ("collected", "Hosts", false),
    ("data_count", "Banners", false),
    ("events_collected", "Events", false),
    ("ip", "IP", true),
];

impl SummaryView {
    /// Builds the summary from a raw result document
    ///
    /// Counters are shown whenever present (zero included); query and ip
    /// only when they hold a truthy value. Non-object documents have no
    /// summary.
    pub fn from_document(document: &Value) -> Self {
        let Value::Object(map) = document else {
            return Self::default();
        };

        let entries = SUMMARY_FIELDS
            .iter()
            .filter_map(|(field, label, truthy_only)| {
                let value = map.get(*field)?;
                let shown = if *truthy_only {
                    json_display::is_truthy(value)
                } else {
                    !value.is_null()
                };
                shown.then(|| SummaryEntry {
                    label: label.to_string(),
                    value: json_display::display_text(value),
                })
            })
            .collect();

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
