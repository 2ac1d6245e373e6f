use super::exclusion_policy::DEFAULT_IGNORED_FIELDS;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Time fields are unique per record and never make a useful histogram
const NOISY_CHART_FIELDS: &[&str] = &["timestamp", "last_update"];

/// One heuristic for choosing the field a chart groups by
///
/// Config form:
/// ```yaml
/// grouping_rules:
///   - match: name_contains
///     value: country
///   - match: scalar_value
///   - match: any_field
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", content = "value", rename_all = "snake_case")]
pub enum GroupingRule {
    /// First attribute whose name contains the substring (case-sensitive)
    NameContains(String),
    /// First attribute holding a string or a number
    ScalarValue,
    /// First attribute of any kind
    AnyField,
}

impl GroupingRule {
    fn select<'a>(&self, candidates: &[(&'a String, &'a Value)]) -> Option<&'a String> {
        let found = match self {
            GroupingRule::NameContains(needle) => candidates
                .iter()
                .find(|(name, _)| name.contains(needle.as_str())),
            GroupingRule::ScalarValue => candidates
                .iter()
                .find(|(_, value)| value.is_string() || value.is_number()),
            GroupingRule::AnyField => candidates.first(),
        };
        found.map(|(name, _)| *name)
    }
}

/// Ordered grouping heuristics plus the fields they never consider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingRules {
    rules: Vec<GroupingRule>,
    ignored_fields: Vec<String>,
}

impl GroupingRules {
    pub fn new(rules: Vec<GroupingRule>, ignored_fields: Vec<String>) -> Self {
        Self {
            rules,
            ignored_fields,
        }
    }

    pub fn default_rules() -> Vec<GroupingRule> {
        vec![
            GroupingRule::NameContains("country".to_string()),
            GroupingRule::NameContains("port".to_string()),
            GroupingRule::NameContains("org".to_string()),
            GroupingRule::NameContains("ip".to_string()),
            GroupingRule::ScalarValue,
            GroupingRule::AnyField,
        ]
    }

    pub fn default_ignored_fields() -> Vec<String> {
        DEFAULT_IGNORED_FIELDS
            .iter()
            .chain(NOISY_CHART_FIELDS)
            .map(|s| s.to_string())
            .collect()
    }

    /// Picks the grouping field by inspecting the sample record only
    pub fn select_field(&self, sample: &Value) -> Option<String> {
        let map = sample.as_object()?;
        let candidates: Vec<(&String, &Value)> = map
            .iter()
            .filter(|(name, _)| !self.ignored_fields.iter().any(|f| f == *name))
            .collect();

        self.rules
            .iter()
            .find_map(|rule| rule.select(&candidates))
            .cloned()
    }
}

impl Default for GroupingRules {
    fn default() -> Self {
        Self::new(Self::default_rules(), Self::default_ignored_fields())
    }
}
