use crate::analysis::domain::json_display;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_require_array() -> bool {
    true
}

/// One way of locating the item list inside a result document
///
/// Config form:
/// ```yaml
/// normalization_rules:
///   - match: root
///   - match: field
///     name: results
///   - match: field
///     name: matches
///     require_array: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", rename_all = "snake_case")]
pub enum ExtractionRule {
    /// The document itself is the item list
    Root,
    /// A top-level field holds the item list
    Field {
        name: String,
        /// When false, the rule claims the document as soon as the field is
        /// truthy, even if it is not a sequence (which then yields no items)
        #[serde(default = "default_require_array")]
        require_array: bool,
    },
}

impl ExtractionRule {
    pub fn field(name: &str) -> Self {
        ExtractionRule::Field {
            name: name.to_string(),
            require_array: true,
        }
    }

    /// Returns the matched items, or `None` when the rule does not apply
    pub fn extract<'a>(&self, document: &'a Value) -> Option<&'a [Value]> {
        match self {
            ExtractionRule::Root => document.as_array().map(Vec::as_slice),
            ExtractionRule::Field {
                name,
                require_array,
            } => {
                let value = document.as_object()?.get(name)?;
                match value {
                    Value::Array(items) => Some(items.as_slice()),
                    other if !require_array && json_display::is_truthy(other) => {
                        Some(Default::default())
                    }
                    _ => None,
                }
            }
        }
    }
}

/// Ordered rule list; the first rule that applies wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationRules {
    rules: Vec<ExtractionRule>,
}

impl NormalizationRules {
    pub fn new(rules: Vec<ExtractionRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ExtractionRule] {
        &self.rules
    }
}

impl Default for NormalizationRules {
    fn default() -> Self {
        Self::new(vec![
            ExtractionRule::Root,
            ExtractionRule::field("results"),
            ExtractionRule::field("data"),
            ExtractionRule::Field {
                name: "matches".to_string(),
                require_array: false,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_rule() {
        let doc = json!([1, 2]);
        assert_eq!(ExtractionRule::Root.extract(&doc), Some(&[json!(1), json!(2)][..]));
        assert_eq!(ExtractionRule::Root.extract(&json!({"a": 1})), None);
    }

    #[test]
    fn test_field_rule_requires_array() {
        let rule = ExtractionRule::field("results");
        assert_eq!(rule.extract(&json!({"results": "nope"})), None);
        assert_eq!(rule.extract(&json!({"results": []})), Some(&[][..]));
    }

    #[test]
    fn test_presence_rule_claims_non_array() {
        let rule = ExtractionRule::Field {
            name: "matches".to_string(),
            require_array: false,
        };
        assert_eq!(rule.extract(&json!({"matches": {"x": 1}})), Some(&[][..]));
        assert_eq!(rule.extract(&json!({"matches": null})), None);
    }

    #[test]
    fn test_rules_deserialize_from_yaml() {
        let yaml = r#"
- match: root
- match: field
  name: hosts
- match: field
  name: events
  require_array: false
"#;
        let rules: Vec<ExtractionRule> = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(
            rules,
            vec![
                ExtractionRule::Root,
                ExtractionRule::field("hosts"),
                ExtractionRule::Field {
                    name: "events".to_string(),
                    require_array: false
                },
            ]
        );
    }
}
