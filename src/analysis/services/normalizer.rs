use crate::analysis::domain::NormalizedDocument;
use crate::analysis::policies::NormalizationRules;
use serde_json::Value;

/// Normalizer - extracts the item records from an arbitrary result document
///
/// Rules are evaluated in order and the first one that applies decides the
/// items. Unrecognized shapes degrade to an empty item list, never an error.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    rules: NormalizationRules,
}

impl Normalizer {
    pub fn new(rules: NormalizationRules) -> Self {
        Self { rules }
    }

    pub fn normalize(&self, document: Value) -> NormalizedDocument {
        let items = self
            .rules
            .rules()
            .iter()
            .find_map(|rule| rule.extract(&document))
            .map(<[Value]>::to_vec)
            .unwrap_or_default();

        log::debug!("normalized document into {} item(s)", items.len());
        NormalizedDocument::new(document, items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::policies::ExtractionRule;
    use serde_json::json;

    #[test]
    fn test_sequence_document_is_the_item_list() {
        let doc = json!([{"ip": "1.1.1.1"}, {"ip": "2.2.2.2"}]);
        let normalized = Normalizer::default().normalize(doc.clone());
        assert_eq!(normalized.items, doc.as_array().unwrap().clone());
        assert_eq!(normalized.raw, doc);
    }

    #[test]
    fn test_results_data_and_matches_shapes() {
        let normalizer = Normalizer::default();
        for field in ["results", "data", "matches"] {
            let doc = json!({ field: [{"port": 22}, {"port": 80}] });
            let normalized = normalizer.normalize(doc);
            assert_eq!(normalized.items, vec![json!({"port": 22}), json!({"port": 80})]);
        }
    }

    #[test]
    fn test_results_take_precedence_over_data() {
        let doc = json!({"data": [1], "results": [2]});
        assert_eq!(Normalizer::default().normalize(doc).items, vec![json!(2)]);
    }

    #[test]
    fn test_non_array_results_fall_through_to_data() {
        let doc = json!({"results": {"total": 3}, "data": [{"a": 1}]});
        assert_eq!(Normalizer::default().normalize(doc).items, vec![json!({"a": 1})]);
    }

    #[test]
    fn test_unrecognized_shapes_are_empty() {
        let normalizer = Normalizer::default();
        for doc in [json!({"foo": 1}), Value::Null, json!("text"), json!({"matches": 5})] {
            let normalized = normalizer.normalize(doc.clone());
            assert!(normalized.items.is_empty());
            assert_eq!(normalized.raw, doc);
        }
    }

    #[test]
    fn test_custom_rules() {
        let normalizer = Normalizer::new(NormalizationRules::new(vec![ExtractionRule::field(
            "hosts",
        )]));
        let doc = json!({"hosts": [{"ip": "x"}], "results": [1]});
        assert_eq!(normalizer.normalize(doc).items, vec![json!({"ip": "x"})]);
    }
}
