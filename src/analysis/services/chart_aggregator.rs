use crate::analysis::domain::json_display;
use crate::analysis::domain::{ChartBucket, ChartOutcome};
use crate::analysis::policies::GroupingRules;
use serde_json::Value;

const UNKNOWN_LABEL: &str = "Unknown";

/// ChartAggregator - builds a frequency histogram over one inferred field
#[derive(Debug, Clone, Default)]
pub struct ChartAggregator {
    rules: GroupingRules,
}

impl ChartAggregator {
    pub fn new(rules: GroupingRules) -> Self {
        Self { rules }
    }

    pub fn aggregate(&self, items: &[Value]) -> ChartOutcome {
        let Some(sample) = items.first() else {
            return ChartOutcome::NoData;
        };

        let field = self.rules.select_field(sample);
        let mut buckets: Vec<ChartBucket> = Vec::new();

        for item in items {
            let value = field.as_deref().and_then(|f| item.get(f));
            let label = label_for(value);
            match buckets.iter_mut().find(|b| b.name == label) {
                Some(bucket) => bucket.value += 1,
                None => buckets.push(ChartBucket::new(label, 1)),
            }
        }

        log::debug!(
            "chart grouping field {:?} produced {} bucket(s)",
            field,
            buckets.len()
        );

        match field {
            Some(field) if buckets.len() >= 2 => ChartOutcome::Histogram { field, buckets },
            field => ChartOutcome::InsufficientData { field },
        }
    }
}

fn label_for(value: Option<&Value>) -> String {
    let label = match value {
        Some(Value::Array(elements)) => elements
            .iter()
            .map(|e| match e {
                Value::Null => String::new(),
                other => json_display::display_text(other),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Some(v) if json_display::is_truthy(v) => json_display::display_text(v),
        _ => String::new(),
    };

    if label.is_empty() {
        UNKNOWN_LABEL.to_string()
    } else {
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_country_histogram() {
        let items = vec![
            json!({"country": "US"}),
            json!({"country": "US"}),
            json!({"country": "FR"}),
        ];
        let outcome = ChartAggregator::default().aggregate(&items);
        assert_eq!(
            outcome,
            ChartOutcome::Histogram {
                field: "country".to_string(),
                buckets: vec![ChartBucket::new("US", 2), ChartBucket::new("FR", 1)],
            }
        );
    }

    #[test]
    fn test_single_label_is_insufficient() {
        let items = vec![json!({"country": "US"}), json!({"country": "US"})];
        assert_eq!(
            ChartAggregator::default().aggregate(&items),
            ChartOutcome::InsufficientData {
                field: Some("country".to_string())
            }
        );
    }

    #[test]
    fn test_empty_items() {
        assert_eq!(ChartAggregator::default().aggregate(&[]), ChartOutcome::NoData);
    }

    #[test]
    fn test_falsy_values_become_unknown() {
        let items = vec![
            json!({"port": 0}),
            json!({"port": null}),
            json!({}),
            json!({"port": ""}),
            json!({"port": 22}),
        ];
        let outcome = ChartAggregator::default().aggregate(&items);
        assert_eq!(
            outcome.buckets(),
            &[ChartBucket::new("Unknown", 4), ChartBucket::new("22", 1)]
        );
    }

    #[test]
    fn test_sequence_values_are_joined() {
        let items = vec![
            json!({"ports": [80, 443]}),
            json!({"ports": [80, 443]}),
            json!({"ports": []}),
            json!({"ports": [22]}),
        ];
        let outcome = ChartAggregator::default().aggregate(&items);
        assert_eq!(
            outcome.buckets(),
            &[
                ChartBucket::new("80, 443", 2),
                ChartBucket::new("Unknown", 1),
                ChartBucket::new("22", 1)
            ]
        );
    }

    #[test]
    fn test_first_seen_order_not_sorted() {
        let items = vec![json!({"org": "b"}), json!({"org": "a"}), json!({"org": "a"})];
        let outcome = ChartAggregator::default().aggregate(&items);
        assert_eq!(
            outcome.buckets(),
            &[ChartBucket::new("b", 1), ChartBucket::new("a", 2)]
        );
    }

    #[test]
    fn test_scalar_records_are_insufficient() {
        let items = vec![json!("a"), json!("b")];
        assert_eq!(
            ChartAggregator::default().aggregate(&items),
            ChartOutcome::InsufficientData { field: None }
        );
    }
}
