use serde::Serialize;

/// One bar of the distribution chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartBucket {
    pub name: String,
    pub value: usize,
}

impl ChartBucket {
    pub fn new(name: impl Into<String>, value: usize) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Result of aggregating item records on one inferred field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartOutcome {
    /// No item records at all
    NoData,
    /// Fewer than two distinct labels; a single bar is not worth drawing
    InsufficientData { field: Option<String> },
    Histogram {
        field: String,
        buckets: Vec<ChartBucket>,
    },
}

impl ChartOutcome {
    pub fn buckets(&self) -> &[ChartBucket] {
        match self {
            ChartOutcome::Histogram { buckets, .. } => buckets,
            _ => &[],
        }
    }
}
