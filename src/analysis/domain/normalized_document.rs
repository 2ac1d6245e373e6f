use serde::Serialize;
use serde_json::Value;

/// A result document split into the raw payload and its item records
///
/// `raw` is kept unchanged for the summary panel; `items` is the list
/// every table, chart and export operates on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedDocument {
    pub raw: Value,
    pub items: Vec<Value>,
}

impl NormalizedDocument {
    pub fn new(raw: Value, items: Vec<Value>) -> Self {
        Self { raw, items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
