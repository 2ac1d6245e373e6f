use crate::application::read_models::DashboardReadModel;
use crate::ports::outbound::DashboardFormatter;
use crate::shared::Result;

/// JsonFormatter adapter emitting the read model as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardFormatter for JsonFormatter {
    fn format(&self, model: &DashboardReadModel) -> Result<String> {
        Ok(serde_json::to_string_pretty(model)?)
    }
}
