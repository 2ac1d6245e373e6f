use crate::application::read_models::DashboardReadModel;
use crate::shared::Result;

/// DashboardFormatter port for rendering a dashboard report
///
/// Implementations render the same read model as a colored terminal
/// table, Markdown, or JSON.
pub trait DashboardFormatter {
    /// Formats the summary, chart, table and vulnerability sections
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, model: &DashboardReadModel) -> Result<String>;
}
