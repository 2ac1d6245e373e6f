use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter, TerminalFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::DashboardFormatter;

/// Factory for creating dashboard formatters
///
/// Lives in the application layer because it picks an infrastructure
/// adapter based on what the caller asked for.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter for the requested output format
    ///
    /// `use_color` only affects the terminal table; Markdown and JSON are
    /// always plain text.
    ///
    /// # Examples
    /// ```
    /// use recon_dashboard::application::dto::OutputFormat;
    /// use recon_dashboard::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Markdown, false);
    /// ```
    pub fn create(format: OutputFormat, use_color: bool) -> Box<dyn DashboardFormatter> {
        match format {
            OutputFormat::Table => Box::new(TerminalFormatter::new(use_color)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// Progress line shown while a report is rendered
    ///
    /// # Examples
    /// ```
    /// use recon_dashboard::application::dto::OutputFormat;
    /// use recon_dashboard::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Json);
    /// assert_eq!(message, "📝 Rendering JSON report...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Table => "📝 Rendering terminal report...",
            OutputFormat::Markdown => "📝 Rendering Markdown report...",
            OutputFormat::Json => "📝 Rendering JSON report...",
        }
    }
}
