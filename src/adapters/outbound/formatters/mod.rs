/// Formatter adapters for the supported report formats
mod json_formatter;
mod listing_formatter;
mod markdown_formatter;
mod terminal_formatter;

pub use json_formatter::JsonFormatter;
pub use listing_formatter::ListingFormatter;
pub use markdown_formatter::MarkdownFormatter;
pub use terminal_formatter::TerminalFormatter;
