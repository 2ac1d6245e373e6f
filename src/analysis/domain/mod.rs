pub mod chart;
pub mod flat_table;
pub mod json_display;
pub mod normalized_document;
pub mod severity;
pub mod vulnerability;

pub use chart::{ChartBucket, ChartOutcome};
pub use flat_table::{Cell, FlatTable, FlattenedRow, RenderedCell, VulnerabilityCell};
pub use normalized_document::NormalizedDocument;
pub use severity::Severity;
pub use vulnerability::VulnerabilityEntry;
