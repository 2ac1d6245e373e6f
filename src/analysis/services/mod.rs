mod chart_aggregator;
mod normalizer;
mod table_flattener;
mod vulnerability_extractor;

pub use chart_aggregator::ChartAggregator;
pub use normalizer::Normalizer;
pub use table_flattener::{TableFlattener, DEFAULT_MAX_DEPTH};
pub use vulnerability_extractor::VulnerabilityExtractor;
