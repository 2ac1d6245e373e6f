pub mod exclusion_policy;
pub mod grouping_rules;
pub mod normalization_rules;

pub use exclusion_policy::{ExclusionPolicy, PathRule};
pub use grouping_rules::{GroupingRule, GroupingRules};
pub use normalization_rules::{ExtractionRule, NormalizationRules};
