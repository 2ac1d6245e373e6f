/// Analysis domain layer
///
/// Pure data shaping over result documents: normalization into item
/// records, tabular flattening, chart aggregation and vulnerability
/// extraction. Nothing here performs I/O.
pub mod domain;
pub mod policies;
pub mod services;
