//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of analysis results for formatters.

pub mod dashboard_read_model;
pub mod dashboard_read_model_builder;
pub mod summary_view;
pub mod vulnerability_view;

pub use dashboard_read_model::DashboardReadModel;
pub use dashboard_read_model_builder::DashboardReadModelBuilder;
pub use summary_view::{SummaryEntry, SummaryView};
pub use vulnerability_view::VulnerabilityView;
