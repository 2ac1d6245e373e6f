//! recon-dashboard - terminal dashboard for host-intelligence recon results
//!
//! Loads JSON result documents (from the script-execution backend or from
//! disk) and turns them into a summary, a frequency chart, a flattened table
//! and a vulnerability listing, following hexagonal architecture.
//!
//! # Architecture
//!
//! - **Analysis Layer** (`analysis`): the pure pipeline and its rule policies
//! - **Application Layer** (`application`): use cases, DTOs and read models
//! - **Ports** (`ports`): interfaces for the backend, files and console
//! - **Adapters** (`adapters`): reqwest clients, filesystem, formatters
//! - **Shared** (`shared`): error types, result alias and file safety checks
//!
//! # Example
//!
//! ```no_run
//! use recon_dashboard::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<()> {
//! let use_case = ViewResultUseCase::new(
//!     HttpBackendClient::new(DEFAULT_API_BASE)?,
//!     FileSystemReader::new(),
//!     StderrProgressReporter::new(),
//!     DocumentAnalyzer::default(),
//! );
//!
//! let source = ResultSource::LocalFile(PathBuf::from("hosts.json"));
//! let model = use_case.execute(&source, ReportView::Dashboard).await?;
//!
//! let output = MarkdownFormatter::new().format(&model)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod analysis;
pub mod application;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, KeyFileStore, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        JsonFormatter, MarkdownFormatter, TerminalFormatter,
    };
    pub use crate::adapters::outbound::network::{
        HttpBackendClient, PublicServicesClient, DEFAULT_API_BASE,
    };
    pub use crate::analysis::domain::{ChartOutcome, FlatTable, Severity, VulnerabilityEntry};
    pub use crate::analysis::services::{
        ChartAggregator, Normalizer, TableFlattener, VulnerabilityExtractor,
    };
    pub use crate::application::dto::{
        AnalysisOptions, OutputFormat, ReportView, ResultSource, RunRequest, RunStatus, Session,
    };
    pub use crate::application::read_models::DashboardReadModel;
    pub use crate::application::use_cases::{
        DocumentAnalyzer, ExportReportUseCase, InspectAccountUseCase, ManageAlertsUseCase,
        RunScriptUseCase, UploadResultUseCase, ViewResultUseCase,
    };
    pub use crate::ports::outbound::{
        AccountInfoProvider, AlertsBackend, DashboardFormatter, DocumentReader, KeyStore,
        OutputPresenter, ProgressReporter, ResultsBackend,
    };
    pub use crate::shared::Result;
}
