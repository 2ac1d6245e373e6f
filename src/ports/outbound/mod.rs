/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (HTTP services, file system, console).
pub mod account_info;
pub mod alerts_backend;
pub mod document_reader;
pub mod formatter;
pub mod key_store;
pub mod output_presenter;
pub mod progress_reporter;
pub mod results_backend;

pub use account_info::{query_credits, AccountInfoProvider};
pub use alerts_backend::{Alert, AlertsBackend};
pub use document_reader::DocumentReader;
pub use formatter::DashboardFormatter;
pub use key_store::KeyStore;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use results_backend::{
    ResultFile, ResultListing, ResultsBackend, RunResponse, ScriptCatalog, ScriptParam,
    ScriptProcessResult, ScriptSchema, UploadReceipt,
};
