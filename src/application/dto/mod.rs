/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod analysis_options;
mod output_format;
mod report_view;
mod result_source;
mod run_request;
mod run_status;
mod session;

pub use analysis_options::AnalysisOptions;
pub use output_format::OutputFormat;
pub use report_view::ReportView;
pub use result_source::ResultSource;
pub use run_request::RunRequest;
pub use run_status::RunStatus;
pub use session::Session;
