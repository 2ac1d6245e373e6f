/// Use cases module containing application business logic orchestration
mod document_analyzer;
mod export_report;
mod inspect_account;
mod manage_alerts;
mod run_script;
mod upload_result;
mod view_result;

#[cfg(test)]
mod test_doubles;

pub use document_analyzer::DocumentAnalyzer;
pub use export_report::{ExportReportUseCase, ReportExport};
pub use inspect_account::{CreditsReport, InspectAccountUseCase};
pub use manage_alerts::ManageAlertsUseCase;
pub use run_script::{assemble_params, classify, is_tabular, RunReport, RunScriptUseCase};
pub use upload_result::UploadResultUseCase;
pub use view_result::{LoadedDocument, ViewResultUseCase};

use crate::ports::outbound::ProgressReporter;
use crate::shared::Result;

/// Clears the loading indicator once a request has settled
///
/// Failures are only logged here; the caller propagates them to the entry
/// point, which prints the full error chain.
fn settle_loading<P: ProgressReporter, T>(progress: &P, outcome: &Result<T>) {
    progress.finish_loading();
    if let Err(e) = outcome {
        let message = e.to_string();
        log::debug!(
            "request failed: {}",
            message.lines().next().unwrap_or_default()
        );
    }
}
