use super::document_analyzer::DocumentAnalyzer;
use super::settle_loading;
use crate::analysis::domain::json_display;
use crate::application::dto::{ReportView, RunRequest, RunStatus, Session};
use crate::application::read_models::DashboardReadModel;
use crate::ports::outbound::{
    ProgressReporter, ResultsBackend, RunResponse, ScriptCatalog, ScriptSchema,
};
use crate::shared::error::DashboardError;
use crate::shared::Result;
use serde_json::{Map, Value};

/// Name given to a run's data when the backend names neither file nor path
const LAST_RUN_NAME: &str = "last_run";

/// Outcome of one script run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub script: String,
    pub status: RunStatus,
    pub response: RunResponse,
    /// Present when the run produced tabular data
    pub model: Option<DashboardReadModel>,
}

/// RunScriptUseCase - executes a backend script and classifies the result
///
/// # Type Parameters
/// * `B` - ResultsBackend implementation
/// * `P` - ProgressReporter implementation
pub struct RunScriptUseCase<B, P> {
    backend: B,
    progress: P,
    analyzer: DocumentAnalyzer,
}

impl<B, P> RunScriptUseCase<B, P>
where
    B: ResultsBackend,
    P: ProgressReporter,
{
    pub fn new(backend: B, progress: P, analyzer: DocumentAnalyzer) -> Self {
        Self {
            backend,
            progress,
            analyzer,
        }
    }

    /// Loads the ordered script catalog
    pub async fn catalog(&self) -> Result<ScriptCatalog> {
        self.progress.report_loading("Loading script catalog...");
        let catalog = self.backend.script_schema().await;
        settle_loading(&self.progress, &catalog);
        catalog
    }

    /// Runs a script and resolves the data it produced
    ///
    /// A run that the backend reports as failed is not an `Err`: it comes
    /// back as a report with [`RunStatus::Error`]. Only transport failures
    /// and invalid requests are errors.
    pub async fn execute(&self, request: &RunRequest, session: &Session) -> Result<RunReport> {
        let catalog = self.catalog().await?;
        let script = match &request.script {
            Some(name) => name.clone(),
            None => catalog
                .default_script()
                .map(str::to_string)
                .ok_or_else(|| DashboardError::Validation {
                    message: "the backend offers no scripts".to_string(),
                })?,
        };
        let schema = catalog
            .get(&script)
            .ok_or_else(|| DashboardError::UnknownScript {
                name: script.clone(),
            })?;

        let params = assemble_params(schema, request, session)?;

        self.progress
            .report_loading(&format!("Running {}...", script));
        let response = self.backend.run_script(&script, &params).await;
        settle_loading(&self.progress, &response);
        let response = response?;

        let status = classify(&response);
        log::debug!("script {} finished with status {:?}", script, status);

        let model = match status {
            RunStatus::Finished => self.resolve_model(&response).await?,
            _ => None,
        };

        Ok(RunReport {
            script,
            status,
            response,
            model,
        })
    }

    /// Finds the run's data and analyzes it when it forms a table
    async fn resolve_model(&self, response: &RunResponse) -> Result<Option<DashboardReadModel>> {
        let Some(data) = self.resolve_data(response).await else {
            log::warn!("run finished without usable data");
            return Ok(None);
        };

        if !is_tabular(&data) {
            log::warn!("run data is not tabular; nothing to display");
            return Ok(None);
        }

        let name = response
            .filename
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(response.out_path.as_deref().filter(|p| !p.is_empty()))
            .unwrap_or(LAST_RUN_NAME);
        let source = match &response.out_path {
            Some(path) if !path.is_empty() => format!("backend:{}", path),
            _ => "run".to_string(),
        };

        self.analyzer
            .analyze(name, &source, ReportView::Dashboard, data)
            .map(Some)
    }

    /// `data`, else the fetched `out_path`, else the response itself when
    /// any top-level field is a non-empty array
    async fn resolve_data(&self, response: &RunResponse) -> Option<Value> {
        if let Some(data) = response.data.as_ref().filter(|d| json_display::is_truthy(d)) {
            return Some(data.clone());
        }

        if let Some(path) = response.out_path.as_deref().filter(|p| !p.is_empty()) {
            self.progress.report_loading("Fetching run output...");
            let fetched = self.backend.fetch_result(path).await;
            self.progress.finish_loading();
            return match fetched {
                Ok(document) => Some(document),
                Err(e) => {
                    log::error!("failed to fetch run output {}: {}", path, e);
                    None
                }
            };
        }

        let has_rows = response
            .extra
            .values()
            .any(|v| v.as_array().is_some_and(|a| !a.is_empty()));
        if has_rows {
            return serde_json::to_value(response).ok();
        }

        None
    }
}

/// Builds the request parameters from the script schema
///
/// Supplied values are trimmed. A required parameter with an empty value
/// is rejected; an omitted optional one falls back to its placeholder,
/// then to null. A non-empty session key is sent as `api_key`.
pub fn assemble_params(
    schema: &ScriptSchema,
    request: &RunRequest,
    session: &Session,
) -> Result<Map<String, Value>> {
    let mut params = Map::new();

    for param in &schema.params {
        let supplied = request.param(&param.name).map(str::trim);
        if param.required && supplied.map_or(true, str::is_empty) {
            return Err(DashboardError::MissingParameter {
                name: param.name.clone(),
            }
            .into());
        }

        let value = match supplied {
            Some(value) => Value::String(value.to_string()),
            None => param.placeholder.clone().unwrap_or(Value::Null),
        };
        params.insert(param.name.clone(), value);
    }

    for (name, _) in &request.params {
        if !schema.params.iter().any(|p| &p.name == name) {
            log::warn!("ignoring parameter {} unknown to this script", name);
        }
    }

    if let Some(key) = session.api_key() {
        params.insert("api_key".to_string(), Value::String(key.to_string()));
    }

    Ok(params)
}

/// Classifies a run response; the first matching case wins
pub fn classify(response: &RunResponse) -> RunStatus {
    let result = response.result.as_ref();
    let returncode = result.and_then(|r| r.returncode);
    let non_empty = |s: Option<&String>| s.filter(|s| !s.is_empty()).cloned();

    let stderr = non_empty(result.and_then(|r| r.stderr.as_ref()));
    let result_error = non_empty(result.and_then(|r| r.error.as_ref()));
    let top_error = non_empty(response.error.as_ref());

    if response.status.as_deref() == Some("error") && returncode != Some(0) {
        let message = stderr
            .or(result_error)
            .or(top_error)
            .unwrap_or_else(|| "Unknown error".to_string());
        return RunStatus::Error(message);
    }

    if let Some(error) = result_error {
        if returncode.unwrap_or(0) == 0 {
            return RunStatus::Warning(format!(
                "Warning: {}. Info: {}",
                error,
                stderr.unwrap_or_default()
            ));
        }
    }

    if let Some(error) = top_error {
        return RunStatus::Error(error);
    }

    match response.status.as_deref() {
        Some("finished") => RunStatus::Finished,
        Some(status) if !status.is_empty() => RunStatus::Pending(status.to_string()),
        _ => RunStatus::Pending("Unknown".to_string()),
    }
}

/// An array whose first element is a container, at the root or in any
/// top-level field
pub fn is_tabular(data: &Value) -> bool {
    let starts_with_container = |v: &Value| {
        v.as_array()
            .and_then(|a| a.first())
            .is_some_and(|first| first.is_object() || first.is_array())
    };

    match data {
        Value::Array(_) => starts_with_container(data),
        Value::Object(map) => map.values().any(starts_with_container),
        _ => false,
    }
}
