//! In-memory port implementations shared by the use case tests

use crate::ports::outbound::{
    AccountInfoProvider, Alert, AlertsBackend, DocumentReader, ProgressReporter, ResultFile,
    ResultsBackend, RunResponse, ScriptCatalog, UploadReceipt,
};
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Default)]
pub struct StubBackend {
    pub results: Vec<(ResultFile, Value)>,
    pub catalog: ScriptCatalog,
    pub run_response: RunResponse,
    pub runs: Mutex<Vec<(String, Map<String, Value>)>>,
    pub uploads: Mutex<Vec<(String, usize)>>,
}

impl StubBackend {
    pub fn with_result(mut self, path: &str, document: Value) -> Self {
        self.results.push((ResultFile::from_path(path), document));
        self
    }

    pub fn with_catalog(mut self, catalog: Value) -> Self {
        self.catalog = ScriptCatalog::from_value(catalog).unwrap();
        self
    }

    pub fn with_run_response(mut self, response: Value) -> Self {
        self.run_response = serde_json::from_value(response).unwrap();
        self
    }

    pub fn recorded_runs(&self) -> Vec<(String, Map<String, Value>)> {
        self.runs.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultsBackend for StubBackend {
    async fn list_results(&self) -> Result<Vec<ResultFile>> {
        Ok(self.results.iter().map(|(f, _)| f.clone()).collect())
    }

    async fn fetch_result(&self, path: &str) -> Result<Value> {
        self.results
            .iter()
            .find(|(f, _)| f.path == path)
            .map(|(_, doc)| doc.clone())
            .ok_or_else(|| anyhow::anyhow!("Backend returned HTTP 404 for {}", path))
    }

    async fn upload_json(&self, file_name: &str, content: Vec<u8>) -> Result<UploadReceipt> {
        self.uploads
            .lock()
            .unwrap()
            .push((file_name.to_string(), content.len()));
        Ok(UploadReceipt {
            path: format!("/uploads/{}", file_name),
            cves: vec!["CVE-2020-0001".to_string()],
        })
    }

    async fn extract_cves(&self, path: &str) -> Result<Value> {
        Ok(json!({"path": path, "cves": [], "count": 0}))
    }

    async fn run_script(&self, script: &str, params: &Map<String, Value>) -> Result<RunResponse> {
        self.runs
            .lock()
            .unwrap()
            .push((script.to_string(), params.clone()));
        Ok(self.run_response.clone())
    }

    async fn script_schema(&self) -> Result<ScriptCatalog> {
        Ok(self.catalog.clone())
    }
}

#[derive(Default)]
pub struct MemoryReader {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryReader {
    pub fn with_file(mut self, path: &str, document: Value) -> Self {
        self.files
            .insert(PathBuf::from(path), document.to_string().into_bytes());
        self
    }

    pub fn with_bytes(mut self, path: &str, bytes: &[u8]) -> Self {
        self.files.insert(PathBuf::from(path), bytes.to_vec());
        self
    }
}

impl DocumentReader for MemoryReader {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Failed to read file: {}", path.display()))
    }
}

/// Records every call as `kind:message`
#[derive(Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    fn push(&self, kind: &str, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("{}:{}", kind, message));
    }
}

impl ProgressReporter for RecordingReporter {
    fn report(&self, message: &str) {
        self.push("report", message);
    }

    fn report_loading(&self, message: &str) {
        self.push("loading", message);
    }

    fn finish_loading(&self) {
        self.push("finish", "");
    }

    fn report_error(&self, message: &str) {
        self.push("error", message);
    }

    fn report_completion(&self, message: &str) {
        self.push("done", message);
    }
}

#[derive(Default)]
pub struct StubAccount {
    pub api_info: Value,
    pub alerts: Vec<Alert>,
    pub deleted: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl AccountInfoProvider for StubAccount {
    async fn public_ip(&self) -> Result<String> {
        Ok("203.0.113.7".to_string())
    }

    async fn api_info(&self, _api_key: &str) -> Result<Value> {
        Ok(self.api_info.clone())
    }
}

#[async_trait]
impl AlertsBackend for StubAccount {
    async fn list_alerts(&self, _api_key: &str) -> Result<Vec<Alert>> {
        Ok(self.alerts.clone())
    }

    async fn delete_alert(&self, api_key: &str, alert_id: &str) -> Result<Value> {
        self.deleted
            .lock()
            .unwrap()
            .push((api_key.to_string(), alert_id.to_string()));
        Ok(json!({"success": true}))
    }
}
