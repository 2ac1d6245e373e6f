use async_trait::async_trait;
use recon_dashboard::ports::outbound::{
    ResultFile, ResultsBackend, RunResponse, ScriptCatalog, UploadReceipt,
};
use recon_dashboard::prelude::Result;
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};

/// Mock ResultsBackend serving canned documents and recording calls
///
/// Clones share the recorded calls, so a test can keep one handle while
/// the use case owns another. Uploaded documents can be fetched back by
/// their receipt path.
#[derive(Clone, Default)]
pub struct MockResultsBackend {
    results: Vec<(ResultFile, Value)>,
    catalog: Value,
    run_response: Value,
    should_fail: bool,
    pub runs: Arc<Mutex<Vec<(String, Map<String, Value>)>>>,
    pub uploads: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl MockResultsBackend {
    pub fn new() -> Self {
        Self {
            catalog: json!({}),
            run_response: json!({"status": "finished"}),
            ..Default::default()
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    pub fn with_result(mut self, name: &str, path: &str, document: Value) -> Self {
        self.results.push((ResultFile::new(name, path), document));
        self
    }

    pub fn with_catalog(mut self, catalog: Value) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_run_response(mut self, response: Value) -> Self {
        self.run_response = response;
        self
    }

    fn upload_path(file_name: &str) -> String {
        format!("/srv/results/{}", file_name)
    }

    fn check(&self, endpoint: &str) -> Result<()> {
        if self.should_fail {
            anyhow::bail!("Request to {} failed\nDetails: connection refused", endpoint);
        }
        Ok(())
    }
}

#[async_trait]
impl ResultsBackend for MockResultsBackend {
    async fn list_results(&self) -> Result<Vec<ResultFile>> {
        self.check("/results")?;
        Ok(self.results.iter().map(|(f, _)| f.clone()).collect())
    }

    async fn fetch_result(&self, path: &str) -> Result<Value> {
        self.check("/results/file")?;
        if let Some((_, doc)) = self.results.iter().find(|(f, _)| f.path == path) {
            return Ok(doc.clone());
        }
        let uploads = self.uploads.lock().unwrap();
        match uploads
            .iter()
            .find(|(name, _)| Self::upload_path(name) == path)
        {
            Some((_, content)) => Ok(serde_json::from_slice(content)?),
            None => anyhow::bail!("Backend returned HTTP 404 for /results/file"),
        }
    }

    async fn upload_json(&self, file_name: &str, content: Vec<u8>) -> Result<UploadReceipt> {
        self.check("/upload-json")?;
        self.uploads
            .lock()
            .unwrap()
            .push((file_name.to_string(), content));
        Ok(UploadReceipt {
            path: Self::upload_path(file_name),
            cves: Vec::new(),
        })
    }

    async fn extract_cves(&self, path: &str) -> Result<Value> {
        self.check("/extract-cves")?;
        Ok(json!({"path": path, "cves": ["CVE-2021-44228"]}))
    }

    async fn run_script(&self, script: &str, params: &Map<String, Value>) -> Result<RunResponse> {
        self.check("/run")?;
        self.runs
            .lock()
            .unwrap()
            .push((script.to_string(), params.clone()));
        Ok(serde_json::from_value(self.run_response.clone())?)
    }

    async fn script_schema(&self) -> Result<ScriptCatalog> {
        self.check("/scripts/schema")?;
        ScriptCatalog::from_value(self.catalog.clone())
    }
}
