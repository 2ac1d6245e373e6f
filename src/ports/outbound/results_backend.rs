use crate::shared::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A saved result document on the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultFile {
    pub name: String,
    pub path: String,
}

impl ResultFile {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Builds an entry from a bare path, naming it after the last segment
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(path.as_str())
            .to_string();
        Self { name, path }
    }
}

/// `/results` entries are either `{name, path}` objects or bare paths
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResultListing {
    Described { name: Option<String>, path: String },
    Bare(String),
}

impl From<ResultListing> for ResultFile {
    fn from(listing: ResultListing) -> Self {
        match listing {
            ResultListing::Described {
                name: Some(name),
                path,
            } => ResultFile::new(name, path),
            ResultListing::Described { name: None, path } | ResultListing::Bare(path) => {
                ResultFile::from_path(path)
            }
        }
    }
}

/// Response of `/upload-json`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadReceipt {
    pub path: String,
    #[serde(default)]
    pub cves: Vec<String>,
}

/// Process details the backend attaches to a script run
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ScriptProcessResult {
    #[serde(default)]
    pub returncode: Option<i64>,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of `/run/{script}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RunResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub out_path: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub result: Option<ScriptProcessResult>,
    #[serde(default)]
    pub filename: Option<String>,
    /// Remaining top-level fields, inspected when no data was returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One parameter of a script's schema
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScriptParam {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ScriptSchema {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub params: Vec<ScriptParam>,
}

/// Available scripts in backend order; the first one is the default choice
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScriptCatalog {
    pub scripts: Vec<(String, ScriptSchema)>,
}

impl ScriptCatalog {
    /// Parses the `/scripts/schema` mapping, keeping key order
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            anyhow::bail!("Script schema must be a JSON object keyed by script name");
        };
        let scripts = map
            .into_iter()
            .map(|(name, schema)| Ok((name, serde_json::from_value(schema)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { scripts })
    }

    pub fn get(&self, name: &str) -> Option<&ScriptSchema> {
        self.scripts.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn default_script(&self) -> Option<&str> {
        self.scripts.first().map(|(n, _)| n.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scripts.iter().map(|(n, _)| n.as_str())
    }
}

/// ResultsBackend port for the script-execution backend
///
/// Implementations talk to the external HTTP service; the application
/// core only sees parsed values.
#[async_trait]
pub trait ResultsBackend: Send + Sync {
    /// Lists saved result files (`GET /results`)
    async fn list_results(&self) -> Result<Vec<ResultFile>>;

    /// Fetches one saved result document (`GET /results/file?path=`)
    async fn fetch_result(&self, path: &str) -> Result<Value>;

    /// Uploads a JSON document as multipart field `file` (`POST /upload-json`)
    async fn upload_json(&self, file_name: &str, content: Vec<u8>) -> Result<UploadReceipt>;

    /// Server-side CVE extraction (`GET /extract-cves?path=`)
    async fn extract_cves(&self, path: &str) -> Result<Value>;

    /// Runs a named script with `{params: {...}}` (`POST /run/{script}`)
    async fn run_script(&self, script: &str, params: &Map<String, Value>) -> Result<RunResponse>;

    /// Lists available scripts and their parameters (`GET /scripts/schema`)
    async fn script_schema(&self) -> Result<ScriptCatalog>;
}
