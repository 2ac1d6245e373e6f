use crate::ports::outbound::{
    Alert, AlertsBackend, ResultFile, ResultListing, ResultsBackend, RunResponse, ScriptCatalog,
    UploadReceipt,
};
use crate::shared::error::DashboardError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::time::Duration;

/// Base URL used when neither flag, environment nor config name one
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Environment variable overriding the configured backend URL
pub const API_BASE_ENV: &str = "RECON_DASHBOARD_API_BASE";

/// HttpBackendClient adapter for the script-execution backend
///
/// Implements both [`ResultsBackend`] and [`AlertsBackend`] over the
/// backend's JSON HTTP API. Requests are never retried; a failed call is
/// reported to the user as-is.
pub struct HttpBackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackendClient {
    const TIMEOUT_SECONDS: u64 = 30;
    /// Script runs can take minutes on the backend side
    const RUN_TIMEOUT_SECONDS: u64 = 600;

    pub fn new(base_url: &str) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("recon-dashboard/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Sends a request and maps transport failures and non-2xx statuses
    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Response> {
        log::debug!("backend request: {}", endpoint);

        let response = request
            .send()
            .await
            .map_err(|e| DashboardError::BackendRequest {
                endpoint: endpoint.to_string(),
                details: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::BackendStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                details: error_detail(&body),
            }
            .into());
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, endpoint: &str, request: RequestBuilder) -> Result<T> {
        let response = self.send(endpoint, request).await?;
        let body = response.text().await.map_err(|e| DashboardError::BackendRequest {
            endpoint: endpoint.to_string(),
            details: e.to_string(),
        })?;

        serde_json::from_str(&body).map_err(|e| {
            DashboardError::InvalidJson {
                source_name: endpoint.to_string(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

/// Extracts FastAPI's `detail` field from an error body, falling back to the body
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("detail") {
            Some(Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ if body.trim().is_empty() => "(empty response body)".to_string(),
        _ => body.to_string(),
    }
}

#[async_trait]
impl ResultsBackend for HttpBackendClient {
    async fn list_results(&self) -> Result<Vec<ResultFile>> {
        let endpoint = "/results";
        let listings: Vec<ResultListing> = self
            .send_json(endpoint, self.client.get(self.url(endpoint)))
            .await?;
        Ok(listings.into_iter().map(ResultFile::from).collect())
    }

    async fn fetch_result(&self, path: &str) -> Result<Value> {
        let endpoint = format!("/results/file?path={}", urlencoding::encode(path));
        self.send_json(&endpoint, self.client.get(self.url(&endpoint)))
            .await
    }

    async fn upload_json(&self, file_name: &str, content: Vec<u8>) -> Result<UploadReceipt> {
        let endpoint = "/upload-json";
        let part = Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str("application/json")?;
        let form = Form::new().part("file", part);
        self.send_json(endpoint, self.client.post(self.url(endpoint)).multipart(form))
            .await
    }

    async fn extract_cves(&self, path: &str) -> Result<Value> {
        let endpoint = format!("/extract-cves?path={}", urlencoding::encode(path));
        self.send_json(&endpoint, self.client.get(self.url(&endpoint)))
            .await
    }

    async fn run_script(&self, script: &str, params: &Map<String, Value>) -> Result<RunResponse> {
        let endpoint = format!("/run/{}", urlencoding::encode(script));
        let request = self
            .client
            .post(self.url(&endpoint))
            .timeout(Duration::from_secs(Self::RUN_TIMEOUT_SECONDS))
            .json(&json!({ "params": params }));
        self.send_json(&endpoint, request).await
    }

    async fn script_schema(&self) -> Result<ScriptCatalog> {
        let endpoint = "/scripts/schema";
        let value: Value = self
            .send_json(endpoint, self.client.get(self.url(endpoint)))
            .await?;
        ScriptCatalog::from_value(value)
    }
}

#[async_trait]
impl AlertsBackend for HttpBackendClient {
    async fn list_alerts(&self, api_key: &str) -> Result<Vec<Alert>> {
        let endpoint = "/alerts/list";
        let body = json!({ "params": { "api_key": api_key } });
        let value: Value = self
            .send_json(endpoint, self.client.post(self.url(endpoint)).json(&body))
            .await?;

        // The upstream API answers with either a list or a single alert object
        let alerts = match value {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            single => vec![single],
        };
        alerts
            .into_iter()
            .map(|a| Ok(serde_json::from_value(a)?))
            .collect()
    }

    async fn delete_alert(&self, api_key: &str, alert_id: &str) -> Result<Value> {
        let endpoint = "/alerts/delete";
        let body = json!({ "params": { "api_key": api_key, "alert_id": alert_id } });
        self.send_json(endpoint, self.client.post(self.url(endpoint)).json(&body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = HttpBackendClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/results"), "http://localhost:8000/results");
    }

    #[test]
    fn test_error_detail_prefers_fastapi_detail() {
        assert_eq!(error_detail(r#"{"detail": "Script not found"}"#), "Script not found");
        assert_eq!(
            error_detail(r#"{"detail": [{"msg": "field required"}]}"#),
            r#"[{"msg":"field required"}]"#
        );
        assert_eq!(error_detail("Internal Server Error"), "Internal Server Error");
        assert_eq!(error_detail(""), "(empty response body)");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_request_error() {
        // Port 9 (discard) is closed on test machines
        let client = HttpBackendClient::new("http://127.0.0.1:9").unwrap();
        let err = client.list_results().await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Request to /results failed"));
    }
}
