use crate::shared::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A saved network alert on the host-intelligence account
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Alert {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub filters: Option<Value>,
}

impl Alert {
    /// The filtered IP range, or "no filter"
    pub fn filter_summary(&self) -> String {
        match self.filters.as_ref().and_then(|f| f.get("ip")) {
            Some(Value::Array(ips)) if !ips.is_empty() => ips
                .iter()
                .map(|ip| ip.as_str().map(str::to_string).unwrap_or_else(|| ip.to_string()))
                .collect::<Vec<_>>()
                .join(", "),
            Some(Value::String(ip)) if !ip.is_empty() => ip.clone(),
            _ => "no filter".to_string(),
        }
    }
}

/// AlertsBackend port for the alert endpoints proxied by the backend
///
/// Both calls need the user's API key; the backend forwards it upstream.
#[async_trait]
pub trait AlertsBackend: Send + Sync {
    /// `POST /alerts/list` with `{params: {api_key}}`
    async fn list_alerts(&self, api_key: &str) -> Result<Vec<Alert>>;

    /// `POST /alerts/delete` with `{params: {api_key, alert_id}}`
    async fn delete_alert(&self, api_key: &str, alert_id: &str) -> Result<Value>;
}
