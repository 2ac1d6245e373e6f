use async_trait::async_trait;
use recon_dashboard::ports::outbound::{AccountInfoProvider, Alert, AlertsBackend};
use recon_dashboard::prelude::Result;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Mock for the host-intelligence account: public IP, api-info and alerts
#[derive(Clone)]
pub struct MockAccountServices {
    api_info: Value,
    alerts: Vec<Alert>,
    pub seen_keys: Arc<Mutex<Vec<String>>>,
}

impl MockAccountServices {
    pub fn new(api_info: Value) -> Self {
        Self {
            api_info,
            alerts: Vec::new(),
            seen_keys: Arc::default(),
        }
    }

    pub fn with_alert(mut self, id: &str, name: &str) -> Self {
        self.alerts.push(Alert {
            id: id.to_string(),
            name: Some(name.to_string()),
            filters: Some(json!({"ip": ["198.51.100.0/24"]})),
        });
        self
    }

    fn record(&self, key: &str) {
        self.seen_keys.lock().unwrap().push(key.to_string());
    }
}

#[async_trait]
impl AccountInfoProvider for MockAccountServices {
    async fn public_ip(&self) -> Result<String> {
        Ok("203.0.113.7".to_string())
    }

    async fn api_info(&self, api_key: &str) -> Result<Value> {
        self.record(api_key);
        Ok(self.api_info.clone())
    }
}

#[async_trait]
impl AlertsBackend for MockAccountServices {
    async fn list_alerts(&self, api_key: &str) -> Result<Vec<Alert>> {
        self.record(api_key);
        Ok(self.alerts.clone())
    }

    async fn delete_alert(&self, api_key: &str, alert_id: &str) -> Result<Value> {
        self.record(api_key);
        Ok(json!({"success": true, "id": alert_id}))
    }
}
