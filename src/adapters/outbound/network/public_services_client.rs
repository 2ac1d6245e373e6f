use crate::ports::outbound::AccountInfoProvider;
use crate::shared::error::DashboardError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct PublicIpResponse {
    ip: String,
}

/// PublicServicesClient adapter for the public IP echo service and the
/// host-intelligence provider's account endpoint
///
/// These are called directly from the CLI, not through the backend.
pub struct PublicServicesClient {
    client: reqwest::Client,
    ip_url: String,
    api_info_url: String,
}

impl PublicServicesClient {
    const IP_ENDPOINT: &'static str = "https://api.ipify.org?format=json";
    const API_INFO_ENDPOINT: &'static str = "https://api.shodan.io/api-info";
    const TIMEOUT_SECONDS: u64 = 10;

    pub fn new() -> Result<Self> {
        Self::with_endpoints(Self::IP_ENDPOINT, Self::API_INFO_ENDPOINT)
    }

    pub fn with_endpoints(ip_url: &str, api_info_url: &str) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("recon-dashboard/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            ip_url: ip_url.to_string(),
            api_info_url: api_info_url.to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, label: &str, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DashboardError::BackendRequest {
                endpoint: label.to_string(),
                details: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(DashboardError::BackendStatus {
                endpoint: label.to_string(),
                status: response.status().as_u16(),
                details: response.text().await.unwrap_or_default(),
            }
            .into());
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl AccountInfoProvider for PublicServicesClient {
    async fn public_ip(&self) -> Result<String> {
        let response: PublicIpResponse = self.get_json("public IP service", &self.ip_url).await?;
        Ok(response.ip)
    }

    async fn api_info(&self, api_key: &str) -> Result<Value> {
        // The key is a secret, so keep it out of the endpoint label
        let url = format!("{}?key={}", self.api_info_url, urlencoding::encode(api_key));
        self.get_json("api-info", &url).await
    }
}
