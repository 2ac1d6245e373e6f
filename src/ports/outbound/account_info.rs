use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;

/// AccountInfoProvider port for the public services queried directly
///
/// These calls bypass the backend: the public IP echo service and the
/// host-intelligence provider's `api-info` endpoint.
#[async_trait]
pub trait AccountInfoProvider: Send + Sync {
    /// Returns the caller's public IP address
    async fn public_ip(&self) -> Result<String>;

    /// Returns the raw plan/quota document for an API key
    async fn api_info(&self, api_key: &str) -> Result<Value>;
}

/// Remaining query credits reported by an `api-info` document
///
/// Prefers `query_credits`, then `credits`, and reports 0 when neither exists.
pub fn query_credits(api_info: &Value) -> i64 {
    ["query_credits", "credits"]
        .iter()
        .find_map(|key| api_info.get(key).filter(|v| !v.is_null()))
        .and_then(Value::as_i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_credits_precedence() {
        assert_eq!(query_credits(&json!({"query_credits": 100, "credits": 5})), 100);
        assert_eq!(query_credits(&json!({"query_credits": null, "credits": 5})), 5);
        assert_eq!(query_credits(&json!({"plan": "dev"})), 0);
    }
}
