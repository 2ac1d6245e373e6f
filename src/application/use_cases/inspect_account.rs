use super::settle_loading;
use crate::application::dto::Session;
use crate::ports::outbound::{query_credits, AccountInfoProvider, ProgressReporter};
use crate::shared::Result;
use serde::Serialize;
use serde_json::Value;

/// Remaining credits and the plan they belong to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditsReport {
    pub credits: i64,
    pub plan: Option<String>,
    /// The full `api-info` document
    pub details: Value,
}

/// InspectAccountUseCase - public IP and API credit lookups
pub struct InspectAccountUseCase<A, P> {
    provider: A,
    progress: P,
}

impl<A, P> InspectAccountUseCase<A, P>
where
    A: AccountInfoProvider,
    P: ProgressReporter,
{
    pub fn new(provider: A, progress: P) -> Self {
        Self { provider, progress }
    }

    pub async fn public_ip(&self) -> Result<String> {
        self.progress.report_loading("Looking up public IP...");
        let ip = self.provider.public_ip().await;
        settle_loading(&self.progress, &ip);
        ip
    }

    pub async fn credits(&self, session: &Session) -> Result<CreditsReport> {
        let api_key = session.require_api_key()?;

        self.progress.report_loading("Checking API credits...");
        let info = self.provider.api_info(api_key).await;
        settle_loading(&self.progress, &info);
        let details = info?;

        Ok(CreditsReport {
            credits: query_credits(&details),
            plan: details
                .get("plan")
                .and_then(Value::as_str)
                .map(str::to_string),
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_doubles::{RecordingReporter, StubAccount};
    use serde_json::json;

    #[tokio::test]
    async fn test_credits_report() {
        let account = StubAccount {
            api_info: json!({"plan": "dev", "query_credits": 42, "scan_credits": 10}),
            ..StubAccount::default()
        };
        let uc = InspectAccountUseCase::new(account, RecordingReporter::default());
        let report = uc.credits(&Session::new(Some("KEY".into()))).await.unwrap();
        assert_eq!(report.credits, 42);
        assert_eq!(report.plan.as_deref(), Some("dev"));
    }

    #[tokio::test]
    async fn test_credits_need_a_key() {
        let uc = InspectAccountUseCase::new(StubAccount::default(), RecordingReporter::default());
        let err = uc.credits(&Session::default()).await.unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[tokio::test]
    async fn test_public_ip() {
        let uc = InspectAccountUseCase::new(StubAccount::default(), RecordingReporter::default());
        assert_eq!(uc.public_ip().await.unwrap(), "203.0.113.7");
    }
}
