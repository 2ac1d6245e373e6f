use super::settle_loading;
use crate::application::dto::Session;
use crate::ports::outbound::{Alert, AlertsBackend, ProgressReporter};
use crate::shared::error::DashboardError;
use crate::shared::Result;
use serde_json::Value;

/// ManageAlertsUseCase - lists and deletes network alerts through the backend
pub struct ManageAlertsUseCase<L, P> {
    alerts: L,
    progress: P,
}

impl<L, P> ManageAlertsUseCase<L, P>
where
    L: AlertsBackend,
    P: ProgressReporter,
{
    pub fn new(alerts: L, progress: P) -> Self {
        Self { alerts, progress }
    }

    pub async fn list(&self, session: &Session) -> Result<Vec<Alert>> {
        let api_key = session.require_api_key()?;
        self.progress.report_loading("Loading alerts...");
        let alerts = self.alerts.list_alerts(api_key).await;
        settle_loading(&self.progress, &alerts);
        alerts
    }

    pub async fn delete(&self, session: &Session, alert_id: &str) -> Result<Value> {
        let api_key = session.require_api_key()?;
        let alert_id = alert_id.trim();
        if alert_id.is_empty() {
            return Err(DashboardError::Validation {
                message: "alert id must not be empty".to_string(),
            }
            .into());
        }

        self.progress
            .report_loading(&format!("Deleting alert {}...", alert_id));
        let status = self.alerts.delete_alert(api_key, alert_id).await;
        settle_loading(&self.progress, &status);
        status
    }
}
