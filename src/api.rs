//! Async API facade over the nomination store.
//!
//! Mirrors the calls a dashboard front end makes. Each call can be delayed
//! by a configurable latency to simulate a remote service.

use crate::analysis::Insights;
use crate::config::IntegrationsConfig;
use crate::error::Result;
use crate::models::{DashboardMetrics, NominationRecord, NominationStatus, User};
use crate::query::{NominationQuery, Page};
use crate::report::{self, ExportArtifact, ExportFormat};
use crate::store::NominationStore;
use crate::submission::{self, NominationForm};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct MockApi {
    store: Arc<NominationStore>,
    users: Arc<Vec<User>>,
    current_user: User,
    latency: Duration,
}

impl MockApi {
    pub fn new(store: Arc<NominationStore>, users: Vec<User>, current_user: User) -> Self {
        Self {
            store,
            users: Arc::new(users),
            current_user,
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn store(&self) -> &Arc<NominationStore> {
        &self.store
    }

    pub fn current_user(&self) -> &User {
        &self.current_user
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    pub async fn get_dashboard_metrics(&self, now: DateTime<Utc>) -> DashboardMetrics {
        self.delay().await;
        self.store.metrics(now)
    }

    pub async fn get_insights(&self) -> Insights {
        self.delay().await;
        self.store.insights()
    }

    pub async fn get_nominations(
        &self,
        request: &NominationQuery,
        now: DateTime<Utc>,
    ) -> Result<Page<NominationRecord>> {
        self.delay().await;
        debug!("Querying nominations: {:?}", request);
        self.store.query(request, now)
    }

    pub async fn get_nomination_by_id(&self, id: &str) -> Result<NominationRecord> {
        self.delay().await;
        self.store.get(id)
    }

    pub async fn update_nomination_status(
        &self,
        id: &str,
        status: NominationStatus,
    ) -> Result<NominationRecord> {
        self.delay().await;
        let record = self.store.update_status(id, status)?;
        info!("Nomination {} is now {}", id, status);
        Ok(record)
    }

    pub async fn get_users(&self) -> Vec<User> {
        self.delay().await;
        self.users.as_ref().clone()
    }

    pub async fn export_nominations(
        &self,
        format: ExportFormat,
        now: DateTime<Utc>,
    ) -> Result<ExportArtifact> {
        self.delay().await;
        let records = self.store.snapshot();
        report::export_nominations(&records, format, now)
    }

    /// Submit a nomination on behalf of the current user.
    pub async fn submit_nomination(
        &self,
        form: &NominationForm,
        now: DateTime<Utc>,
    ) -> Result<NominationRecord> {
        self.delay().await;
        submission::submit(&self.store, &self.users, &self.current_user, form, now)
    }

    /// Validate integration settings and return the redacted copy that was accepted.
    pub async fn update_integration_settings(
        &self,
        settings: &IntegrationsConfig,
    ) -> Result<IntegrationsConfig> {
        self.delay().await;
        settings.validate()?;
        let shown = settings.redacted();
        info!("Integration settings updated: {:?}", shown);
        Ok(shown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AwardsError;
    use crate::models::{AwardType, CoreValue, UserRole};
    use crate::test_support::{at, record};

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", id),
            role: UserRole::Admin,
            department: "HR".to_string(),
        }
    }

    fn api() -> MockApi {
        let store = Arc::new(NominationStore::new(vec![
            record("n1", "Ann Lee", "HR", at(2024, 5, 1)),
            record("n2", "Ben Ode", "Sales", at(2024, 5, 2)),
        ]));
        let users = vec![user("u1", "Ann Lee"), user("admin", "Ada Admin")];
        MockApi::new(store, users, user("admin", "Ada Admin"))
    }

    #[tokio::test]
    async fn test_status_update_is_visible_to_readers() {
        let api = api();
        let updated = api
            .update_nomination_status("n1", NominationStatus::Approved)
            .await
            .unwrap();
        assert_eq!(updated.status, NominationStatus::Approved);
        let fetched = api.get_nomination_by_id("n1").await.unwrap();
        assert_eq!(fetched.status, NominationStatus::Approved);
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let err = api().get_nomination_by_id("zzz").await.unwrap_err();
        assert!(matches!(err, AwardsError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_concurrent_calls() {
        let api = api();
        let now = at(2024, 5, 20);
        let request = NominationQuery::default();
        let (metrics, page, updated) = futures::join!(
            api.get_dashboard_metrics(now),
            api.get_nominations(&request, now),
            api.update_nomination_status("n2", NominationStatus::Rejected),
        );
        assert_eq!(metrics.total_nominations.month, 2);
        assert_eq!(page.unwrap().total, 2);
        assert_eq!(updated.unwrap().status, NominationStatus::Rejected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let api = api().with_latency(Duration::from_millis(500));
        let started = tokio::time::Instant::now();
        let users = api.get_users().await;
        assert_eq!(users.len(), 2);
        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_submit_uses_current_user_as_nominator() {
        let api = api();
        let form = NominationForm {
            resource_name: "Ann Lee".to_string(),
            award_type: Some(AwardType::Monthly),
            verbiage: "Rebuilt the onboarding flow and cut time-to-first-commit in half.".to_string(),
            supporting_acknowledgement: "Three new hires mentioned it.".to_string(),
            core_values: vec![CoreValue::CustomerDelight],
            overall_rating: 4,
            ..NominationForm::default()
        };
        let record = api.submit_nomination(&form, at(2024, 5, 21)).await.unwrap();
        assert_eq!(record.nominator_id, "admin");
        assert_eq!(api.store().len(), 3);
    }

    #[test]
    fn test_settings_update_redacts_secrets() {
        let settings = IntegrationsConfig {
            slack_token: "xoxb-abcdefgh".to_string(),
            prometheus_endpoint: "http://prom:9090".to_string(),
            ..IntegrationsConfig::default()
        };
        let shown = tokio_test::block_on(api().update_integration_settings(&settings)).unwrap();
        assert_eq!(shown.slack_token, "****efgh");

        let bad = IntegrationsConfig {
            prometheus_endpoint: "prom:9090".to_string(),
            ..IntegrationsConfig::default()
        };
        assert!(tokio_test::block_on(api().update_integration_settings(&bad)).is_err());
    }
}
