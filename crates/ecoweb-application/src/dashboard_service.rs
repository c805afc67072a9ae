//! Dashboard overview.
//!
//! The three sections load concurrently and independently: a section that
//! fails is logged and shown empty. Only when every section fails is the
//! load an error.

use crate::notifications::toasts;
use crate::session_manager::SessionManager;
use ecoweb_core::dashboard::{DashboardApi, DashboardOverview, RECENT_LIMIT};
use ecoweb_core::notification::{Notification, Notifier};
use ecoweb_core::session::SessionToken;
use ecoweb_core::{EcowebError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct DashboardService {
    api: Arc<dyn DashboardApi>,
    session: Arc<SessionManager>,
    notifier: Arc<dyn Notifier>,
    latest: RwLock<Option<DashboardOverview>>,
}

impl DashboardService {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        session: Arc<SessionManager>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            latest: RwLock::new(None),
        }
    }

    pub async fn load(&self) -> Result<DashboardOverview> {
        let token = self.token().await?;
        let sections = tokio::join!(
            self.api.fetch_stats(&token),
            self.api.recent_materials(&token, RECENT_LIMIT),
            self.api.recent_activities(&token),
        );
        let (stats, materials, activities) = match sections {
            (Err(e), Err(_), Err(_)) => return Err(self.report(e, toasts::dashboard_failed())),
            sections => sections,
        };

        let overview = DashboardOverview::new(
            section("stats", stats),
            section("materials", materials).unwrap_or_default(),
            section("activities", activities).unwrap_or_default(),
        );
        tracing::debug!(
            "[DashboardService] {} active material(s), {} activit(ies)",
            overview.active_materials.len(),
            overview.activities.len()
        );
        *self.latest.write().await = Some(overview.clone());
        Ok(overview)
    }

    /// The last successfully loaded overview.
    pub async fn latest(&self) -> Option<DashboardOverview> {
        self.latest.read().await.clone()
    }

    async fn token(&self) -> Result<SessionToken> {
        self.session
            .require_token()
            .await
            .map_err(|e| self.report(e, toasts::session_expired()))
    }

    fn report(&self, err: EcowebError, notification: Notification) -> EcowebError {
        tracing::warn!("[DashboardService] {}", err);
        self.notifier.notify(notification);
        err
    }
}

fn section<T>(name: &str, result: Result<T>) -> Option<T> {
    result
        .inspect_err(|e| tracing::warn!("[DashboardService] {} unavailable: {}", name, e))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        FakeDonationApi, MemoryTokenStore, RecordingNavigator, RecordingNotifier, material,
    };
    use ecoweb_core::config::SessionSettings;
    use ecoweb_core::dashboard::{Activity, DashboardStats};
    use ecoweb_core::material::MaterialStatus;
    use ecoweb_core::session::Credentials;

    async fn service(
        logged_in: bool,
    ) -> (Arc<FakeDonationApi>, Arc<RecordingNotifier>, DashboardService) {
        let api = Arc::new(FakeDonationApi::new());
        api.add_account("empresa@eco.com", "senha-forte", "tok");
        api.add_material(material("m1", "Paletes", MaterialStatus::Doado));
        api.add_material(material("m2", "Retalhos", MaterialStatus::Publicado));
        api.add_material(material("m3", "Sucata", MaterialStatus::Pausado));
        api.set_dashboard(
            DashboardStats {
                materiais_ativos: 2,
                propostas_recebidas: 4,
                total_doado: 1.5,
                ..DashboardStats::default()
            },
            vec![Activity {
                id: "1".to_string(),
                mensagem: "Nova proposta para Retalhos".to_string(),
                data: None,
            }],
        );

        let session = Arc::new(SessionManager::new(
            api.clone(),
            Arc::new(MemoryTokenStore::new()),
            Arc::new(RecordingNavigator::new()),
            SessionSettings::default(),
        ));
        session.initialize().await;
        if logged_in {
            session
                .login(&Credentials {
                    email_or_cnpj: "empresa@eco.com".to_string(),
                    password: "senha-forte".to_string(),
                })
                .await
                .unwrap();
        }

        let notifier = Arc::new(RecordingNotifier::new());
        let service = DashboardService::new(api.clone(), session, notifier.clone());
        (api, notifier, service)
    }

    #[tokio::test]
    async fn test_load_builds_overview() {
        let (_api, notifier, service) = service(true).await;

        let overview = service.load().await.unwrap();
        assert_eq!(overview.stats.as_ref().map(|s| s.propostas_recebidas), Some(4));
        let ids: Vec<_> = overview.active_materials.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["m2", "m3"]);
        assert_eq!(overview.activities.len(), 1);
        assert_eq!(service.latest().await, Some(overview));
        assert!(notifier.errors().is_empty());
    }

    #[tokio::test]
    async fn test_failed_section_is_shown_empty() {
        let (api, notifier, service) = service(true).await;
        api.fail("fetch_stats");
        api.fail("recent_activities");

        let overview = service.load().await.unwrap();
        assert_eq!(overview.stats, None);
        assert!(overview.activities.is_empty());
        assert_eq!(overview.active_materials.len(), 2);
        assert!(notifier.errors().is_empty());
    }

    #[tokio::test]
    async fn test_every_section_failing_is_an_error() {
        let (api, notifier, service) = service(true).await;
        service.load().await.unwrap();
        for operation in ["fetch_stats", "recent_materials", "recent_activities"] {
            api.fail(operation);
        }

        assert!(service.load().await.unwrap_err().is_fetch());
        assert_eq!(notifier.errors().len(), 1);
        assert!(service.latest().await.is_some());
    }

    #[tokio::test]
    async fn test_requires_session() {
        let (api, notifier, service) = service(false).await;

        assert!(service.load().await.unwrap_err().is_auth());
        assert_eq!(api.call_count("fetch_stats"), 0);
        assert_eq!(notifier.errors().len(), 1);
    }
}
