//! Wires configuration, storage, the REST client and the use cases together.

use anyhow::{Context, Result, bail};
use ecoweb_application::{
    ConversationWorkflowController, DashboardService, MaterialService, ReportService,
    SessionManager, TracingNotifier,
};
use ecoweb_core::config::EcowebConfig;
use ecoweb_core::notification::Notifier;
use ecoweb_core::session::{Navigator, Route, RouteDecision};
use ecoweb_infrastructure::{EcowebPaths, FileTokenStore};
use ecoweb_interaction::RestClient;
use std::sync::Arc;

/// Terminal stand-in for client-side navigation.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!("[Navigator] -> {}", route);
        if matches!(route, Route::Login { .. }) {
            eprintln!("Use `ecoweb login` para entrar novamente.");
        }
    }
}

/// Everything a command needs, built once per invocation.
pub struct AppContext {
    pub config: EcowebConfig,
    pub paths: EcowebPaths,
    pub session: Arc<SessionManager>,
    pub dashboard: DashboardService,
    pub inbox: ConversationWorkflowController,
    pub materials: MaterialService,
    pub reports: ReportService,
}

impl AppContext {
    /// Fails unless the session may open `route`.
    pub async fn require(&self, route: Route) -> Result<()> {
        match self.session.guard(&route).await {
            RouteDecision::Allow => Ok(()),
            RouteDecision::Pending => bail!("Sessão ainda carregando"),
            RouteDecision::Redirect(login) => {
                tracing::debug!("[Bootstrap] {} redirected to {}", route, login);
                bail!("Não autenticado. Execute `ecoweb login` para acessar {}", route)
            }
        }
    }
}

pub async fn bootstrap(paths: EcowebPaths, config: EcowebConfig) -> Result<AppContext> {
    let client = Arc::new(
        RestClient::from_settings(&config.api)
            .with_context(|| format!("Invalid API URL '{}'", config.api.base_url))?,
    );
    let token_store = Arc::new(FileTokenStore::new(
        paths.session_file(),
        config.session.cookie_name.clone(),
    ));
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);

    let session = Arc::new(SessionManager::new(
        client.clone(),
        token_store,
        Arc::new(TerminalNavigator),
        config.session.clone(),
    ));
    session.initialize().await;

    let dashboard = DashboardService::new(client.clone(), session.clone(), notifier.clone());
    let inbox = ConversationWorkflowController::new(client.clone(), session.clone(), notifier.clone());
    let materials = MaterialService::new(client.clone(), session.clone(), notifier.clone());
    let reports = ReportService::new(client, session.clone(), notifier);

    tracing::debug!("[Bootstrap] API at {}", config.api.base_url);
    Ok(AppContext {
        config,
        paths,
        session,
        dashboard,
        inbox,
        materials,
        reports,
    })
}
