//! Session Manager - owns the authentication state of the client.
//!
//! One instance is constructed at startup and shared (`Arc`) with every
//! service that needs a token. There is no global session.

use chrono::Utc;
use ecoweb_core::company::CompanyRegistrationForm;
use ecoweb_core::config::SessionSettings;
use ecoweb_core::session::{
    AuthApi, Credentials, Navigator, Route, RouteDecision, Session, SessionState, SessionToken,
    StoredToken, TokenStore, check_token_ttl_days,
};
use ecoweb_core::{EcowebError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Clears the pending-login flag when the login attempt ends, however it ends.
struct PendingLogin<'a>(&'a AtomicBool);

impl Drop for PendingLogin<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Authentication state, token persistence and route gating.
///
/// # State machine
///
/// ```text
/// Loading --initialize, token found--> Authenticated
/// Loading --initialize, none/expired/read error--> Unauthenticated
/// Unauthenticated --login ok--> Authenticated
/// Authenticated --logout--> Unauthenticated
/// ```
pub struct SessionManager {
    auth_api: Arc<dyn AuthApi>,
    token_store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    settings: SessionSettings,
    state: RwLock<SessionState>,
    login_pending: AtomicBool,
}

impl SessionManager {
    pub fn new(
        auth_api: Arc<dyn AuthApi>,
        token_store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            auth_api,
            token_store,
            navigator,
            settings,
            state: RwLock::new(SessionState::Loading),
            login_pending: AtomicBool::new(false),
        }
    }

    /// Restores the session from the token store.
    ///
    /// A read failure is not fatal: it is logged and the session starts
    /// unauthenticated.
    pub async fn initialize(&self) -> Session {
        let next = match self.token_store.load().await {
            Ok(Some(stored)) if !stored.is_expired(Utc::now()) => {
                tracing::info!("[SessionManager] Restored session (expires {})", stored.expires_at);
                SessionState::Authenticated(stored.value)
            }
            Ok(Some(_)) => {
                tracing::info!("[SessionManager] Stored token has expired");
                SessionState::Unauthenticated
            }
            Ok(None) => {
                tracing::debug!("[SessionManager] No stored token");
                SessionState::Unauthenticated
            }
            Err(e) => {
                tracing::warn!("[SessionManager] Failed to read stored token: {}", e);
                SessionState::Unauthenticated
            }
        };

        let mut state = self.state.write().await;
        *state = next;
        state.snapshot()
    }

    /// Exchanges credentials for a token and persists it.
    ///
    /// On failure the state and the store are left untouched. A second call
    /// while one is pending fails with `InFlight`.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        if self.login_pending.swap(true, Ordering::SeqCst) {
            return Err(EcowebError::in_flight("login"));
        }
        let _pending = PendingLogin(&self.login_pending);
        check_token_ttl_days(self.settings.token_ttl_days)?;

        tracing::info!("[SessionManager] Logging in as {}", credentials.email_or_cnpj);
        let token = self.auth_api.login(credentials).await.map_err(|e| {
            tracing::warn!("[SessionManager] Login failed: {}", e);
            e
        })?;

        let stored = StoredToken::issue(
            self.settings.cookie_name.clone(),
            token.clone(),
            self.settings.cookie_path.clone(),
            self.settings.token_ttl_days,
            Utc::now(),
        )?;
        if let Err(e) = self.token_store.save(&stored).await {
            tracing::warn!(
                "[SessionManager] Logged in but failed to persist token: {}",
                e
            );
        }

        let mut state = self.state.write().await;
        *state = SessionState::Authenticated(token);
        tracing::info!("[SessionManager] Authenticated");
        Ok(state.snapshot())
    }

    /// Drops the session and sends the user to the login view. Idempotent.
    pub async fn logout(&self) {
        if let Err(e) = self.token_store.clear().await {
            tracing::warn!("[SessionManager] Failed to clear stored token: {}", e);
        }
        {
            let mut state = self.state.write().await;
            *state = SessionState::Unauthenticated;
        }
        tracing::info!("[SessionManager] Logged out");
        self.navigator.navigate(Route::login());
    }

    /// Validates the registration form locally, then registers the company.
    pub async fn register(&self, form: &CompanyRegistrationForm) -> Result<()> {
        let registration = form.validate()?;
        self.auth_api.register_company(&registration).await?;
        tracing::info!("[SessionManager] Company '{}' registered", registration.name);
        Ok(())
    }

    pub async fn session(&self) -> Session {
        self.state.read().await.snapshot()
    }

    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn token(&self) -> Option<SessionToken> {
        self.state.read().await.token().cloned()
    }

    /// The current token, or an `Auth` error when there is none.
    pub async fn require_token(&self) -> Result<SessionToken> {
        self.token()
            .await
            .ok_or_else(|| EcowebError::auth("Not authenticated"))
    }

    /// Decides whether `route` may be shown.
    ///
    /// Protected routes wait while the session is loading and redirect to the
    /// login view, with a callback to `route`, when unauthenticated.
    pub async fn guard(&self, route: &Route) -> RouteDecision {
        if !route.is_protected() {
            return RouteDecision::Allow;
        }
        match &*self.state.read().await {
            SessionState::Loading => RouteDecision::Pending,
            SessionState::Authenticated(_) => RouteDecision::Allow,
            SessionState::Unauthenticated => {
                tracing::debug!("[SessionManager] Redirecting {} to login", route);
                RouteDecision::Redirect(Route::Login {
                    callback_url: Some(route.path()),
                })
            }
        }
    }
}
