//! Session lifecycle against a real file-backed token store.

use ecoweb_application::SessionManager;
use ecoweb_application::test_support::{FakeDonationApi, RecordingNavigator};
use ecoweb_core::config::SessionSettings;
use ecoweb_core::session::{Credentials, Route, RouteDecision, TokenStore};
use ecoweb_infrastructure::{EcowebPaths, FileTokenStore};
use std::sync::Arc;
use tempfile::TempDir;

struct App {
    api: Arc<FakeDonationApi>,
    store: Arc<FileTokenStore>,
    navigator: Arc<RecordingNavigator>,
    manager: SessionManager,
}

/// One "process start": a fresh manager over the same session file.
fn start(dir: &TempDir, api: Arc<FakeDonationApi>) -> App {
    let paths = EcowebPaths::new(Some(dir.path())).unwrap();
    let settings = SessionSettings::default();
    let store = Arc::new(FileTokenStore::new(
        paths.session_file(),
        settings.cookie_name.clone(),
    ));
    let navigator = Arc::new(RecordingNavigator::new());
    let manager = SessionManager::new(api.clone(), store.clone(), navigator.clone(), settings);
    App {
        api,
        store,
        navigator,
        manager,
    }
}

fn backend() -> Arc<FakeDonationApi> {
    let api = Arc::new(FakeDonationApi::new());
    api.add_account("12.345.678/0001-90", "senha-forte", "tok-abc");
    api
}

fn credentials(password: &str) -> Credentials {
    Credentials {
        email_or_cnpj: "12.345.678/0001-90".to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_login_survives_restart() {
    let dir = TempDir::new().unwrap();
    let api = backend();

    let app = start(&dir, api.clone());
    app.manager.initialize().await;
    app.manager.login(&credentials("senha-forte")).await.unwrap();

    let restarted = start(&dir, api);
    let session = restarted.manager.initialize().await;
    assert!(session.is_authenticated);
    assert_eq!(session.token.unwrap().as_str(), "tok-abc");
    assert_eq!(restarted.manager.guard(&Route::Inbox).await, RouteDecision::Allow);
}

#[tokio::test]
async fn test_logout_then_initialize_is_unauthenticated() {
    let dir = TempDir::new().unwrap();
    let app = start(&dir, backend());
    app.manager.initialize().await;
    app.manager.login(&credentials("senha-forte")).await.unwrap();

    app.manager.logout().await;
    assert_eq!(app.navigator.routes(), vec![Route::login()]);

    let session = app.manager.initialize().await;
    assert!(!session.is_authenticated);
    assert!(app.store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_invalid_login_persists_nothing() {
    let dir = TempDir::new().unwrap();
    let app = start(&dir, backend());
    app.manager.initialize().await;

    let err = app.manager.login(&credentials("errada")).await.unwrap_err();
    assert!(err.is_auth());
    assert!(!app.manager.session().await.is_authenticated);
    assert!(app.store.load().await.unwrap().is_none());
    assert_eq!(app.api.call_count("login"), 1);
}
