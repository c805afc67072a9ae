//! Dashboard routes and the protected-route gate.

use std::fmt;

/// A view the application can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login { callback_url: Option<String> },
    Register,
    Dashboard,
    Materials,
    NewMaterial,
    Material(String),
    Inbox,
    Conversation(String),
    Reports,
}

impl Route {
    /// Path of the view, e.g. `/dashboard/inbox/c1`.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login { callback_url: None } => "/login".to_string(),
            Route::Login {
                callback_url: Some(url),
            } => format!("/login?callbackUrl={}", encode_component(url)),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Materials => "/dashboard/materials".to_string(),
            Route::NewMaterial => "/dashboard/materials/new".to_string(),
            Route::Material(id) => format!("/dashboard/materials/{}", id),
            Route::Inbox => "/dashboard/inbox".to_string(),
            Route::Conversation(id) => format!("/dashboard/inbox/{}", id),
            Route::Reports => "/dashboard/reports".to_string(),
        }
    }

    /// Every dashboard view requires an authenticated session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Home | Route::Login { .. } | Route::Register)
    }

    pub fn login() -> Self {
        Route::Login { callback_url: None }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of gating a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    /// The session is still being restored; the caller should wait.
    Pending,
    /// Send the user to the login view, coming back afterwards.
    Redirect(Route),
}

/// Percent-encodes everything outside the unreserved set (RFC 3986).
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
