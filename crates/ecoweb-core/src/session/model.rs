//! Session domain model.
//!
//! The session is the only durable client-side state: an opaque token with a
//! fixed expiry, persisted in a cookie-equivalent store.

use crate::error::EcowebError;
use crate::validation::{ValidationErrors, is_blank};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default lifetime of a persisted token.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 3;
/// Longest accepted token lifetime.
pub const MAX_TOKEN_TTL_DAYS: i64 = 400;
/// Default cookie name the token is stored under.
pub const DEFAULT_COOKIE_NAME: &str = "authToken";
/// Default cookie path scope.
pub const DEFAULT_COOKIE_PATH: &str = "/";

/// Opaque credential proving authentication.
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// A persisted token record, the equivalent of a browser cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToken {
    pub name: String,
    pub value: SessionToken,
    pub path: String,
    pub expires_at: DateTime<Utc>,
}

/// Rejects token lifetimes outside `1..=MAX_TOKEN_TTL_DAYS`.
pub fn check_token_ttl_days(ttl_days: i64) -> Result<(), EcowebError> {
    if (1..=MAX_TOKEN_TTL_DAYS).contains(&ttl_days) {
        Ok(())
    } else {
        Err(EcowebError::config(format!(
            "session.token_ttl_days must be between 1 and {}, got {}",
            MAX_TOKEN_TTL_DAYS, ttl_days
        )))
    }
}

impl StoredToken {
    /// Creates a record expiring `ttl_days` after `now`.
    pub fn issue(
        name: impl Into<String>,
        value: SessionToken,
        path: impl Into<String>,
        ttl_days: i64,
        now: DateTime<Utc>,
    ) -> Result<Self, EcowebError> {
        check_token_ttl_days(ttl_days)?;
        let expires_at = TimeDelta::try_days(ttl_days)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                EcowebError::config(format!("token expiry out of range for {} day(s)", ttl_days))
            })?;
        Ok(Self {
            name: name.into(),
            value,
            path: path.into(),
            expires_at,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Authentication state machine.
///
/// ```text
/// Loading --token found / login ok--> Authenticated
/// Loading --no token / read failure--> Unauthenticated
/// Unauthenticated --login ok--> Authenticated
/// Authenticated --logout--> Unauthenticated
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Loading,
    Unauthenticated,
    Authenticated(SessionToken),
}

impl SessionState {
    pub fn token(&self) -> Option<&SessionToken> {
        match self {
            SessionState::Authenticated(token) => Some(token),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Session {
        Session {
            token: self.token().cloned(),
            is_authenticated: matches!(self, SessionState::Authenticated(_)),
            is_loading: matches!(self, SessionState::Loading),
        }
    }
}

/// Read-only view of the session handed to the rest of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: Option<SessionToken>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

/// Login form as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email_or_cnpj: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if is_blank(&self.email_or_cnpj) {
            errors.add("emailOrCnpj", "Email corporativo ou CNPJ é obrigatório");
        }
        if self.password.is_empty() {
            errors.add("password", "Senha é obrigatória");
        }
        errors.into_result(Credentials {
            email_or_cnpj: self.email_or_cnpj.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Validated credentials sent to the auth endpoint.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email_or_cnpj: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email_or_cnpj", &self.email_or_cnpj)
            .field("password", &"***")
            .finish()
    }
}
