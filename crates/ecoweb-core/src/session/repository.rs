//! Session ports: token persistence, the auth endpoint, and navigation.

use super::model::{Credentials, SessionToken, StoredToken};
use super::route::Route;
use crate::company::CompanyRegistration;
use crate::error::Result;
use async_trait::async_trait;

/// Durable storage for the session token (cookie equivalent).
///
/// # Implementation Notes
///
/// - `load` returns `Ok(None)` when nothing is stored or the stored record
///   has expired.
/// - `clear` succeeds when nothing is stored.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Loads the persisted token, if any.
    async fn load(&self) -> Result<Option<StoredToken>>;

    /// Persists `token`, replacing any previous record.
    async fn save(&self, token: &StoredToken) -> Result<()>;

    /// Removes the persisted token.
    async fn clear(&self) -> Result<()>;
}

/// The backend's authentication endpoints.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a token.
    ///
    /// Every failure, including network errors, is reported as
    /// `EcowebError::Auth`.
    async fn login(&self, credentials: &Credentials) -> Result<SessionToken>;

    /// Registers a new company account.
    async fn register_company(&self, company: &CompanyRegistration) -> Result<()>;
}

/// Moves the user between views.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
