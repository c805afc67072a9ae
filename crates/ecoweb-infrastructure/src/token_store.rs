//! File-backed session token store, the CLI's equivalent of the `authToken` cookie.

use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use chrono::Utc;
use ecoweb_core::Result;
use ecoweb_core::session::{StoredToken, TokenStore};
use std::path::PathBuf;

/// Stores a single [`StoredToken`] in an owner-only TOML file.
///
/// A record whose expiry has passed, or that was written under another cookie
/// name, reads as absent. Expired records are removed on read.
pub struct FileTokenStore {
    file: AtomicTomlFile<StoredToken>,
    cookie_name: String,
}

impl FileTokenStore {
    pub fn new(path: PathBuf, cookie_name: impl Into<String>) -> Self {
        Self {
            file: AtomicTomlFile::new(path).private(),
            cookie_name: cookie_name.into(),
        }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<StoredToken>> {
        let Some(stored) = self.file.load()? else {
            return Ok(None);
        };

        if stored.name != self.cookie_name {
            tracing::debug!(
                "[TokenStore] Ignoring record stored under '{}' (expected '{}')",
                stored.name,
                self.cookie_name
            );
            return Ok(None);
        }

        if stored.is_expired(Utc::now()) {
            tracing::info!("[TokenStore] Stored token expired at {}, removing", stored.expires_at);
            self.file.remove()?;
            return Ok(None);
        }

        Ok(Some(stored))
    }

    async fn save(&self, token: &StoredToken) -> Result<()> {
        self.file.save(token)?;
        tracing::debug!(
            "[TokenStore] Saved token to {:?} (expires {})",
            self.file.path(),
            token.expires_at
        );
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.file.remove()?;
        tracing::debug!("[TokenStore] Cleared {:?}", self.file.path());
        Ok(())
    }
}
