//! Configuration service.
//!
//! Loads `config.toml` from the EcoWeb config directory, applies the
//! `ECOWEB_API_URL` override and caches the result.

use crate::paths::EcowebPaths;
use crate::storage::{AtomicTomlError, AtomicTomlFile};
use ecoweb_core::config::{API_URL_ENV, EcowebConfig};
use ecoweb_core::{EcowebError, Result};
use std::sync::{Arc, RwLock};

/// Loads and caches the client configuration.
#[derive(Clone)]
pub struct ConfigService {
    file: Arc<AtomicTomlFile<EcowebConfig>>,
    api_url_override: Option<String>,
    config: Arc<RwLock<Option<EcowebConfig>>>,
}

impl ConfigService {
    /// Creates a service reading `ECOWEB_API_URL` from the environment.
    pub fn new(paths: &EcowebPaths) -> Self {
        let api_url_override = std::env::var(API_URL_ENV).ok().filter(|v| !v.trim().is_empty());
        Self::with_api_url_override(paths, api_url_override)
    }

    pub fn with_api_url_override(paths: &EcowebPaths, api_url_override: Option<String>) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(paths.config_file())),
            api_url_override,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the configuration, loading it from disk if not cached.
    ///
    /// A missing file yields the defaults; a malformed or out-of-range one is
    /// an error.
    pub fn get_config(&self) -> Result<EcowebConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|_| EcowebError::internal("config cache lock poisoned"))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let mut loaded = self.file.load()?.unwrap_or_default();
        loaded.validate().inspect_err(|e| {
            tracing::warn!("[ConfigService] {} rejected: {}", self.file.path().display(), e)
        })?;
        if let Some(url) = &self.api_url_override {
            tracing::debug!("[ConfigService] {} overrides api.base_url", API_URL_ENV);
            loaded.api.base_url = url.clone();
        }

        {
            let mut write_lock = self
                .config
                .write()
                .map_err(|_| EcowebError::internal("config cache lock poisoned"))?;
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Writes `config` to disk and drops the cached copy.
    pub fn save(&self, config: &EcowebConfig) -> Result<()> {
        config.validate()?;
        self.file.save(config)?;
        self.invalidate_cache();
        Ok(())
    }

    /// Edits `config.toml` in place under the file lock and returns what was
    /// written. The environment override is not persisted, and an edit that
    /// leaves the config invalid is not written.
    pub fn update<F>(&self, f: F) -> Result<EcowebConfig>
    where
        F: FnOnce(&mut EcowebConfig),
    {
        let written = self.file.update(EcowebConfig::default(), |config| {
            f(config);
            config
                .validate()
                .map_err(AtomicTomlError::Rejected)
        })?;
        self.invalidate_cache();
        tracing::info!("[ConfigService] Updated {}", self.file.path().display());
        Ok(written)
    }

    /// Forces a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoweb_core::config::DEFAULT_API_URL;
    use tempfile::TempDir;

    fn paths(dir: &TempDir) -> EcowebPaths {
        EcowebPaths::new(Some(dir.path())).unwrap()
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::with_api_url_override(&paths(&dir), None);
        let config = service.get_config().unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.session.cookie_name, "authToken");
    }

    #[test]
    fn test_env_override_and_cache() {
        let dir = TempDir::new().unwrap();
        let paths = paths(&dir);
        std::fs::write(paths.config_file(), "[api]\nbase_url = \"http://from-file\"\n").unwrap();

        let service = ConfigService::with_api_url_override(
            &paths,
            Some("https://api.ecoweb.test".to_string()),
        );
        assert_eq!(service.get_config().unwrap().api.base_url, "https://api.ecoweb.test");

        let plain = ConfigService::with_api_url_override(&paths, None);
        assert_eq!(plain.get_config().unwrap().api.base_url, "http://from-file");

        // Cached until invalidated.
        std::fs::write(paths.config_file(), "[api]\nbase_url = \"http://changed\"\n").unwrap();
        assert_eq!(plain.get_config().unwrap().api.base_url, "http://from-file");
        plain.invalidate_cache();
        assert_eq!(plain.get_config().unwrap().api.base_url, "http://changed");
    }

    #[test]
    fn test_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::with_api_url_override(&paths(&dir), None);

        let mut config = service.get_config().unwrap();
        config.api.timeout_secs = 5;
        config.log_level = "debug".to_string();
        service.save(&config).unwrap();

        assert_eq!(service.get_config().unwrap(), config);
    }

    #[test]
    fn test_update_keeps_other_settings() {
        let dir = TempDir::new().unwrap();
        let paths = paths(&dir);
        std::fs::write(paths.config_file(), "log_level = \"debug\"\n").unwrap();

        let service = ConfigService::with_api_url_override(&paths, Some("http://env".to_string()));
        let written = service
            .update(|c| c.api.base_url = "https://api.ecoweb.com.br".to_string())
            .unwrap();
        assert_eq!(written.log_level, "debug");
        assert_eq!(written.api.base_url, "https://api.ecoweb.com.br");

        let plain = ConfigService::with_api_url_override(&paths, None);
        assert_eq!(plain.get_config().unwrap(), written);
        assert_eq!(service.get_config().unwrap().api.base_url, "http://env");
    }

    #[test]
    fn test_out_of_range_ttl_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let paths = paths(&dir);
        std::fs::write(paths.config_file(), "[session]\ntoken_ttl_days = 1000000000000\n").unwrap();

        let service = ConfigService::with_api_url_override(&paths, None);
        assert!(service.get_config().unwrap_err().is_config());

        std::fs::write(paths.config_file(), "[session]\ntoken_ttl_days = -1\n").unwrap();
        service.invalidate_cache();
        assert!(service.get_config().unwrap_err().is_config());
    }

    #[test]
    fn test_invalid_update_is_not_written() {
        let dir = TempDir::new().unwrap();
        let paths = paths(&dir);
        std::fs::write(paths.config_file(), "log_level = \"debug\"\n").unwrap();

        let service = ConfigService::with_api_url_override(&paths, None);
        let err = service.update(|c| c.api.timeout_secs = 0).unwrap_err();
        assert!(err.is_config());
        assert_eq!(
            std::fs::read_to_string(paths.config_file()).unwrap(),
            "log_level = \"debug\"\n"
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let paths = paths(&dir);
        std::fs::write(paths.config_file(), "[api\n").unwrap();

        let service = ConfigService::with_api_url_override(&paths, None);
        assert!(service.get_config().is_err());
    }
}
