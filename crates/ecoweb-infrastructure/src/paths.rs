//! Path management for EcoWeb's local files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/ecoweb/            # Config directory (or $ECOWEB_CONFIG_DIR)
//! ├── config.toml              # Client configuration
//! └── session.toml             # Persisted session token (0600)
//! ```

use ecoweb_core::EcowebError;
use std::path::{Path, PathBuf};

/// Environment variable that relocates the whole config directory.
pub const CONFIG_DIR_ENV: &str = "ECOWEB_CONFIG_DIR";

const APP_DIR_NAME: &str = "ecoweb";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for EcowebError {
    fn from(e: PathError) -> Self {
        EcowebError::config(e.to_string())
    }
}

/// Resolved locations of EcoWeb's files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcowebPaths {
    config_dir: PathBuf,
}

impl EcowebPaths {
    /// Resolves the config directory.
    ///
    /// Precedence: explicit `base_path`, then `$ECOWEB_CONFIG_DIR`, then the
    /// platform config directory joined with `ecoweb`.
    pub fn new(base_path: Option<&Path>) -> Result<Self, PathError> {
        let env_dir = std::env::var_os(CONFIG_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::resolve(base_path, env_dir)
    }

    fn resolve(base_path: Option<&Path>, env_dir: Option<PathBuf>) -> Result<Self, PathError> {
        let config_dir = match (base_path, env_dir) {
            (Some(base), _) => base.to_path_buf(),
            (None, Some(dir)) => dir,
            (None, None) => dirs::config_dir()
                .ok_or(PathError::ConfigDirNotFound)?
                .join(APP_DIR_NAME),
        };
        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// `config.toml`
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// `session.toml`, the cookie-equivalent token record.
    pub fn session_file(&self) -> PathBuf {
        self.config_dir.join("session.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_base_wins() {
        let paths =
            EcowebPaths::resolve(Some(Path::new("/tmp/base")), Some(PathBuf::from("/tmp/env")))
                .unwrap();
        assert_eq!(paths.config_dir(), Path::new("/tmp/base"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/base/config.toml"));
        assert_eq!(paths.session_file(), PathBuf::from("/tmp/base/session.toml"));
    }

    #[test]
    fn test_env_dir_over_platform_default() {
        let paths = EcowebPaths::resolve(None, Some(PathBuf::from("/tmp/env"))).unwrap();
        assert_eq!(paths.config_dir(), Path::new("/tmp/env"));
    }

    #[test]
    fn test_platform_default_ends_with_app_dir() {
        if let Ok(paths) = EcowebPaths::resolve(None, None) {
            assert!(paths.config_dir().ends_with("ecoweb"));
        }
    }
}
