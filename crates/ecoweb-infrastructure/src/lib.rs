//! Filesystem adapters for the EcoWeb client.
//!
//! # Module Structure
//!
//! - `paths`: config directory resolution
//! - `storage`: atomic TOML files
//! - `token_store`: cookie-equivalent session token persistence
//! - `config_service`: cached `config.toml` loading

pub mod config_service;
pub mod paths;
pub mod storage;
pub mod token_store;

pub use crate::config_service::ConfigService;
pub use crate::paths::EcowebPaths;
pub use crate::token_store::FileTokenStore;
