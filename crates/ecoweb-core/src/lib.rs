//! Domain layer of the EcoWeb dashboard client.
//!
//! Holds the models, status state machines, form validation and the ports
//! (traits) the infrastructure and interaction crates implement. Nothing in
//! this crate performs I/O.

pub mod api;
pub mod company;
pub mod config;
pub mod conversation;
pub mod dashboard;
pub mod error;
pub mod material;
pub mod notification;
pub mod report;
pub mod serde_util;
pub mod session;
pub mod validation;

// Re-export common error type
pub use error::{EcowebError, Result};
