pub mod auth;
pub mod config;
pub mod dashboard;
pub mod inbox;
pub mod materials;
pub mod reports;
