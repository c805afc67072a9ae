//! REST adapters for the EcoWeb backend.
//!
//! [`RestClient`] implements every API port of `ecoweb-core`
//! (`AuthApi`, `ConversationApi`, `DashboardApi`, `MaterialApi`, `ReportApi`).

mod auth;
mod conversations;
mod dashboard;
pub mod endpoints;
mod materials;
mod reports;
pub mod response;
pub mod rest_client;

pub use crate::endpoints::Endpoints;
pub use crate::response::OperationClass;
pub use crate::rest_client::RestClient;
