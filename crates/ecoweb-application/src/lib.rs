//! Application layer for the EcoWeb dashboard client.
//!
//! Use cases that coordinate the domain ports (`ecoweb-core`) with whatever
//! implementations the caller injects.
//!
//! # Module Structure
//!
//! - `session_manager`: authentication state, token persistence, route guard
//! - `conversation_workflow`: inbox, replies and workflow transitions
//! - `dashboard_service`: overview metrics, newest listings, activity feed
//! - `material_service`: material listings
//! - `report_service`: impact reports and export
//! - `notifications`: toast texts and the tracing notifier

pub mod conversation_workflow;
pub mod dashboard_service;
pub mod material_service;
pub mod notifications;
pub mod report_service;
pub mod session_manager;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use conversation_workflow::ConversationWorkflowController;
pub use dashboard_service::DashboardService;
pub use material_service::MaterialService;
pub use notifications::TracingNotifier;
pub use report_service::ReportService;
pub use session_manager::SessionManager;
