//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `model`: `Conversation`, `Message`, reply validation
//! - `workflow`: status state machine and workflow actions
//! - `filter`: material scope and inbox tabs
//! - `repository`: `ConversationApi` port

mod filter;
mod model;
mod repository;
mod workflow;

pub use filter::{ConversationFilter, InboxView};
pub use model::{Conversation, Message, PartyType, ReplyContent, Sender};
pub use repository::ConversationApi;
pub use workflow::{ConversationStatus, WorkflowAction};
