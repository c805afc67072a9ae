//! Conversation API port.

use super::filter::ConversationFilter;
use super::model::{Conversation, Message, ReplyContent};
use super::workflow::WorkflowAction;
use crate::error::Result;
use crate::session::SessionToken;
use async_trait::async_trait;

/// The backend's conversation resource.
///
/// The backend is the authority on workflow status; implementations relay
/// requests and report failures, they never fabricate state.
#[async_trait]
pub trait ConversationApi: Send + Sync {
    /// Lists the company's conversations in server order.
    ///
    /// Fails with `EcowebError::Fetch`.
    async fn list_conversations(
        &self,
        token: &SessionToken,
        filter: &ConversationFilter,
    ) -> Result<Vec<Conversation>>;

    /// Fetches one conversation with its full message history.
    async fn get_conversation(&self, token: &SessionToken, id: &str) -> Result<Conversation>;

    /// Posts a reply and returns the message record the backend created.
    ///
    /// Fails with `EcowebError::Action`.
    async fn reply(
        &self,
        token: &SessionToken,
        id: &str,
        content: &ReplyContent,
    ) -> Result<Message>;

    /// Applies a workflow action.
    ///
    /// Returns the updated record when the backend sends one back; `None`
    /// means the backend confirmed without a body.
    async fn transition(
        &self,
        token: &SessionToken,
        id: &str,
        action: WorkflowAction,
    ) -> Result<Option<Conversation>>;
}
