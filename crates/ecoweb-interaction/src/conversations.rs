//! ConversationApi over REST.

use crate::response::{OperationClass, decode, decode_optional_record, decode_required};
use crate::rest_client::RestClient;
use async_trait::async_trait;
use ecoweb_core::Result;
use ecoweb_core::conversation::{
    Conversation, ConversationApi, ConversationFilter, Message, ReplyContent, WorkflowAction,
};
use ecoweb_core::session::SessionToken;
use reqwest::Method;

/// Drops records outside `filter`, in case the backend ignored the query.
fn retain_matching(
    mut conversations: Vec<Conversation>,
    filter: &ConversationFilter,
) -> Vec<Conversation> {
    let before = conversations.len();
    conversations.retain(|c| filter.matches(c));
    let dropped = before - conversations.len();
    if dropped > 0 {
        tracing::warn!(
            "[ConversationApi] Backend returned {} conversation(s) outside material filter {:?}",
            dropped,
            filter.material_id
        );
    }
    conversations
}

#[async_trait]
impl ConversationApi for RestClient {
    async fn list_conversations(
        &self,
        token: &SessionToken,
        filter: &ConversationFilter,
    ) -> Result<Vec<Conversation>> {
        let class = OperationClass::Fetch;
        let request = self.request(
            Method::GET,
            self.endpoints().conversations(filter),
            Some(token),
        );
        let body = self.dispatch_text(request, class).await?;

        let conversations: Vec<Conversation> = decode(&body, class)?.unwrap_or_default();
        Ok(retain_matching(conversations, filter))
    }

    async fn get_conversation(&self, token: &SessionToken, id: &str) -> Result<Conversation> {
        let class = OperationClass::Fetch;
        let request = self.request(Method::GET, self.endpoints().conversation(id), Some(token));
        let body = self.dispatch_text(request, class).await?;
        decode_required(&body, class)
    }

    async fn reply(
        &self,
        token: &SessionToken,
        id: &str,
        content: &ReplyContent,
    ) -> Result<Message> {
        let class = OperationClass::Action("send message");
        let (builder, request_id) = self.request(
            Method::POST,
            self.endpoints().conversation_reply(id),
            Some(token),
        );
        let body = self
            .dispatch_text((builder.json(content), request_id), class)
            .await?;
        decode_required(&body, class)
    }

    async fn transition(
        &self,
        token: &SessionToken,
        id: &str,
        action: WorkflowAction,
    ) -> Result<Option<Conversation>> {
        let class = OperationClass::Action(action.label());
        let request = self.request(
            Method::POST,
            self.endpoints().conversation_action(id, action),
            Some(token),
        );
        let body = self.dispatch_text(request, class).await?;
        decode_optional_record(&body, class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoweb_core::conversation::{ConversationStatus, PartyType};

    fn conversation(id: &str, material_id: &str) -> Conversation {
        Conversation {
            id: id.to_string(),
            interested_party_name: "Coletivo Reuso".to_string(),
            interested_party_type: PartyType::Individual,
            material_id: material_id.to_string(),
            material_name: "Sobras".to_string(),
            messages: Vec::new(),
            last_message: String::new(),
            last_message_time: String::new(),
            unread_count: 0,
            status: ConversationStatus::Active,
        }
    }

    #[test]
    fn test_material_filter_safety_net() {
        let listed = vec![
            conversation("c1", "m1"),
            conversation("c2", "m2"),
            conversation("c3", "m1"),
        ];
        let kept = retain_matching(listed.clone(), &ConversationFilter::for_material("m1"));
        let ids: Vec<&str> = kept.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c3"]);

        assert_eq!(retain_matching(listed, &ConversationFilter::all()).len(), 3);
    }

    #[test]
    fn test_reply_body_shape() {
        let content = ReplyContent::parse("Podemos retirar amanhã").unwrap();
        assert_eq!(
            serde_json::to_value(&content).unwrap(),
            serde_json::json!({"content": "Podemos retirar amanhã"})
        );
    }
}
