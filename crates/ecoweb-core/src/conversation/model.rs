//! Conversation and message domain model.

use super::workflow::ConversationStatus;
use crate::serde_util::id_string;
use crate::validation::ValidationErrors;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Kind of party interested in a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PartyType {
    Ong,
    Creator,
    Individual,
}

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sender {
    Company,
    Interested,
}

/// A single message in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub sender: Sender,
    pub content: String,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
    #[serde(default)]
    pub read: bool,
}

/// A negotiation thread between the company and an interested party about
/// one material listing.
///
/// `messages` is append-only from the client's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub interested_party_name: String,
    pub interested_party_type: PartyType,
    #[serde(deserialize_with = "id_string")]
    pub material_id: String,
    pub material_name: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub last_message: String,
    #[serde(default)]
    pub last_message_time: String,
    #[serde(default)]
    pub unread_count: u32,
    pub status: ConversationStatus,
}

impl Conversation {
    /// Appends a message echoed back by the backend and refreshes the preview fields.
    pub fn push_message(&mut self, message: Message) {
        self.last_message = message.content.clone();
        self.last_message_time = message.timestamp.clone();
        self.messages.push(message);
    }

    pub fn has_unread(&self) -> bool {
        self.unread_count > 0
    }
}

/// Reply text that passed local validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyContent {
    content: String,
}

impl ReplyContent {
    /// Rejects empty and whitespace-only text. The text itself is sent as typed.
    pub fn parse(raw: &str) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if raw.trim().is_empty() {
            errors.add("content", "A mensagem não pode estar vazia");
        }
        errors.into_result(Self {
            content: raw.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = r#"{
        "id": "c1",
        "interestedPartyName": "ONG Recicla",
        "interestedPartyType": "ong",
        "materialId": 12,
        "materialName": "Paletes de madeira",
        "messages": [
            {"id": 1, "sender": "interested", "content": "Olá!", "timestamp": "2025-05-01T10:00:00Z", "read": false}
        ],
        "lastMessage": "Olá!",
        "lastMessageTime": "2025-05-01T10:00:00Z",
        "unreadCount": 1,
        "status": "active"
    }"#;

    #[test]
    fn test_decode_conversation() {
        let conversation: Conversation = serde_json::from_str(RAW).unwrap();
        assert_eq!(conversation.material_id, "12");
        assert_eq!(conversation.interested_party_type, PartyType::Ong);
        assert_eq!(conversation.messages[0].id, "1");
        assert_eq!(conversation.messages[0].sender, Sender::Interested);
        assert_eq!(conversation.status, ConversationStatus::Active);
        assert!(conversation.has_unread());
    }

    #[test]
    fn test_push_message_updates_preview() {
        let mut conversation: Conversation = serde_json::from_str(RAW).unwrap();
        conversation.push_message(Message {
            id: "2".to_string(),
            sender: Sender::Company,
            content: "Podemos agendar?".to_string(),
            timestamp: "2025-05-01T11:00:00Z".to_string(),
            read: true,
        });

        assert_eq!(conversation.messages.len(), 2);
        assert_eq!(conversation.last_message, "Podemos agendar?");
        assert_eq!(conversation.last_message_time, "2025-05-01T11:00:00Z");
    }

    #[test]
    fn test_reply_content() {
        assert!(ReplyContent::parse("").is_err());
        assert!(ReplyContent::parse("  \n\t ").is_err());
        assert_eq!(ReplyContent::parse(" oi ").unwrap().as_str(), " oi ");
    }
}
