//! Inbox filtering.

use super::model::Conversation;
use super::workflow::ConversationStatus;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Server-side scope of a conversation listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationFilter {
    pub material_id: Option<String>,
}

impl ConversationFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_material(material_id: impl Into<String>) -> Self {
        Self {
            material_id: Some(material_id.into()),
        }
    }

    pub fn matches(&self, conversation: &Conversation) -> bool {
        self.material_id
            .as_deref()
            .is_none_or(|id| conversation.material_id == id)
    }
}

/// Tab of the inbox list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum InboxView {
    /// Everything that is not archived.
    #[default]
    All,
    Unread,
    Archived,
}

impl InboxView {
    pub fn matches(self, conversation: &Conversation) -> bool {
        match self {
            InboxView::All => conversation.status != ConversationStatus::Archived,
            InboxView::Unread => conversation.unread_count > 0,
            InboxView::Archived => conversation.status == ConversationStatus::Archived,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::PartyType;
    use std::str::FromStr;

    fn conversation(id: &str, material: &str, status: ConversationStatus, unread: u32) -> Conversation {
        Conversation {
            id: id.to_string(),
            interested_party_name: "Ateliê Verde".to_string(),
            interested_party_type: PartyType::Creator,
            material_id: material.to_string(),
            material_name: "Retalhos".to_string(),
            messages: Vec::new(),
            last_message: String::new(),
            last_message_time: String::new(),
            unread_count: unread,
            status,
        }
    }

    #[test]
    fn test_material_filter() {
        let filter = ConversationFilter::for_material("m1");
        assert!(filter.matches(&conversation("c1", "m1", ConversationStatus::Active, 0)));
        assert!(!filter.matches(&conversation("c2", "m2", ConversationStatus::Active, 0)));
        assert!(ConversationFilter::all().matches(&conversation("c2", "m2", ConversationStatus::Active, 0)));
    }

    #[test]
    fn test_views() {
        let archived = conversation("c1", "m1", ConversationStatus::Archived, 2);
        let active = conversation("c2", "m1", ConversationStatus::Active, 0);

        assert!(!InboxView::All.matches(&archived));
        assert!(InboxView::All.matches(&active));
        assert!(InboxView::Unread.matches(&archived));
        assert!(!InboxView::Unread.matches(&active));
        assert!(InboxView::Archived.matches(&archived));
        assert!(!InboxView::Archived.matches(&active));
    }

    #[test]
    fn test_view_parse() {
        assert_eq!(InboxView::from_str("unread").unwrap(), InboxView::Unread);
        assert!(InboxView::from_str("spam").is_err());
    }
}
