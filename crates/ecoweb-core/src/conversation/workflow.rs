//! Per-conversation workflow status and the actions that move it.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Position of a conversation in the donation lifecycle.
///
/// ```text
/// active --schedulePickup--> scheduled --confirmDonation--> completed
/// active --rejectProposal--> rejected
/// {active, scheduled, completed, rejected} --archive--> archived
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConversationStatus {
    Active,
    Scheduled,
    Completed,
    Rejected,
    Archived,
}

/// A user-initiated workflow transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum WorkflowAction {
    #[strum(to_string = "schedule pickup")]
    SchedulePickup,
    #[strum(to_string = "confirm donation")]
    ConfirmDonation,
    #[strum(to_string = "reject proposal")]
    RejectProposal,
    #[strum(to_string = "archive conversation")]
    Archive,
}

impl WorkflowAction {
    /// Path segment of the backend endpoint (`/mensagens/{id}/{endpoint}`).
    pub fn endpoint(self) -> &'static str {
        match self {
            WorkflowAction::SchedulePickup => "schedule",
            WorkflowAction::ConfirmDonation => "confirm",
            WorkflowAction::RejectProposal => "reject",
            WorkflowAction::Archive => "archive",
        }
    }

    /// Static label used in error values.
    pub fn label(self) -> &'static str {
        match self {
            WorkflowAction::SchedulePickup => "schedule pickup",
            WorkflowAction::ConfirmDonation => "confirm donation",
            WorkflowAction::RejectProposal => "reject proposal",
            WorkflowAction::Archive => "archive conversation",
        }
    }

    /// Status the conversation lands in once the backend confirms the action.
    pub fn target(self) -> ConversationStatus {
        match self {
            WorkflowAction::SchedulePickup => ConversationStatus::Scheduled,
            WorkflowAction::ConfirmDonation => ConversationStatus::Completed,
            WorkflowAction::RejectProposal => ConversationStatus::Rejected,
            WorkflowAction::Archive => ConversationStatus::Archived,
        }
    }
}

impl ConversationStatus {
    /// Follows the edge labelled `action`, or `None` when there is none.
    ///
    /// Archiving an archived conversation has no edge; callers treat it as a
    /// no-op rather than an error.
    pub fn apply(self, action: WorkflowAction) -> Option<ConversationStatus> {
        use ConversationStatus::*;
        use WorkflowAction::*;

        match (self, action) {
            (Active, SchedulePickup) => Some(Scheduled),
            (Scheduled, ConfirmDonation) => Some(Completed),
            (Active, RejectProposal) => Some(Rejected),
            (Archived, Archive) => None,
            (_, Archive) => Some(Archived),
            _ => None,
        }
    }

    pub fn can(self, action: WorkflowAction) -> bool {
        self.apply(action).is_some()
    }

    /// Actions whose affordance should be enabled in this status.
    pub fn available_actions(self) -> Vec<WorkflowAction> {
        WorkflowAction::iter().filter(|a| self.can(*a)).collect()
    }

    /// Completed, rejected and archived accept nothing but archiving.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ConversationStatus::Completed | ConversationStatus::Rejected | ConversationStatus::Archived
        )
    }

    /// Badge label shown in the inbox.
    pub fn label(self) -> &'static str {
        match self {
            ConversationStatus::Active => "Ativo",
            ConversationStatus::Scheduled => "Agendado",
            ConversationStatus::Completed => "Concluído",
            ConversationStatus::Rejected => "Rejeitado",
            ConversationStatus::Archived => "Arquivado",
        }
    }

    pub fn all() -> impl Iterator<Item = ConversationStatus> {
        ConversationStatus::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::ConversationStatus::*;
    use super::WorkflowAction::*;
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_happy_path() {
        assert_eq!(Active.apply(SchedulePickup), Some(Scheduled));
        assert_eq!(Scheduled.apply(ConfirmDonation), Some(Completed));
        assert_eq!(Active.apply(RejectProposal), Some(Rejected));
    }

    #[test]
    fn test_archive_from_any_non_archived() {
        for status in [Active, Scheduled, Completed, Rejected] {
            assert_eq!(status.apply(Archive), Some(Archived));
        }
        assert_eq!(Archived.apply(Archive), None);
    }

    #[test]
    fn test_no_edges_out_of_terminal_states_except_archive() {
        for status in [Completed, Rejected, Archived] {
            assert!(status.is_terminal());
            for action in [SchedulePickup, ConfirmDonation, RejectProposal] {
                assert_eq!(status.apply(action), None, "{status} -> {action}");
            }
        }
    }

    #[test]
    fn test_invalid_non_terminal_edges() {
        assert_eq!(Active.apply(ConfirmDonation), None);
        assert_eq!(Scheduled.apply(SchedulePickup), None);
        assert_eq!(Scheduled.apply(RejectProposal), None);
    }

    #[test]
    fn test_available_actions() {
        assert_eq!(
            Active.available_actions(),
            vec![SchedulePickup, RejectProposal, Archive]
        );
        assert_eq!(Scheduled.available_actions(), vec![ConfirmDonation, Archive]);
        assert_eq!(Completed.available_actions(), vec![Archive]);
        assert!(Archived.available_actions().is_empty());
    }

    #[test]
    fn test_target_matches_graph() {
        for action in WorkflowAction::iter() {
            let from = if action == ConfirmDonation { Scheduled } else { Active };
            assert_eq!(from.apply(action), Some(action.target()));
        }
    }

    #[test]
    fn test_string_forms() {
        assert_eq!(Scheduled.to_string(), "scheduled");
        assert_eq!(ConversationStatus::from_str("archived").unwrap(), Archived);
        assert_eq!(serde_json::to_string(&Completed).unwrap(), "\"completed\"");
        assert_eq!(SchedulePickup.endpoint(), "schedule");
        assert_eq!(SchedulePickup.to_string(), SchedulePickup.label());
    }
}
