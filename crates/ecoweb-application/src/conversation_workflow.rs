//! Conversation Workflow Controller - the inbox use case.
//!
//! Holds the company's conversations as last confirmed by the backend and
//! drives replies and workflow transitions through [`ConversationApi`].
//!
//! # Rules
//!
//! - Local state changes only after the backend confirms. There is no
//!   optimistic append or status flip.
//! - A transition with no edge from the current status is refused locally
//!   (`InvalidTransition`) and never reaches the network. Archiving an
//!   archived conversation is a successful no-op.
//! - At most one mutation per conversation is pending at a time; a second one
//!   fails with `InFlight`.
//! - After [`unmount`](ConversationWorkflowController::unmount) responses
//!   still return to the caller but are no longer applied.
//! - Every reportable failure produces an error notification and leaves the
//!   held state as it was.

use crate::notifications::toasts;
use crate::session_manager::SessionManager;
use ecoweb_core::conversation::{
    Conversation, ConversationApi, ConversationFilter, ConversationStatus, InboxView, Message,
    ReplyContent, WorkflowAction,
};
use ecoweb_core::notification::{Notification, Notifier};
use ecoweb_core::session::SessionToken;
use ecoweb_core::{EcowebError, Result};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct InboxState {
    /// Server order.
    conversations: Vec<Conversation>,
    selected: Option<String>,
    filter: ConversationFilter,
}

impl InboxState {
    fn find(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| c.id == id)
    }

    fn upsert(&mut self, conversation: Conversation) {
        match self.find_mut(&conversation.id) {
            Some(slot) => *slot = conversation,
            None => self.conversations.push(conversation),
        }
    }
}

/// Marks a conversation busy for the lifetime of one mutation.
struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<String>>,
    id: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

pub struct ConversationWorkflowController {
    api: Arc<dyn ConversationApi>,
    session: Arc<SessionManager>,
    notifier: Arc<dyn Notifier>,
    state: RwLock<InboxState>,
    in_flight: Mutex<HashSet<String>>,
    mounted: AtomicBool,
}

impl ConversationWorkflowController {
    pub fn new(
        api: Arc<dyn ConversationApi>,
        session: Arc<SessionManager>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            state: RwLock::new(InboxState::default()),
            in_flight: Mutex::new(HashSet::new()),
            mounted: AtomicBool::new(true),
        }
    }

    // ============================================================================
    // Loading
    // ============================================================================

    /// Replaces the held list with the backend's, scoped by `filter`.
    ///
    /// On failure the previous list is kept.
    pub async fn fetch_conversations(
        &self,
        filter: ConversationFilter,
    ) -> Result<Vec<Conversation>> {
        let token = self.token().await?;
        let conversations = self
            .api
            .list_conversations(&token, &filter)
            .await
            .map_err(|e| self.report(e, toasts::conversations_failed()))?;

        tracing::debug!(
            "[Inbox] Fetched {} conversation(s) (material filter: {:?})",
            conversations.len(),
            filter.material_id
        );
        if !self.is_mounted() {
            tracing::debug!("[Inbox] Unmounted, not applying fetched list");
            return Ok(conversations);
        }

        let mut state = self.state.write().await;
        state.conversations = conversations.clone();
        state.filter = filter;
        Ok(conversations)
    }

    /// Loads one conversation with its full history and selects it.
    pub async fn open_conversation(&self, id: &str) -> Result<Conversation> {
        let token = self.token().await?;
        let conversation = self
            .api
            .get_conversation(&token, id)
            .await
            .map_err(|e| self.report(e, toasts::conversation_failed()))?;

        if self.is_mounted() {
            let mut state = self.state.write().await;
            state.upsert(conversation.clone());
            state.selected = Some(id.to_string());
        }
        Ok(conversation)
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Sends a reply. Blank text is refused locally.
    ///
    /// The message is appended only once the backend echoes it back.
    pub async fn send_message(&self, id: &str, content: &str) -> Result<Message> {
        let reply = ReplyContent::parse(content)?;
        let _guard = self.begin(id)?;
        let token = self.token().await?;

        let message = self
            .api
            .reply(&token, id, &reply)
            .await
            .map_err(|e| self.report(e, toasts::message_failed()))?;

        if self.is_mounted() {
            let mut state = self.state.write().await;
            match state.find_mut(id) {
                Some(conversation) => conversation.push_message(message.clone()),
                None => tracing::debug!("[Inbox] Reply to unlisted conversation {}", id),
            }
        } else {
            tracing::debug!("[Inbox] Unmounted, not applying reply to {}", id);
        }

        self.notifier.notify(toasts::message_sent());
        Ok(message)
    }

    pub async fn schedule_pickup(&self, id: &str) -> Result<Conversation> {
        self.run_workflow(id, WorkflowAction::SchedulePickup).await
    }

    pub async fn confirm_donation(&self, id: &str) -> Result<Conversation> {
        self.run_workflow(id, WorkflowAction::ConfirmDonation).await
    }

    pub async fn reject_proposal(&self, id: &str) -> Result<Conversation> {
        self.run_workflow(id, WorkflowAction::RejectProposal).await
    }

    pub async fn archive_conversation(&self, id: &str) -> Result<Conversation> {
        self.run_workflow(id, WorkflowAction::Archive).await
    }

    /// Runs `action` on a held conversation.
    pub async fn run_workflow(&self, id: &str, action: WorkflowAction) -> Result<Conversation> {
        let current = match self.get(id).await {
            Some(conversation) => conversation,
            None => {
                let err = EcowebError::not_found("conversation", id);
                return Err(self.report(err, toasts::conversation_failed()));
            }
        };

        if current.status == ConversationStatus::Archived && action == WorkflowAction::Archive {
            tracing::debug!("[Inbox] {} is already archived", id);
            return Ok(current);
        }
        if !current.status.can(action) {
            let err = EcowebError::InvalidTransition {
                from: current.status.to_string(),
                action: action.label(),
            };
            return Err(self.report(err, toasts::action_unavailable(current.status.label())));
        }

        let _guard = self.begin(id)?;
        let token = self.token().await?;

        tracing::info!("[Inbox] {} on {} (status {})", action, id, current.status);
        let returned = self
            .api
            .transition(&token, id, action)
            .await
            .map_err(|e| self.report(e, toasts::workflow_failed(action)))?;

        let updated = if self.is_mounted() {
            let mut state = self.state.write().await;
            match (returned, state.find_mut(id)) {
                (Some(record), Some(slot)) => {
                    *slot = record.clone();
                    record
                }
                (Some(record), None) => record,
                (None, Some(slot)) => {
                    slot.status = action.target();
                    slot.clone()
                }
                (None, None) => with_status(current, action.target()),
            }
        } else {
            tracing::debug!("[Inbox] Unmounted, not applying {} on {}", action, id);
            returned.unwrap_or_else(|| with_status(current, action.target()))
        };

        self.notifier.notify(toasts::workflow_succeeded(action));
        Ok(updated)
    }

    // ============================================================================
    // Views
    // ============================================================================

    /// Every held conversation, in server order.
    pub async fn conversations(&self) -> Vec<Conversation> {
        self.state.read().await.conversations.clone()
    }

    /// Conversations in `view` within the active material filter.
    pub async fn visible(&self, view: InboxView) -> Vec<Conversation> {
        let state = self.state.read().await;
        state
            .conversations
            .iter()
            .filter(|c| state.filter.matches(c) && view.matches(c))
            .cloned()
            .collect()
    }

    /// Unread messages across the active material filter.
    pub async fn unread_total(&self) -> u32 {
        let state = self.state.read().await;
        state
            .conversations
            .iter()
            .filter(|c| state.filter.matches(c))
            .map(|c| c.unread_count)
            .sum()
    }

    pub async fn get(&self, id: &str) -> Option<Conversation> {
        self.state.read().await.find(id).cloned()
    }

    pub async fn select(&self, id: Option<&str>) {
        self.state.write().await.selected = id.map(str::to_string);
    }

    pub async fn selected(&self) -> Option<Conversation> {
        let state = self.state.read().await;
        state.selected.as_deref().and_then(|id| state.find(id)).cloned()
    }

    pub async fn filter(&self) -> ConversationFilter {
        self.state.read().await.filter.clone()
    }

    pub fn is_busy(&self, id: &str) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(id)
    }

    // ============================================================================
    // Lifecycle
    // ============================================================================

    /// Stops applying responses that arrive from now on.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
        tracing::debug!("[Inbox] Unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    // ============================================================================
    // Helpers
    // ============================================================================

    async fn token(&self) -> Result<SessionToken> {
        self.session
            .require_token()
            .await
            .map_err(|e| self.report(e, toasts::session_expired()))
    }

    fn begin(&self, id: &str) -> Result<InFlightGuard<'_>> {
        let mut set = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !set.insert(id.to_string()) {
            drop(set);
            let err = EcowebError::in_flight(format!("conversation {}", id));
            return Err(self.report(err, toasts::busy()));
        }
        Ok(InFlightGuard {
            set: &self.in_flight,
            id: id.to_string(),
        })
    }

    fn report(&self, err: EcowebError, notification: Notification) -> EcowebError {
        if err.is_reportable() {
            tracing::warn!("[Inbox] {}", err);
            self.notifier.notify(notification);
        }
        err
    }
}

fn with_status(mut conversation: Conversation, status: ConversationStatus) -> Conversation {
    conversation.status = status;
    conversation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        FakeDonationApi, MemoryTokenStore, RecordingNavigator, RecordingNotifier, conversation,
    };
    use ecoweb_core::config::SessionSettings;
    use ecoweb_core::session::Credentials;

    struct Harness {
        api: Arc<FakeDonationApi>,
        notifier: Arc<RecordingNotifier>,
        session: Arc<SessionManager>,
        inbox: ConversationWorkflowController,
    }

    async fn harness() -> Harness {
        let api = Arc::new(FakeDonationApi::new());
        api.add_account("empresa@eco.com", "senha-forte", "tok");
        api.add_conversation(conversation("c1", "m1", ConversationStatus::Active));
        api.add_conversation(conversation("c2", "m2", ConversationStatus::Scheduled));
        api.add_conversation(conversation("c3", "m1", ConversationStatus::Archived));

        let session = Arc::new(SessionManager::new(
            api.clone(),
            Arc::new(MemoryTokenStore::new()),
            Arc::new(RecordingNavigator::new()),
            SessionSettings::default(),
        ));
        session.initialize().await;
        session
            .login(&Credentials {
                email_or_cnpj: "empresa@eco.com".to_string(),
                password: "senha-forte".to_string(),
            })
            .await
            .unwrap();

        let notifier = Arc::new(RecordingNotifier::new());
        let inbox = ConversationWorkflowController::new(api.clone(), session.clone(), notifier.clone());
        Harness {
            api,
            notifier,
            session,
            inbox,
        }
    }

    #[tokio::test]
    async fn test_fetch_keeps_server_order_and_views() {
        let h = harness().await;
        h.inbox.fetch_conversations(ConversationFilter::all()).await.unwrap();

        let ids: Vec<String> = h.inbox.conversations().await.into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);

        assert_eq!(h.inbox.visible(InboxView::All).await.len(), 2);
        assert_eq!(h.inbox.visible(InboxView::Archived).await.len(), 1);
        assert_eq!(h.inbox.visible(InboxView::Unread).await.len(), 3);
        assert_eq!(h.inbox.unread_total().await, 3);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_list() {
        let h = harness().await;
        h.inbox.fetch_conversations(ConversationFilter::all()).await.unwrap();

        h.api.fail("list_conversations");
        let err = h
            .inbox
            .fetch_conversations(ConversationFilter::for_material("m2"))
            .await
            .unwrap_err();
        assert!(err.is_fetch());
        assert_eq!(h.inbox.conversations().await.len(), 3);
        assert_eq!(h.inbox.filter().await, ConversationFilter::all());
        assert_eq!(h.notifier.errors().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_reply_never_reaches_backend() {
        let h = harness().await;
        h.inbox.fetch_conversations(ConversationFilter::all()).await.unwrap();
        let calls = h.api.calls().len();

        for blank in ["", "   ", "\n\t"] {
            let err = h.inbox.send_message("c1", blank).await.unwrap_err();
            assert!(err.is_validation());
        }
        assert_eq!(h.api.calls().len(), calls);
        assert_eq!(h.inbox.get("c1").await.unwrap().messages.len(), 1);
        assert!(h.notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_reply_is_appended_after_echo() {
        let h = harness().await;
        h.inbox.fetch_conversations(ConversationFilter::all()).await.unwrap();

        let message = h.inbox.send_message("c1", "Podemos retirar amanhã").await.unwrap();
        let c1 = h.inbox.get("c1").await.unwrap();
        assert_eq!(c1.messages.len(), 2);
        assert_eq!(c1.messages[1], message);
        assert_eq!(c1.last_message, "Podemos retirar amanhã");
        assert_eq!(c1.last_message_time, message.timestamp);
    }

    #[tokio::test]
    async fn test_failed_reply_leaves_history_untouched() {
        let h = harness().await;
        h.inbox.fetch_conversations(ConversationFilter::all()).await.unwrap();
        h.api.fail("reply");

        let err = h.inbox.send_message("c1", "oi").await.unwrap_err();
        assert!(err.is_action());
        assert_eq!(h.inbox.get("c1").await.unwrap().messages.len(), 1);
        assert_eq!(h.notifier.last().unwrap().description, "Erro ao enviar mensagem");
        assert!(!h.inbox.is_busy("c1"));
    }

    #[tokio::test]
    async fn test_invalid_transition_is_refused_locally() {
        let h = harness().await;
        h.inbox.fetch_conversations(ConversationFilter::all()).await.unwrap();

        let err = h.inbox.confirm_donation("c1").await.unwrap_err();
        assert_eq!(
            err,
            EcowebError::InvalidTransition {
                from: "active".to_string(),
                action: "confirm donation",
            }
        );
        assert_eq!(h.api.call_count("transition"), 0);
        assert_eq!(h.notifier.errors().len(), 1);
    }

    #[tokio::test]
    async fn test_archiving_archived_is_a_noop() {
        let h = harness().await;
        h.inbox.fetch_conversations(ConversationFilter::all()).await.unwrap();

        let conversation = h.inbox.archive_conversation("c3").await.unwrap();
        assert_eq!(conversation.status, ConversationStatus::Archived);
        assert_eq!(h.api.call_count("transition"), 0);
        assert!(h.notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_status_follows_returned_record() {
        let h = harness().await;
        h.api.echo_records(true);
        h.inbox.fetch_conversations(ConversationFilter::all()).await.unwrap();

        let updated = h.inbox.confirm_donation("c2").await.unwrap();
        assert_eq!(updated, h.api.stored_conversation("c2").unwrap());
        assert_eq!(
            h.inbox.get("c2").await.unwrap().status,
            ConversationStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_failed_transition_keeps_status() {
        let h = harness().await;
        h.inbox.fetch_conversations(ConversationFilter::all()).await.unwrap();
        h.api.fail("transition");

        let err = h.inbox.schedule_pickup("c1").await.unwrap_err();
        assert!(err.is_action());
        assert_eq!(h.inbox.get("c1").await.unwrap().status, ConversationStatus::Active);
        assert_eq!(h.notifier.last().unwrap().description, "Erro ao agendar coleta");
    }

    #[tokio::test]
    async fn test_unknown_conversation() {
        let h = harness().await;
        let err = h.inbox.schedule_pickup("nope").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(h.api.call_count("transition"), 0);
    }

    #[tokio::test]
    async fn test_second_mutation_while_pending_is_rejected() {
        let h = harness().await;
        h.inbox.fetch_conversations(ConversationFilter::all()).await.unwrap();
        let calls = h.api.calls().len();
        let gate = h.api.hold_next_request();

        let (first, second) = tokio::join!(h.inbox.schedule_pickup("c1"), async {
            h.api.wait_for_calls(calls + 1).await;
            assert!(h.inbox.is_busy("c1"));
            let second = h.inbox.reject_proposal("c1").await;
            gate.notify_one();
            second
        });

        assert_eq!(first.unwrap().status, ConversationStatus::Scheduled);
        assert!(second.unwrap_err().is_in_flight());
        assert_eq!(h.api.call_count("transition"), 1);
        assert!(!h.inbox.is_busy("c1"));
    }

    #[tokio::test]
    async fn test_responses_after_unmount_are_not_applied() {
        let h = harness().await;
        h.inbox.fetch_conversations(ConversationFilter::all()).await.unwrap();
        let calls = h.api.calls().len();
        let gate = h.api.hold_next_request();

        let (result, _) = tokio::join!(h.inbox.schedule_pickup("c1"), async {
            h.api.wait_for_calls(calls + 1).await;
            h.inbox.unmount();
            gate.notify_one();
        });

        assert_eq!(result.unwrap().status, ConversationStatus::Scheduled);
        assert_eq!(h.inbox.get("c1").await.unwrap().status, ConversationStatus::Active);
    }

    #[tokio::test]
    async fn test_logged_out_actions_report_session_expiry() {
        let h = harness().await;
        h.session.logout().await;

        let err = h
            .inbox
            .fetch_conversations(ConversationFilter::all())
            .await
            .unwrap_err();
        assert!(err.is_auth());
        assert_eq!(h.notifier.last().unwrap().title, "Sessão expirada");
        assert_eq!(h.api.call_count("list_conversations"), 0);
    }

    #[tokio::test]
    async fn test_open_conversation_selects_it() {
        let h = harness().await;
        let opened = h.inbox.open_conversation("c2").await.unwrap();
        assert_eq!(h.inbox.selected().await, Some(opened));

        h.api.fail("get_conversation");
        assert!(h.inbox.open_conversation("c1").await.is_err());
        assert_eq!(h.inbox.selected().await.unwrap().id, "c2");
    }
}
