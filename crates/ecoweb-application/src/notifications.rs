//! Toast texts and the default notifier.

use ecoweb_core::EcowebError;
use ecoweb_core::conversation::WorkflowAction;
use ecoweb_core::notification::{Notification, NotificationLevel, Notifier};

/// Logs notifications instead of rendering them.
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => tracing::warn!(
                "[Notification] {}: {}",
                notification.title,
                notification.description
            ),
            NotificationLevel::Success | NotificationLevel::Info => tracing::info!(
                "[Notification] {}: {}",
                notification.title,
                notification.description
            ),
        }
    }
}

/// User-facing texts, in the product's language.
pub mod toasts {
    use super::*;

    const ERROR: &str = "Erro";
    const SUCCESS: &str = "Sucesso";

    pub fn session_expired() -> Notification {
        Notification::error("Sessão expirada", "Faça login novamente para continuar")
    }

    pub fn busy() -> Notification {
        Notification::error("Aguarde", "Já existe uma ação em andamento para esta conversa")
    }

    pub fn action_unavailable(from: &str) -> Notification {
        Notification::error(
            "Ação indisponível",
            format!("Esta ação não está disponível para conversas com status \"{}\"", from),
        )
    }

    pub fn conversations_failed() -> Notification {
        Notification::error(ERROR, "Não foi possível carregar as conversas")
    }

    pub fn conversation_failed() -> Notification {
        Notification::error(ERROR, "Erro ao carregar conversa")
    }

    pub fn message_sent() -> Notification {
        Notification::info("Mensagem enviada", "Sua mensagem foi enviada com sucesso")
    }

    pub fn message_failed() -> Notification {
        Notification::error(ERROR, "Erro ao enviar mensagem")
    }

    pub fn workflow_succeeded(action: WorkflowAction) -> Notification {
        let (title, description) = match action {
            WorkflowAction::SchedulePickup => {
                ("Coleta agendada", "A coleta foi agendada com sucesso")
            }
            WorkflowAction::ConfirmDonation => {
                ("Doação confirmada", "A doação foi confirmada com sucesso")
            }
            WorkflowAction::RejectProposal => ("Proposta rejeitada", "A proposta foi rejeitada"),
            WorkflowAction::Archive => ("Conversa arquivada", "A conversa foi arquivada com sucesso"),
        };
        Notification::success(title, description)
    }

    pub fn workflow_failed(action: WorkflowAction) -> Notification {
        let description = match action {
            WorkflowAction::SchedulePickup => "Erro ao agendar coleta",
            WorkflowAction::ConfirmDonation => "Erro ao confirmar doação",
            WorkflowAction::RejectProposal => "Erro ao rejeitar proposta",
            WorkflowAction::Archive => "Erro ao arquivar conversa",
        };
        Notification::error(ERROR, description)
    }

    pub fn materials_failed() -> Notification {
        Notification::error(ERROR, "Não foi possível carregar os materiais")
    }

    pub fn material_failed() -> Notification {
        Notification::error(ERROR, "Erro ao carregar material")
    }

    pub fn material_created() -> Notification {
        Notification::success(SUCCESS, "Material publicado com sucesso!")
    }

    pub fn material_updated() -> Notification {
        Notification::success(SUCCESS, "Material atualizado com sucesso!")
    }

    pub fn material_deleted() -> Notification {
        Notification::success(SUCCESS, "Material excluído com sucesso!")
    }

    /// `status` is the wire name of the new status, e.g. "Pausado".
    pub fn material_status_changed(status: &str) -> Notification {
        Notification::success(
            SUCCESS,
            format!("Material {} com sucesso!", status.to_lowercase()),
        )
    }

    /// Mutation failure: the backend's message when it sent one, else `fallback`.
    pub fn material_action_failed(err: &EcowebError, fallback: &str) -> Notification {
        let description = match err {
            EcowebError::Action { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        };
        Notification::error(ERROR, description)
    }

    pub fn material_change_unavailable(status: &str) -> Notification {
        Notification::error(
            "Ação indisponível",
            format!("Esta ação não está disponível para materiais com status \"{}\"", status),
        )
    }

    pub fn dashboard_failed() -> Notification {
        Notification::error(ERROR, "Não foi possível carregar o painel")
    }

    pub fn report_failed() -> Notification {
        Notification::error(ERROR, "Não foi possível carregar os dados do relatório")
    }

    pub fn report_exported() -> Notification {
        Notification::success(SUCCESS, "Relatório exportado com sucesso!")
    }

    pub fn report_export_failed() -> Notification {
        Notification::error(ERROR, "Não foi possível exportar o relatório")
    }
}
