//! Response decoding and error classification.
//!
//! Every request belongs to an [`OperationClass`] that decides which error
//! variant its failures surface as.

use ecoweb_core::api::{ApiErrorBody, ApiResponse};
use ecoweb_core::EcowebError;
use ecoweb_core::Result;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

pub(crate) const CONNECTION_ERROR: &str = "Erro na conexão com servidor";

/// Error class of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationClass {
    /// Login and registration.
    Auth,
    /// Reads.
    Fetch,
    /// Mutations, labelled for error values.
    Action(&'static str),
}

impl OperationClass {
    pub fn error(self, message: impl Into<String>) -> EcowebError {
        match self {
            OperationClass::Auth => EcowebError::auth(message),
            OperationClass::Fetch => EcowebError::fetch(message),
            OperationClass::Action(action) => EcowebError::action(action, message),
        }
    }
}

/// Message for a non-2xx response: the body's `error`/`message` when present.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    ApiErrorBody::message_from(body).unwrap_or_else(|| format!("HTTP {}", status))
}

/// Decodes an envelope or bare payload. An empty body decodes to `None`.
pub(crate) fn decode<T: DeserializeOwned>(body: &str, class: OperationClass) -> Result<Option<T>> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let response: ApiResponse<T> = serde_json::from_str(body)
        .map_err(|e| class.error(format!("Invalid response body: {}", e)))?;
    response.into_result().map_err(|message| class.error(message))
}

/// Like [`decode`], but a missing payload is an error.
pub(crate) fn decode_required<T: DeserializeOwned>(body: &str, class: OperationClass) -> Result<T> {
    decode(body, class)?.ok_or_else(|| class.error("Empty response body"))
}

/// Checks a response whose payload is not used, only its success flag.
pub(crate) fn decode_ack(body: &str, class: OperationClass) -> Result<()> {
    decode::<serde_json::Value>(body, class).map(|_| ())
}

/// Decodes a record the backend may or may not send back.
///
/// An unsuccessful envelope is still an error. A successful response without
/// a JSON object yields `None`; an object that isn't a `T` also yields `None`
/// but is logged.
pub(crate) fn decode_optional_record<T: DeserializeOwned>(
    body: &str,
    class: OperationClass,
) -> Result<Option<T>> {
    let Some(payload) = decode::<serde_json::Value>(body, class)? else {
        return Ok(None);
    };
    Ok(record_from_payload(payload).unwrap_or_else(|e| {
        tracing::warn!("[RestClient] Ignoring malformed record from {:?}: {}", class, e);
        None
    }))
}

fn record_from_payload<T: DeserializeOwned>(
    payload: serde_json::Value,
) -> std::result::Result<Option<T>, serde_json::Error> {
    if payload.is_object() {
        serde_json::from_value(payload).map(Some)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoweb_core::conversation::{Conversation, ConversationStatus, Message};

    const CONVERSATION: &str = r#"{
        "id": "c1",
        "interestedPartyName": "ONG Recicla",
        "interestedPartyType": "ong",
        "materialId": "m1",
        "materialName": "Paletes",
        "status": "scheduled"
    }"#;

    #[test]
    fn test_classes_map_to_variants() {
        assert!(OperationClass::Auth.error("x").is_auth());
        assert!(OperationClass::Fetch.error("x").is_fetch());
        assert_eq!(
            OperationClass::Action("send message").error("boom"),
            EcowebError::action("send message", "boom")
        );
    }

    #[test]
    fn test_error_message_prefers_body() {
        assert_eq!(
            error_message(StatusCode::UNAUTHORIZED, r#"{"message": "Credenciais inválidas"}"#),
            "Credenciais inválidas"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "<html>"),
            "HTTP 502 Bad Gateway"
        );
    }

    #[test]
    fn test_decode_envelope_and_bare() {
        let bare: Conversation = decode_required(CONVERSATION, OperationClass::Fetch).unwrap();
        assert_eq!(bare.status, ConversationStatus::Scheduled);

        let wrapped = format!(r#"{{"success": true, "data": {}}}"#, CONVERSATION);
        let enveloped: Conversation = decode_required(&wrapped, OperationClass::Fetch).unwrap();
        assert_eq!(enveloped, bare);
    }

    #[test]
    fn test_unsuccessful_envelope_uses_operation_class() {
        let body = r#"{"success": false, "error": "Conversa não encontrada"}"#;
        let err = decode::<Conversation>(body, OperationClass::Fetch).unwrap_err();
        assert_eq!(err, EcowebError::fetch("Conversa não encontrada"));

        let err = decode_ack(body, OperationClass::Action("delete material")).unwrap_err();
        assert!(err.is_action());
    }

    #[test]
    fn test_empty_and_garbage_bodies() {
        assert_eq!(decode::<Message>("  ", OperationClass::Fetch).unwrap(), None);
        assert!(decode_required::<Message>("", OperationClass::Action("send message")).is_err());
        assert!(decode::<Message>("not json", OperationClass::Fetch).unwrap_err().is_fetch());
    }

    #[test]
    fn test_optional_record() {
        let none = decode_optional_record::<Conversation>(
            r#"{"success": true, "message": "ok"}"#,
            OperationClass::Action("archive conversation"),
        )
        .unwrap();
        assert_eq!(none, None);

        let some = decode_optional_record::<Conversation>(
            CONVERSATION,
            OperationClass::Action("schedule pickup"),
        )
        .unwrap();
        assert_eq!(some.map(|c| c.status), Some(ConversationStatus::Scheduled));

        assert!(
            decode_optional_record::<Conversation>(
                r#"{"success": false}"#,
                OperationClass::Action("schedule pickup"),
            )
            .is_err()
        );
    }

    #[test]
    fn test_malformed_record_is_told_apart_from_no_record() {
        let malformed = record_from_payload::<Conversation>(serde_json::json!({"id": "c1"}));
        assert!(malformed.is_err());

        let scalar = record_from_payload::<Conversation>(serde_json::json!(true)).unwrap();
        assert_eq!(scalar, None);

        let none = decode_optional_record::<Conversation>(
            r#"{"success": true, "data": {"id": "c1"}}"#,
            OperationClass::Action("schedule pickup"),
        )
        .unwrap();
        assert_eq!(none, None);
    }
}
