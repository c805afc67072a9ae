//! Response envelope used by the EcoWeb backend.
//!
//! Most endpoints answer `{ "success": bool, "data": ..., "error": "..." }`,
//! but some (conversation listings, login) send the payload bare. Both shapes
//! decode into [`ApiResponse`].

use serde::{Deserialize, Serialize};

const UNSUCCESSFUL: &str = "request was not successful";

/// The `{ success, data, error, message }` wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Returns the payload on success, or the backend's error text.
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self
                .error
                .or(self.message)
                .unwrap_or_else(|| UNSUCCESSFUL.to_string()))
        }
    }
}

/// Either an envelope or a bare payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Envelope(ApiEnvelope<T>),
    Bare(T),
}

impl<T> ApiResponse<T> {
    pub fn into_result(self) -> Result<Option<T>, String> {
        match self {
            ApiResponse::Envelope(envelope) => envelope.into_result(),
            ApiResponse::Bare(data) => Ok(Some(data)),
        }
    }
}

/// Error body of a non-2xx response: `{ "message": "..." }` or `{ "error": "..." }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Extracts the most specific message from a raw body, if it is JSON.
    pub fn message_from(body: &str) -> Option<String> {
        let parsed: ApiErrorBody = serde_json::from_str(body).ok()?;
        parsed.error.or(parsed.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Item {
        id: String,
    }

    #[test]
    fn test_envelope_success() {
        let raw = r#"{"success": true, "data": {"id": "a"}}"#;
        let resp: ApiResponse<Item> = serde_json::from_str(raw).unwrap();
        assert_eq!(
            resp.into_result().unwrap(),
            Some(Item {
                id: "a".to_string()
            })
        );
    }

    #[test]
    fn test_envelope_without_data() {
        let raw = r#"{"success": true, "message": "Arquivada"}"#;
        let resp: ApiResponse<Item> = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.into_result().unwrap(), None);
    }

    #[test]
    fn test_envelope_failure_prefers_error_field() {
        let raw = r#"{"success": false, "error": "Material não encontrado", "message": "other"}"#;
        let resp: ApiResponse<Item> = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.into_result().unwrap_err(), "Material não encontrado");
    }

    #[test]
    fn test_bare_array_payload() {
        let raw = r#"[{"id": "a"}, {"id": "b"}]"#;
        let resp: ApiResponse<Vec<Item>> = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.into_result().unwrap().unwrap().len(), 2);
    }

    #[test]
    fn test_error_body_message() {
        assert_eq!(
            ApiErrorBody::message_from(r#"{"message": "Falha no login"}"#),
            Some("Falha no login".to_string())
        );
        assert_eq!(ApiErrorBody::message_from("<html>"), None);
    }
}
