//! AuthApi over REST.

use crate::response::{OperationClass, decode_ack, decode_required};
use crate::rest_client::RestClient;
use async_trait::async_trait;
use ecoweb_core::Result;
use ecoweb_core::company::CompanyRegistration;
use ecoweb_core::session::{AuthApi, Credentials, SessionToken};
use reqwest::Method;
use serde::Deserialize;

const LOGIN_FAILED: &str = "Falha no login";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Validates a decoded login payload.
fn token_from(response: LoginResponse) -> Result<SessionToken> {
    if response.token.trim().is_empty() {
        return Err(OperationClass::Auth.error(LOGIN_FAILED));
    }
    Ok(SessionToken::new(response.token))
}

#[async_trait]
impl AuthApi for RestClient {
    async fn login(&self, credentials: &Credentials) -> Result<SessionToken> {
        let class = OperationClass::Auth;
        let (builder, request_id) = self.request(Method::POST, self.endpoints().login(), None);
        let body = self
            .dispatch_text((builder.json(credentials), request_id), class)
            .await?;

        let response: LoginResponse = decode_required(&body, class)?;
        let token = token_from(response)?;
        tracing::info!("[AuthApi] Login succeeded for {}", credentials.email_or_cnpj);
        Ok(token)
    }

    async fn register_company(&self, company: &CompanyRegistration) -> Result<()> {
        let class = OperationClass::Auth;
        let (builder, request_id) = self.request(Method::POST, self.endpoints().register(), None);
        let body = self
            .dispatch_text((builder.json(company), request_id), class)
            .await?;

        decode_ack(&body, class)?;
        tracing::info!("[AuthApi] Registered company {}", company.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_payload_shapes() {
        let bare: LoginResponse =
            decode_required(r#"{"token": "abc"}"#, OperationClass::Auth).unwrap();
        assert_eq!(token_from(bare).unwrap(), SessionToken::new("abc"));

        let wrapped: LoginResponse = decode_required(
            r#"{"success": true, "data": {"token": "xyz"}}"#,
            OperationClass::Auth,
        )
        .unwrap();
        assert_eq!(token_from(wrapped).unwrap(), SessionToken::new("xyz"));
    }

    #[test]
    fn test_blank_token_is_an_auth_failure() {
        let err = token_from(LoginResponse {
            token: " ".to_string(),
        })
        .unwrap_err();
        assert!(err.is_auth());
    }

    #[test]
    fn test_missing_token_is_an_auth_failure() {
        let err = decode_required::<LoginResponse>(r#"{"user": 1}"#, OperationClass::Auth)
            .unwrap_err();
        assert!(err.is_auth());
    }
}
