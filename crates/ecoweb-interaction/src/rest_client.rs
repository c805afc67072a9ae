//! RestClient - reqwest transport shared by every EcoWeb API port.
//!
//! The port implementations live next to it, one file per resource; this
//! module owns request dispatch, authentication headers and status checks.

use crate::endpoints::Endpoints;
use crate::response::{CONNECTION_ERROR, OperationClass, error_message};
use ecoweb_core::Result;
use ecoweb_core::config::ApiSettings;
use ecoweb_core::session::SessionToken;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use std::time::Duration;
use uuid::Uuid;

/// HTTP client for the EcoWeb backend.
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    endpoints: Endpoints,
    timeout: Duration,
}

impl RestClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            endpoints: Endpoints::new(base_url)?,
            timeout,
        })
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self> {
        Self::new(&settings.base_url, Duration::from_secs(settings.timeout_secs))
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Starts a request with the timeout, a fresh request id and, when given,
    /// the bearer token.
    pub(crate) fn request(
        &self,
        method: Method,
        url: Url,
        token: Option<&SessionToken>,
    ) -> (RequestBuilder, String) {
        let request_id = Uuid::new_v4().to_string();
        tracing::debug!("[RestClient] {} {} (request {})", method, url, request_id);

        let mut builder = self
            .client
            .request(method, url)
            .timeout(self.timeout)
            .header("X-Request-Id", request_id.as_str());
        if let Some(token) = token {
            builder = builder.header("Authorization", token.bearer());
        }
        (builder, request_id)
    }

    /// Sends the request and checks the status.
    ///
    /// Transport failures and non-2xx answers become errors of `class`.
    pub(crate) async fn dispatch(
        &self,
        (builder, request_id): (RequestBuilder, String),
        class: OperationClass,
    ) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("[RestClient] Request {} failed: {}", request_id, e);
            class.error(format!("{}: {}", CONNECTION_ERROR, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            tracing::warn!(
                "[RestClient] Request {} answered {}: {}",
                request_id,
                status,
                message
            );
            return Err(class.error(message));
        }

        Ok(response)
    }

    /// Sends the request and returns the body as text.
    pub(crate) async fn dispatch_text(
        &self,
        request: (RequestBuilder, String),
        class: OperationClass,
    ) -> Result<String> {
        let response = self.dispatch(request, class).await?;
        response
            .text()
            .await
            .map_err(|e| class.error(format!("Failed to read response body: {}", e)))
    }
}
