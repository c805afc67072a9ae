//! ReportApi over REST.

use crate::response::{OperationClass, decode_required};
use crate::rest_client::RestClient;
use async_trait::async_trait;
use ecoweb_core::Result;
use ecoweb_core::report::{ReportApi, ReportData, ReportPeriod};
use ecoweb_core::session::SessionToken;
use reqwest::Method;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ExportBody {
    periodo: ReportPeriod,
}

#[async_trait]
impl ReportApi for RestClient {
    async fn fetch_report(&self, token: &SessionToken, period: ReportPeriod) -> Result<ReportData> {
        let class = OperationClass::Fetch;
        let request = self.request(Method::GET, self.endpoints().report(period), Some(token));
        let body = self.dispatch_text(request, class).await?;
        decode_required(&body, class)
    }

    async fn export_report(&self, token: &SessionToken, period: ReportPeriod) -> Result<Vec<u8>> {
        let class = OperationClass::Action("export report");
        let (builder, request_id) =
            self.request(Method::POST, self.endpoints().report_export(), Some(token));
        let response = self
            .dispatch((builder.json(&ExportBody { periodo: period }), request_id), class)
            .await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| class.error(format!("Failed to read export: {}", e)))?;
        if bytes.is_empty() {
            return Err(class.error("Falha na exportação"));
        }
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_body() {
        let body = ExportBody {
            periodo: ReportPeriod::UltimoSemestre,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"periodo":"ultimo-semestre"}"#
        );
    }
}
