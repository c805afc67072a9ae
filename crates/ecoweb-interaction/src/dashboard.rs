//! DashboardApi over REST.

use crate::response::{OperationClass, decode, decode_required};
use crate::rest_client::RestClient;
use async_trait::async_trait;
use ecoweb_core::Result;
use ecoweb_core::dashboard::{Activity, DashboardApi, DashboardStats, MaterialSummary};
use ecoweb_core::session::SessionToken;
use reqwest::Method;

#[async_trait]
impl DashboardApi for RestClient {
    async fn fetch_stats(&self, token: &SessionToken) -> Result<DashboardStats> {
        let class = OperationClass::Fetch;
        let request = self.request(Method::GET, self.endpoints().dashboard_stats(), Some(token));
        let body = self.dispatch_text(request, class).await?;
        decode_required(&body, class)
    }

    async fn recent_materials(
        &self,
        token: &SessionToken,
        limit: usize,
    ) -> Result<Vec<MaterialSummary>> {
        let class = OperationClass::Fetch;
        let request = self.request(
            Method::GET,
            self.endpoints().recent_materials(limit),
            Some(token),
        );
        let body = self.dispatch_text(request, class).await?;
        Ok(decode(&body, class)?.unwrap_or_default())
    }

    async fn recent_activities(&self, token: &SessionToken) -> Result<Vec<Activity>> {
        let class = OperationClass::Fetch;
        let request = self.request(Method::GET, self.endpoints().activities(), Some(token));
        let body = self.dispatch_text(request, class).await?;
        Ok(decode(&body, class)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_overview_payloads() {
        let stats: DashboardStats = decode_required(
            r#"{"success": true, "data": {"materiaisAtivos": 3, "propostasRecebidas": 1, "totalDoado": 2.5}}"#,
            OperationClass::Fetch,
        )
        .unwrap();
        assert_eq!(stats.materiais_ativos, 3);

        let materials: Vec<MaterialSummary> = decode(
            r#"{"success": true, "data": [{"id": 1, "nome": "Paletes", "status": "Publicado", "interessados": 2}]}"#,
            OperationClass::Fetch,
        )
        .unwrap()
        .unwrap_or_default();
        assert_eq!(materials[0].interessados, 2);

        let failed = decode::<Vec<Activity>>(
            r#"{"success": false, "error": "Não autorizado"}"#,
            OperationClass::Fetch,
        )
        .unwrap_err();
        assert!(failed.is_fetch());
    }
}
