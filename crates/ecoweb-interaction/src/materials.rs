//! MaterialApi over REST.

use crate::response::{OperationClass, decode, decode_ack, decode_required};
use crate::rest_client::RestClient;
use async_trait::async_trait;
use ecoweb_core::Result;
use ecoweb_core::material::{Material, MaterialApi, MaterialDraft, MaterialQuery, MaterialStatus};
use ecoweb_core::session::SessionToken;
use reqwest::Method;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct StatusBody {
    status: MaterialStatus,
}

#[async_trait]
impl MaterialApi for RestClient {
    async fn create_material(
        &self,
        token: &SessionToken,
        draft: &MaterialDraft,
    ) -> Result<Material> {
        let class = OperationClass::Action("create material");
        let (builder, request_id) =
            self.request(Method::POST, self.endpoints().materials(None), Some(token));
        let body = self
            .dispatch_text((builder.json(draft), request_id), class)
            .await?;
        decode_required(&body, class)
    }

    async fn list_materials(
        &self,
        token: &SessionToken,
        query: &MaterialQuery,
    ) -> Result<Vec<Material>> {
        let class = OperationClass::Fetch;
        let request = self.request(
            Method::GET,
            self.endpoints().materials(Some(query)),
            Some(token),
        );
        let body = self.dispatch_text(request, class).await?;
        Ok(decode(&body, class)?.unwrap_or_default())
    }

    async fn get_material(&self, token: &SessionToken, id: &str) -> Result<Material> {
        let class = OperationClass::Fetch;
        let request = self.request(Method::GET, self.endpoints().material(id), Some(token));
        let body = self.dispatch_text(request, class).await?;
        decode_required(&body, class)
    }

    async fn update_material(
        &self,
        token: &SessionToken,
        id: &str,
        draft: &MaterialDraft,
    ) -> Result<Material> {
        let class = OperationClass::Action("update material");
        let (builder, request_id) =
            self.request(Method::PUT, self.endpoints().material(id), Some(token));
        let body = self
            .dispatch_text((builder.json(draft), request_id), class)
            .await?;
        decode_required(&body, class)
    }

    async fn delete_material(&self, token: &SessionToken, id: &str) -> Result<()> {
        let class = OperationClass::Action("delete material");
        let request = self.request(Method::DELETE, self.endpoints().material(id), Some(token));
        let body = self.dispatch_text(request, class).await?;
        decode_ack(&body, class)
    }

    async fn change_material_status(
        &self,
        token: &SessionToken,
        id: &str,
        status: MaterialStatus,
    ) -> Result<()> {
        let class = OperationClass::Action("change material status");
        let (builder, request_id) = self.request(
            Method::PATCH,
            self.endpoints().material_status(id),
            Some(token),
        );
        let body = self
            .dispatch_text((builder.json(&StatusBody { status }), request_id), class)
            .await?;
        decode_ack(&body, class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_body_uses_wire_name() {
        let body = StatusBody {
            status: MaterialStatus::EmNegociacao,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"status":"Em Negociação"}"#
        );
    }

    #[test]
    fn test_list_accepts_enveloped_array() {
        let body = r#"{"success": true, "data": [
            {"id": 1, "name": "Paletes", "category": "Madeira", "quantity": 10, "status": "Publicado"}
        ]}"#;
        let materials: Vec<Material> = decode(body, OperationClass::Fetch).unwrap().unwrap();
        assert_eq!(materials[0].id, "1");
        assert_eq!(materials[0].status, MaterialStatus::Publicado);
    }
}
