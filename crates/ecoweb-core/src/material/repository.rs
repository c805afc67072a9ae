//! Material API port.

use super::form::MaterialDraft;
use super::model::{Material, MaterialQuery, MaterialStatus};
use crate::error::Result;
use crate::session::SessionToken;
use async_trait::async_trait;

/// The backend's material resource. Reads fail with `Fetch`, mutations with `Action`.
#[async_trait]
pub trait MaterialApi: Send + Sync {
    async fn create_material(&self, token: &SessionToken, draft: &MaterialDraft)
    -> Result<Material>;

    async fn list_materials(&self, token: &SessionToken, query: &MaterialQuery)
    -> Result<Vec<Material>>;

    async fn get_material(&self, token: &SessionToken, id: &str) -> Result<Material>;

    async fn update_material(
        &self,
        token: &SessionToken,
        id: &str,
        draft: &MaterialDraft,
    ) -> Result<Material>;

    async fn delete_material(&self, token: &SessionToken, id: &str) -> Result<()>;

    async fn change_material_status(
        &self,
        token: &SessionToken,
        id: &str,
        status: MaterialStatus,
    ) -> Result<()>;
}
