//! Material listings use case.
//!
//! Keeps the last listed materials and changes them only after the backend
//! confirms a mutation.

use crate::notifications::toasts;
use crate::session_manager::SessionManager;
use ecoweb_core::material::{
    Material, MaterialApi, MaterialForm, MaterialQuery, MaterialStatusChange,
};
use ecoweb_core::notification::{Notification, Notifier};
use ecoweb_core::session::SessionToken;
use ecoweb_core::{EcowebError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct MaterialService {
    api: Arc<dyn MaterialApi>,
    session: Arc<SessionManager>,
    notifier: Arc<dyn Notifier>,
    materials: RwLock<Vec<Material>>,
}

impl MaterialService {
    pub fn new(
        api: Arc<dyn MaterialApi>,
        session: Arc<SessionManager>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            materials: RwLock::new(Vec::new()),
        }
    }

    /// Validates and publishes a new listing.
    pub async fn create(&self, form: &MaterialForm) -> Result<Material> {
        let draft = form.validate()?;
        let token = self.token().await?;

        let created = self.api.create_material(&token, &draft).await.map_err(|e| {
            let toast = toasts::material_action_failed(&e, "Erro ao publicar material");
            self.report(e, toast)
        })?;

        tracing::info!("[MaterialService] Created material {} ({})", created.id, created.name);
        self.materials.write().await.push(created.clone());
        self.notifier.notify(toasts::material_created());
        Ok(created)
    }

    /// Lists the company's materials. On failure the previous list is kept.
    pub async fn list(&self, query: &MaterialQuery) -> Result<Vec<Material>> {
        let token = self.token().await?;
        let materials = self
            .api
            .list_materials(&token, query)
            .await
            .map_err(|e| self.report(e, toasts::materials_failed()))?;

        tracing::debug!("[MaterialService] Listed {} material(s)", materials.len());
        *self.materials.write().await = materials.clone();
        Ok(materials)
    }

    pub async fn get(&self, id: &str) -> Result<Material> {
        let token = self.token().await?;
        let material = self.fetch(&token, id).await?;
        self.replace_cached(material.clone()).await;
        Ok(material)
    }

    /// Replaces the listing's fields, keeping its current status.
    pub async fn update(&self, id: &str, form: &MaterialForm) -> Result<Material> {
        let mut draft = form.validate()?;
        let token = self.token().await?;
        draft.status = self.current(&token, id).await?.status;

        let updated = self.api.update_material(&token, id, &draft).await.map_err(|e| {
            let toast = toasts::material_action_failed(&e, "Erro ao atualizar material");
            self.report(e, toast)
        })?;

        self.replace_cached(updated.clone()).await;
        self.notifier.notify(toasts::material_updated());
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let token = self.token().await?;
        self.api.delete_material(&token, id).await.map_err(|e| {
            let toast = toasts::material_action_failed(&e, "Erro ao excluir material");
            self.report(e, toast)
        })?;

        tracing::info!("[MaterialService] Deleted material {}", id);
        self.materials.write().await.retain(|m| m.id != id);
        self.notifier.notify(toasts::material_deleted());
        Ok(())
    }

    /// Publishes, pauses or marks a listing as donated.
    ///
    /// A change that does not apply to the current status is refused without
    /// a network call.
    pub async fn change_status(&self, id: &str, change: MaterialStatusChange) -> Result<Material> {
        let token = self.token().await?;
        let mut material = self.current(&token, id).await?;

        let Some(next) = material.status.apply(change) else {
            let err = EcowebError::InvalidTransition {
                from: material.status.to_string(),
                action: change.label(),
            };
            let toast = toasts::material_change_unavailable(&material.status.to_string());
            return Err(self.report(err, toast));
        };

        self.api
            .change_material_status(&token, id, next)
            .await
            .map_err(|e| {
                let toast = toasts::material_action_failed(&e, "Erro ao alterar status do material");
                self.report(e, toast)
            })?;

        tracing::info!("[MaterialService] {} -> {} for {}", material.status, next, id);
        material.status = next;
        self.replace_cached(material.clone()).await;
        self.notifier
            .notify(toasts::material_status_changed(&next.to_string()));
        Ok(material)
    }

    /// The last listed materials, with confirmed changes applied.
    pub async fn materials(&self) -> Vec<Material> {
        self.materials.read().await.clone()
    }

    async fn token(&self) -> Result<SessionToken> {
        self.session
            .require_token()
            .await
            .map_err(|e| self.report(e, toasts::session_expired()))
    }

    async fn fetch(&self, token: &SessionToken, id: &str) -> Result<Material> {
        self.api
            .get_material(token, id)
            .await
            .map_err(|e| self.report(e, toasts::material_failed()))
    }

    /// Cached copy when listed, otherwise the backend's.
    async fn current(&self, token: &SessionToken, id: &str) -> Result<Material> {
        let cached = self
            .materials
            .read()
            .await
            .iter()
            .find(|m| m.id == id)
            .cloned();
        match cached {
            Some(material) => Ok(material),
            None => self.fetch(token, id).await,
        }
    }

    async fn replace_cached(&self, material: Material) {
        let mut materials = self.materials.write().await;
        if let Some(slot) = materials.iter_mut().find(|m| m.id == material.id) {
            *slot = material;
        }
    }

    fn report(&self, err: EcowebError, notification: Notification) -> EcowebError {
        if err.is_reportable() {
            tracing::warn!("[MaterialService] {}", err);
            self.notifier.notify(notification);
        }
        err
    }
}
