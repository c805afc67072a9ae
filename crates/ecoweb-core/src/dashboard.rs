//! Dashboard overview: headline numbers, the newest listings and recent
//! activity.

use crate::error::Result;
use crate::material::MaterialStatus;
use crate::serde_util::{id_string, lenient_f64};
use crate::session::SessionToken;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Rows shown in each overview list.
pub const RECENT_LIMIT: usize = 5;

/// Headline metrics of the company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Listings currently published.
    #[serde(default)]
    pub materiais_ativos: u32,
    /// Contacts still waiting for an answer.
    #[serde(default)]
    pub propostas_recebidas: u32,
    /// Donated volume, in tons.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_doado: f64,
    #[serde(default)]
    pub total_materiais: u32,
    #[serde(default)]
    pub projetos_atendidos: u32,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub co2_evitado: f64,
}

/// Short form of a listing used by the overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSummary {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(alias = "name")]
    pub nome: String,
    pub status: MaterialStatus,
    #[serde(default)]
    pub interessados: u32,
    #[serde(default)]
    pub data_publicacao: Option<String>,
}

/// One entry of the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub mensagem: String,
    #[serde(default)]
    pub data: Option<String>,
}

/// Everything the overview shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardOverview {
    /// `None` when the metrics could not be loaded.
    pub stats: Option<DashboardStats>,
    pub active_materials: Vec<MaterialSummary>,
    pub activities: Vec<Activity>,
}

impl DashboardOverview {
    /// Drops donated listings and caps both lists at [`RECENT_LIMIT`].
    pub fn new(
        stats: Option<DashboardStats>,
        materials: Vec<MaterialSummary>,
        activities: Vec<Activity>,
    ) -> Self {
        Self {
            stats,
            active_materials: materials
                .into_iter()
                .filter(|m| m.status != MaterialStatus::Doado)
                .take(RECENT_LIMIT)
                .collect(),
            activities: activities.into_iter().take(RECENT_LIMIT).collect(),
        }
    }
}

/// The backend's overview endpoints.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn fetch_stats(&self, token: &SessionToken) -> Result<DashboardStats>;

    /// Newest active listings, at most `limit`.
    async fn recent_materials(
        &self,
        token: &SessionToken,
        limit: usize,
    ) -> Result<Vec<MaterialSummary>>;

    async fn recent_activities(&self, token: &SessionToken) -> Result<Vec<Activity>>;
}
