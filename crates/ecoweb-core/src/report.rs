//! Impact report model.

use crate::error::Result;
use crate::session::SessionToken;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Reporting window offered by the reports view.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ReportPeriod {
    #[default]
    UltimoTrimestre,
    UltimoSemestre,
    #[serde(rename = "ano-2025")]
    #[strum(serialize = "ano-2025")]
    Ano2025,
    #[serde(rename = "ano-2024")]
    #[strum(serialize = "ano-2024")]
    Ano2024,
    Todos,
}

impl ReportPeriod {
    pub fn label(self) -> &'static str {
        match self {
            ReportPeriod::UltimoTrimestre => "Último Trimestre",
            ReportPeriod::UltimoSemestre => "Último Semestre",
            ReportPeriod::Ano2025 => "Ano de 2025",
            ReportPeriod::Ano2024 => "Ano de 2024",
            ReportPeriod::Todos => "Todo o Período",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryVolume {
    pub categoria: String,
    pub quantidade: f64,
    #[serde(default)]
    pub cor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyVolume {
    pub mes: String,
    pub volume: f64,
}

/// Aggregated donation impact for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub total_doado: f64,
    pub co2_evitado: f64,
    pub projetos_atendidos: u32,
    #[serde(default)]
    pub materiais_por_categoria: Vec<CategoryVolume>,
    #[serde(default)]
    pub volume_por_mes: Vec<MonthlyVolume>,
    pub periodo: String,
}

impl ReportData {
    /// Share of each category in the total, as (category, fraction) pairs.
    pub fn category_shares(&self) -> Vec<(String, f64)> {
        let total: f64 = self.materiais_por_categoria.iter().map(|c| c.quantidade).sum();
        if total <= 0.0 {
            return Vec::new();
        }
        self.materiais_por_categoria
            .iter()
            .map(|c| (c.categoria.clone(), c.quantidade / total))
            .collect()
    }
}

/// The backend's report endpoints.
#[async_trait]
pub trait ReportApi: Send + Sync {
    async fn fetch_report(&self, token: &SessionToken, period: ReportPeriod) -> Result<ReportData>;

    /// Returns the exported document bytes.
    async fn export_report(&self, token: &SessionToken, period: ReportPeriod) -> Result<Vec<u8>>;
}
