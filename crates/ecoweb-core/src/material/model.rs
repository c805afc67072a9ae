//! Material listing domain model.

use crate::serde_util::{id_string, lenient_f64};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Lifecycle of a listing, maintained independently of any conversation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum MaterialStatus {
    Publicado,
    #[serde(rename = "Em Negociação")]
    #[strum(serialize = "Em Negociação")]
    EmNegociacao,
    Pausado,
    Doado,
}

/// Explicit status transition requested from the materials list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MaterialStatusChange {
    #[strum(to_string = "publish material")]
    Publish,
    #[strum(to_string = "pause material")]
    Pause,
    #[strum(to_string = "mark material as donated")]
    MarkDonated,
}

impl MaterialStatusChange {
    pub fn label(self) -> &'static str {
        match self {
            MaterialStatusChange::Publish => "publish material",
            MaterialStatusChange::Pause => "pause material",
            MaterialStatusChange::MarkDonated => "mark material as donated",
        }
    }
}

impl MaterialStatus {
    /// Follows a status change, or `None` when it does not apply.
    ///
    /// ```text
    /// Pausado --publish--> Publicado
    /// Publicado --pause--> Pausado
    /// {Publicado, Em Negociação, Pausado} --markDonated--> Doado
    /// ```
    pub fn apply(self, change: MaterialStatusChange) -> Option<MaterialStatus> {
        use MaterialStatus::*;
        use MaterialStatusChange::*;

        match (self, change) {
            (Pausado, Publish) => Some(Publicado),
            (Publicado, Pause) => Some(Pausado),
            (Doado, MarkDonated) => None,
            (_, MarkDonated) => Some(Doado),
            _ => None,
        }
    }

    pub fn all() -> impl Iterator<Item = MaterialStatus> {
        MaterialStatus::iter()
    }

    /// Value of the `status` filter in listing queries.
    pub fn query_value(self) -> &'static str {
        match self {
            MaterialStatus::Publicado => "publicado",
            MaterialStatus::EmNegociacao => "em-negociacao",
            MaterialStatus::Pausado => "pausado",
            MaterialStatus::Doado => "doado",
        }
    }

    /// Accepts either the display name or the query value.
    pub fn parse_lenient(value: &str) -> Option<MaterialStatus> {
        let value = value.trim();
        MaterialStatus::all()
            .find(|s| s.to_string() == value || s.query_value().eq_ignore_ascii_case(value))
    }
}

/// Fixed category list offered by the listing form.
pub const MATERIAL_CATEGORIES: [&str; 9] = [
    "Madeira",
    "Plástico",
    "Metal",
    "Tecido",
    "Eletrônicos",
    "Papel",
    "Vidro",
    "Borracha",
    "Outros",
];

/// Units of measure offered by the listing form.
pub const UNITS_OF_MEASURE: [&str; 8] = [
    "kg", "ton", "peças", "metros", "m²", "m³", "litros", "unidades",
];

/// A listed item a company offers for donation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub quantity: f64,
    #[serde(default)]
    pub unit_of_measure: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub instructions: String,
    pub status: MaterialStatus,
    #[serde(default)]
    pub fotos: Vec<String>,
    /// Number of interested parties, when the listing endpoint reports it.
    #[serde(default, rename = "interessados")]
    pub interested_count: u32,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Material {
    /// `"120 kg"`, dropping a trailing `.0`.
    pub fn quantity_label(&self) -> String {
        if self.quantity.fract() == 0.0 {
            format!("{} {}", self.quantity as i64, self.unit_of_measure)
        } else {
            format!("{} {}", self.quantity, self.unit_of_measure)
        }
    }
}

/// Listing query: free-text search over name/category plus a status filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialQuery {
    pub search: Option<String>,
    pub status: Option<MaterialStatus>,
}

#[cfg(test)]
mod tests {
    use super::MaterialStatus::*;
    use super::MaterialStatusChange::*;
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_transitions() {
        assert_eq!(Pausado.apply(Publish), Some(Publicado));
        assert_eq!(Publicado.apply(Pause), Some(Pausado));
        assert_eq!(Publicado.apply(Publish), None);
        assert_eq!(EmNegociacao.apply(Pause), None);
        for status in [Publicado, EmNegociacao, Pausado] {
            assert_eq!(status.apply(MarkDonated), Some(Doado));
        }
        assert_eq!(Doado.apply(MarkDonated), None);
        assert_eq!(Doado.apply(Publish), None);
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&EmNegociacao).unwrap(),
            "\"Em Negociação\""
        );
        assert_eq!(MaterialStatus::from_str("Em Negociação").unwrap(), EmNegociacao);
        assert_eq!(Doado.to_string(), "Doado");
    }

    #[test]
    fn test_status_query_values() {
        assert_eq!(Publicado.query_value(), "publicado");
        assert_eq!(EmNegociacao.query_value(), "em-negociacao");
        assert_eq!(MaterialStatus::parse_lenient("pausado"), Some(Pausado));
        assert_eq!(MaterialStatus::parse_lenient("Em Negociação"), Some(EmNegociacao));
        assert_eq!(MaterialStatus::parse_lenient("vendido"), None);
    }

    #[test]
    fn test_decode_material_with_numeric_id() {
        let raw = r#"{
            "id": 3,
            "name": "Paletes",
            "category": "Madeira",
            "description": "Paletes PBR",
            "quantity": "40",
            "unitOfMeasure": "peças",
            "location": "São Paulo",
            "instructions": "Retirar pela doca 2",
            "status": "Publicado",
            "fotos": ["/img/1.png"],
            "interessados": 2
        }"#;
        let material: Material = serde_json::from_str(raw).unwrap();
        assert_eq!(material.id, "3");
        assert_eq!(material.quantity, 40.0);
        assert_eq!(material.quantity_label(), "40 peças");
        assert_eq!(material.interested_count, 2);
        assert_eq!(material.updated_at, None);
    }
}
