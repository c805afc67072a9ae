//! Material listing form and its validation.

use super::model::{MATERIAL_CATEGORIES, MaterialStatus, UNITS_OF_MEASURE};
use crate::validation::{ValidationErrors, is_blank};
use serde::Serialize;

/// Largest accepted photo, in bytes (5 MiB).
pub const MAX_PHOTO_BYTES: u64 = 5 * 1024 * 1024;
/// Maximum photos per listing.
pub const MAX_PHOTOS: usize = 5;

/// A photo attached to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    /// A new local file to upload.
    Upload { file_name: String, size_bytes: u64 },
    /// A reference already stored by the backend (edit flow).
    Existing(String),
}

impl PhotoSource {
    /// Checks type (by file-name mime guess) and size of uploads.
    pub fn check(&self) -> Result<(), String> {
        match self {
            PhotoSource::Existing(_) => Ok(()),
            PhotoSource::Upload {
                file_name,
                size_bytes,
            } => {
                let is_image = mime_guess::from_path(file_name)
                    .first()
                    .is_some_and(|mime| mime.type_() == mime_guess::mime::IMAGE);
                if !is_image {
                    return Err(format!("{} não é uma imagem válida", file_name));
                }
                if *size_bytes > MAX_PHOTO_BYTES {
                    return Err(format!("{} é muito grande (máximo 5MB)", file_name));
                }
                Ok(())
            }
        }
    }

    /// Reference sent to the backend.
    pub fn reference(&self) -> &str {
        match self {
            PhotoSource::Upload { file_name, .. } => file_name,
            PhotoSource::Existing(reference) => reference,
        }
    }
}

/// Raw listing form, one string per input.
#[derive(Debug, Clone)]
pub struct MaterialForm {
    pub name: String,
    pub category: String,
    pub description: String,
    pub quantity: String,
    pub unit_of_measure: String,
    pub location: String,
    pub instructions: String,
    pub fotos: Vec<PhotoSource>,
}

impl Default for MaterialForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            description: String::new(),
            quantity: String::new(),
            unit_of_measure: "kg".to_string(),
            location: String::new(),
            instructions: String::new(),
            fotos: Vec::new(),
        }
    }
}

/// Listing payload that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDraft {
    pub name: String,
    pub category: String,
    pub description: String,
    pub quantity: f64,
    pub unit_of_measure: String,
    pub location: String,
    pub instructions: String,
    pub status: MaterialStatus,
    pub fotos: Vec<String>,
}

impl MaterialForm {
    /// Adds photos the way the picker does: invalid files are skipped and
    /// reported, the list is capped at [`MAX_PHOTOS`].
    pub fn attach_photos(&mut self, photos: Vec<PhotoSource>) -> Vec<String> {
        let mut rejected = Vec::new();
        for photo in photos {
            if let Err(reason) = photo.check() {
                rejected.push(reason);
                continue;
            }
            if self.fotos.len() < MAX_PHOTOS {
                self.fotos.push(photo);
            }
        }
        rejected
    }

    pub fn remove_photo(&mut self, index: usize) {
        if index < self.fotos.len() {
            self.fotos.remove(index);
        }
    }

    /// Validates every field; new listings start as `Publicado`.
    pub fn validate(&self) -> Result<MaterialDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if is_blank(&self.name) {
            errors.add("name", "Nome do material é obrigatório");
        }
        if is_blank(&self.category) {
            errors.add("category", "Categoria é obrigatória");
        } else if !MATERIAL_CATEGORIES.contains(&self.category.as_str()) {
            errors.add("category", "Categoria inválida");
        }
        if is_blank(&self.description) {
            errors.add("description", "Descrição é obrigatória");
        }

        let quantity = if is_blank(&self.quantity) {
            errors.add("quantity", "Quantidade é obrigatória");
            0.0
        } else {
            match self.quantity.trim().replace(',', ".").parse::<f64>() {
                Ok(q) if q > 0.0 && q.is_finite() => q,
                _ => {
                    errors.add("quantity", "Quantidade deve ser um número positivo");
                    0.0
                }
            }
        };

        if !UNITS_OF_MEASURE.contains(&self.unit_of_measure.as_str()) {
            errors.add("unitOfMeasure", "Unidade de medida inválida");
        }
        if is_blank(&self.location) {
            errors.add("location", "Endereço de retirada é obrigatório");
        }

        if self.fotos.is_empty() {
            errors.add("fotos", "Pelo menos uma foto é obrigatória");
        } else if self.fotos.len() > MAX_PHOTOS {
            errors.add("fotos", "Máximo de 5 fotos");
        } else if let Some(reason) = self.fotos.iter().find_map(|p| p.check().err()) {
            errors.add("fotos", reason);
        }

        errors.into_result(MaterialDraft {
            name: self.name.trim().to_string(),
            category: self.category.clone(),
            description: self.description.trim().to_string(),
            quantity,
            unit_of_measure: self.unit_of_measure.clone(),
            location: self.location.trim().to_string(),
            instructions: self.instructions.trim().to_string(),
            status: MaterialStatus::Publicado,
            fotos: self.fotos.iter().map(|p| p.reference().to_string()).collect(),
        })
    }
}
