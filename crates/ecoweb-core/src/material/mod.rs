//! Material domain module.

mod form;
mod model;
mod repository;

pub use form::{MAX_PHOTO_BYTES, MAX_PHOTOS, MaterialDraft, MaterialForm, PhotoSource};
pub use model::{
    MATERIAL_CATEGORIES, Material, MaterialQuery, MaterialStatus, MaterialStatusChange,
    UNITS_OF_MEASURE,
};
pub use repository::MaterialApi;
