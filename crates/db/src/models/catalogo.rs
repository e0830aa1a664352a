//! Row shape shared by the simple catalog tables.
//!
//! `estados_incidencias`, `estados_pacientes`, `valoraciones_pacientes`,
//! and `parentescos` are structurally identical (id, nombre, descripcion,
//! soft delete, timestamps), so one model covers all four; the repository
//! is parameterized by table name.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ugus_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from any of the simple catalog tables.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Catalogo {
    pub id: DbId,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// DTO for creating a catalog entry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCatalogo {
    #[validate(length(min = 3, max = 250, message = "min:3|max:250"))]
    pub nombre: String,
    #[validate(length(max = 250, message = "max:250"))]
    pub descripcion: Option<String>,
}

/// DTO for updating a catalog entry. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCatalogo {
    #[validate(length(min = 3, max = 250, message = "min:3|max:250"))]
    pub nombre: Option<String>,
    #[validate(length(max = 250, message = "max:250"))]
    pub descripcion: Option<String>,
}
