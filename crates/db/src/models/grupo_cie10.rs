//! CIE10 diagnosis group entity model and DTOs.
//!
//! CIE10 is the Spanish-language name for ICD-10. Groups own categories,
//! categories own subcategories; children are rewritten as a set whenever
//! the parent is created or updated.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ugus_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `grupos_cie10` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GrupoCie10 {
    pub id: DbId,
    pub nombre: String,
    pub codigo: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// A row from the `categorias_cie10` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoriaCie10 {
    pub id: DbId,
    pub grupos_cie10_id: DbId,
    pub nombre: String,
    pub codigo: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// A row from the `subcategorias_cie10` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubCategoriaCie10 {
    pub id: DbId,
    pub categorias_cie10_id: DbId,
    pub nombre: String,
    pub codigo: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// A category enriched with its live subcategories.
#[derive(Debug, Clone, Serialize)]
pub struct CategoriaConSubcategorias {
    #[serde(flatten)]
    pub categoria: CategoriaCie10,
    pub subcategorias_cie10: Vec<SubCategoriaCie10>,
}

/// A group enriched with its live category tree.
#[derive(Debug, Clone, Serialize)]
pub struct GrupoCie10ConCategorias {
    #[serde(flatten)]
    pub grupo: GrupoCie10,
    pub categorias_cie10: Vec<CategoriaConSubcategorias>,
}

/// DTO for creating or updating a group. Updates take the full payload,
/// children included; the incoming child set replaces the stored one.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGrupoCie10 {
    #[validate(length(min = 3, max = 250, message = "min:3|max:250"))]
    pub nombre: String,
    #[validate(length(min = 1, message = "required"))]
    pub codigo: String,
    #[serde(default)]
    #[validate(nested)]
    pub categorias_cie10: Vec<CreateCategoriaCie10>,
}

/// Nested category payload inside a group create/update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoriaCie10 {
    #[validate(length(min = 1, message = "required"))]
    pub nombre: String,
    #[validate(length(min = 1, message = "required"))]
    pub codigo: String,
    #[serde(default)]
    #[validate(nested)]
    pub subcategorias_cie10: Vec<CreateSubCategoriaCie10>,
}

/// Nested subcategory payload inside a category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSubCategoriaCie10 {
    #[validate(length(min = 1, message = "required"))]
    pub nombre: String,
    #[validate(length(min = 1, message = "required"))]
    pub codigo: String,
}
