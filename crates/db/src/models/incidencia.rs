//! Incident entity model and DTOs.
//!
//! An incident is the transactional aggregate of this system: one create
//! request may carry referrals, a responsible party, patients, companions,
//! and incident movements, all persisted in a single transaction. Incidents
//! and persons are keyed by the field server that created them (`SyncId`),
//! and every transactional row records its originating `servidor_id`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ugus_core::types::{DbId, SyncId, Timestamp};
use validator::Validate;

/// A row from the `incidencias` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Incidencia {
    pub id: SyncId,
    pub servidor_id: String,
    pub motivo_ingreso: String,
    pub impresion_diagnostica: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// A row from the `referencias` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Referencia {
    pub id: DbId,
    pub servidor_id: String,
    pub incidencias_id: SyncId,
    pub medico_refiere_id: Option<String>,
    pub diagnostico: Option<String>,
    pub clues_origen: Option<String>,
    pub clues_destino: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// A row from the `pacientes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Paciente {
    pub id: DbId,
    pub servidor_id: String,
    pub personas_id: SyncId,
    pub responsables_id: Option<DbId>,
    pub domicilio: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// A row from the `acompaniantes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Acompaniante {
    pub id: DbId,
    pub servidor_id: String,
    pub personas_id: SyncId,
    pub parentescos_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// A row from the `movimientos_incidencias` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovimientoIncidencia {
    pub id: DbId,
    pub servidor_id: String,
    pub incidencias_id: SyncId,
    pub medico_reporta_id: Option<String>,
    pub indicaciones: Option<String>,
    pub reporte_medico: Option<String>,
    pub estados_incidencias_id: Option<DbId>,
    pub valoraciones_pacientes_id: Option<DbId>,
    pub estados_pacientes_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// An incident enriched with its child collections, as returned by `get`.
#[derive(Debug, Clone, Serialize)]
pub struct IncidenciaConDetalle {
    #[serde(flatten)]
    pub incidencia: Incidencia,
    pub referencias: Vec<Referencia>,
    pub pacientes: Vec<Paciente>,
    pub acompaniantes: Vec<Acompaniante>,
    pub movimientos_incidencias: Vec<MovimientoIncidencia>,
}

/// DTO for creating an incident with its nested collections.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateIncidencia {
    /// Field-server id; generated server-side when absent.
    pub id: Option<SyncId>,
    #[validate(length(min = 1, message = "required"))]
    pub motivo_ingreso: String,
    #[validate(length(min = 1, message = "required"))]
    pub impresion_diagnostica: String,
    #[serde(default)]
    pub referencias: Vec<CreateReferencia>,
    #[serde(default)]
    pub responsable: Vec<CreateResponsable>,
    #[serde(default)]
    pub paciente: Vec<CreatePaciente>,
    #[serde(default)]
    pub acompaniante: Vec<CreateAcompaniante>,
    #[serde(default)]
    pub movimientos_incidencias: Vec<CreateMovimientoIncidencia>,
}

/// Referral payload inside an incident create.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReferencia {
    pub medico_refiere_id: Option<String>,
    pub diagnostico: Option<String>,
    pub clues_origen: Option<String>,
    pub clues_destino: Option<String>,
}

/// Responsible-party payload: person fields plus the kinship catalog key.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResponsable {
    pub id: Option<SyncId>,
    pub nombre: String,
    pub paterno: Option<String>,
    pub materno: Option<String>,
    pub telefono: Option<String>,
    pub parentescos_id: Option<DbId>,
}

/// Patient payload: person fields plus address.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaciente {
    pub id: Option<SyncId>,
    pub nombre: String,
    pub paterno: Option<String>,
    pub materno: Option<String>,
    pub fecha_nacimiento: Option<NaiveDate>,
    pub telefono: Option<String>,
    pub domicilio: Option<String>,
}

/// Companion payload: person fields plus the kinship catalog key.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAcompaniante {
    pub id: Option<SyncId>,
    pub nombre: String,
    pub paterno: Option<String>,
    pub materno: Option<String>,
    pub telefono: Option<String>,
    pub parentescos_id: Option<DbId>,
}

/// Movement payload inside an incident create or update.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovimientoIncidencia {
    pub medico_reporta_id: Option<String>,
    pub indicaciones: Option<String>,
    pub reporte_medico: Option<String>,
    pub estados_incidencias_id: Option<DbId>,
    pub valoraciones_pacientes_id: Option<DbId>,
    pub estados_pacientes_id: Option<DbId>,
}

/// DTO for updating an incident's root fields. Movements, if present,
/// are appended to the incident's history; other child collections are
/// create-only.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateIncidencia {
    #[validate(length(min = 1, message = "required"))]
    pub motivo_ingreso: String,
    #[validate(length(min = 1, message = "required"))]
    pub impresion_diagnostica: String,
    #[serde(default)]
    pub movimientos_incidencias: Vec<CreateMovimientoIncidencia>,
}
