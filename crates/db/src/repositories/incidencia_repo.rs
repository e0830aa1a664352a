//! Repository for the `incidencias` aggregate.
//!
//! Create persists the incident root plus every supplied child collection
//! (referrals, responsible party, patients, companions, movements) and the
//! two junction tables in a single transaction: either the whole aggregate
//! lands or none of it does.

use sqlx::{PgPool, Postgres, Transaction};
use ugus_core::types::DbId;

use crate::models::incidencia::{
    Acompaniante, CreateIncidencia, CreateMovimientoIncidencia, Incidencia, IncidenciaConDetalle,
    MovimientoIncidencia, Paciente, Referencia, UpdateIncidencia,
};

/// Column list for the `incidencias` table.
const COLUMNS: &str =
    "id, servidor_id, motivo_ingreso, impresion_diagnostica, created_at, updated_at, deleted_at";

const REFERENCIA_COLUMNS: &str = "id, servidor_id, incidencias_id, medico_refiere_id, \
    diagnostico, clues_origen, clues_destino, created_at, updated_at, deleted_at";

const PACIENTE_COLUMNS: &str = "id, servidor_id, personas_id, responsables_id, domicilio, \
    created_at, updated_at, deleted_at";

const ACOMPANIANTE_COLUMNS: &str =
    "id, servidor_id, personas_id, parentescos_id, created_at, updated_at, deleted_at";

const MOVIMIENTO_COLUMNS: &str = "id, servidor_id, incidencias_id, medico_reporta_id, \
    indicaciones, reporte_medico, estados_incidencias_id, valoraciones_pacientes_id, \
    estados_pacientes_id, created_at, updated_at, deleted_at";

/// Provides transactional CRUD for incidents and their child collections.
pub struct IncidenciaRepo;

impl IncidenciaRepo {
    /// Persist an incident aggregate in one transaction.
    ///
    /// `servidor_id` is the audit stamp of this server, applied to every
    /// row written here. A missing incident id gets a fresh UUIDv4.
    pub async fn create(
        pool: &PgPool,
        servidor_id: &str,
        input: &CreateIncidencia,
    ) -> Result<Incidencia, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id = input
            .id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let query = format!(
            "INSERT INTO incidencias (id, servidor_id, motivo_ingreso, impresion_diagnostica) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        );
        let incidencia = sqlx::query_as::<_, Incidencia>(&query)
            .bind(&id)
            .bind(servidor_id)
            .bind(&input.motivo_ingreso)
            .bind(&input.impresion_diagnostica)
            .fetch_one(&mut *tx)
            .await?;

        for referencia in &input.referencias {
            sqlx::query(
                "INSERT INTO referencias (servidor_id, incidencias_id, medico_refiere_id, \
                    diagnostico, clues_origen, clues_destino) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(servidor_id)
            .bind(&id)
            .bind(&referencia.medico_refiere_id)
            .bind(&referencia.diagnostico)
            .bind(&referencia.clues_origen)
            .bind(&referencia.clues_destino)
            .execute(&mut *tx)
            .await?;

            if let Some(clues) = &referencia.clues_origen {
                sqlx::query("INSERT INTO incidencia_clue (incidencias_id, clues) VALUES ($1, $2)")
                    .bind(&id)
                    .bind(clues)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        let mut last_responsable_id: Option<DbId> = None;
        for responsable in &input.responsable {
            let persona_id = Self::upsert_persona(
                &mut tx,
                servidor_id,
                responsable.id.as_deref(),
                &responsable.nombre,
                responsable.paterno.as_deref(),
                responsable.materno.as_deref(),
                None,
                responsable.telefono.as_deref(),
            )
            .await?;

            let responsable_id = sqlx::query_scalar::<_, DbId>(
                "INSERT INTO responsables (servidor_id, personas_id, parentescos_id) \
                 VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(servidor_id)
            .bind(&persona_id)
            .bind(responsable.parentescos_id)
            .fetch_one(&mut *tx)
            .await?;
            last_responsable_id = Some(responsable_id);
        }

        let mut last_paciente_id: Option<DbId> = None;
        for paciente in &input.paciente {
            let persona_id = Self::upsert_persona(
                &mut tx,
                servidor_id,
                paciente.id.as_deref(),
                &paciente.nombre,
                paciente.paterno.as_deref(),
                paciente.materno.as_deref(),
                paciente.fecha_nacimiento,
                paciente.telefono.as_deref(),
            )
            .await?;

            let paciente_id = sqlx::query_scalar::<_, DbId>(
                "INSERT INTO pacientes (servidor_id, personas_id, responsables_id, domicilio) \
                 VALUES ($1, $2, $3, $4) RETURNING id",
            )
            .bind(servidor_id)
            .bind(&persona_id)
            .bind(last_responsable_id)
            .bind(&paciente.domicilio)
            .fetch_one(&mut *tx)
            .await?;
            last_paciente_id = Some(paciente_id);
        }

        for acompaniante in &input.acompaniante {
            let persona_id = Self::upsert_persona(
                &mut tx,
                servidor_id,
                acompaniante.id.as_deref(),
                &acompaniante.nombre,
                acompaniante.paterno.as_deref(),
                acompaniante.materno.as_deref(),
                None,
                acompaniante.telefono.as_deref(),
            )
            .await?;

            let acompaniante_id = sqlx::query_scalar::<_, DbId>(
                "INSERT INTO acompaniantes (servidor_id, personas_id, parentescos_id) \
                 VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(servidor_id)
            .bind(&persona_id)
            .bind(acompaniante.parentescos_id)
            .fetch_one(&mut *tx)
            .await?;

            // A companion only makes sense attached to a patient ticket.
            if let Some(paciente_id) = last_paciente_id {
                sqlx::query(
                    "INSERT INTO paciente_ticket (incidencias_id, pacientes_id, acompaniantes_id) \
                     VALUES ($1, $2, $3)",
                )
                .bind(&id)
                .bind(paciente_id)
                .bind(acompaniante_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        for movimiento in &input.movimientos_incidencias {
            Self::insert_movimiento(&mut tx, servidor_id, &id, movimiento).await?;
        }

        tx.commit().await?;
        Ok(incidencia)
    }

    /// Find an incident by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Incidencia>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM incidencias WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Incidencia>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an incident by ID, enriched with its child collections.
    pub async fn find_by_id_with_detalle(
        pool: &PgPool,
        id: &str,
    ) -> Result<Option<IncidenciaConDetalle>, sqlx::Error> {
        let Some(incidencia) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let query = format!(
            "SELECT {REFERENCIA_COLUMNS} FROM referencias \
             WHERE incidencias_id = $1 AND deleted_at IS NULL ORDER BY id"
        );
        let referencias = sqlx::query_as::<_, Referencia>(&query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        let query = format!(
            "SELECT DISTINCT p.{cols} FROM pacientes p \
             JOIN paciente_ticket pt ON pt.pacientes_id = p.id \
             WHERE pt.incidencias_id = $1 AND p.deleted_at IS NULL ORDER BY p.id",
            cols = PACIENTE_COLUMNS.replace(", ", ", p."),
        );
        let pacientes = sqlx::query_as::<_, Paciente>(&query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        let query = format!(
            "SELECT DISTINCT a.{cols} FROM acompaniantes a \
             JOIN paciente_ticket pt ON pt.acompaniantes_id = a.id \
             WHERE pt.incidencias_id = $1 AND a.deleted_at IS NULL ORDER BY a.id",
            cols = ACOMPANIANTE_COLUMNS.replace(", ", ", a."),
        );
        let acompaniantes = sqlx::query_as::<_, Acompaniante>(&query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        let query = format!(
            "SELECT {MOVIMIENTO_COLUMNS} FROM movimientos_incidencias \
             WHERE incidencias_id = $1 AND deleted_at IS NULL ORDER BY id"
        );
        let movimientos = sqlx::query_as::<_, MovimientoIncidencia>(&query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        Ok(Some(IncidenciaConDetalle {
            incidencia,
            referencias,
            pacientes,
            acompaniantes,
            movimientos_incidencias: movimientos,
        }))
    }

    /// List live incidents, optionally substring-filtered on id or
    /// motivo_ingreso.
    pub async fn list(pool: &PgPool, q: Option<&str>) -> Result<Vec<Incidencia>, sqlx::Error> {
        match q {
            Some(q) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM incidencias \
                     WHERE deleted_at IS NULL AND (id ILIKE $1 OR motivo_ingreso ILIKE $1) \
                     ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, Incidencia>(&query)
                    .bind(format!("%{q}%"))
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM incidencias WHERE deleted_at IS NULL \
                     ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, Incidencia>(&query).fetch_all(pool).await
            }
        }
    }

    /// Paginated variant of [`list`](Self::list) with a total row count.
    pub async fn list_page(
        pool: &PgPool,
        q: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Incidencia>, i64), sqlx::Error> {
        match q {
            Some(q) => {
                let pattern = format!("%{q}%");
                let total = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM incidencias \
                     WHERE deleted_at IS NULL AND (id ILIKE $1 OR motivo_ingreso ILIKE $1)",
                )
                .bind(&pattern)
                .fetch_one(pool)
                .await?;

                let query = format!(
                    "SELECT {COLUMNS} FROM incidencias \
                     WHERE deleted_at IS NULL AND (id ILIKE $1 OR motivo_ingreso ILIKE $1) \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3"
                );
                let rows = sqlx::query_as::<_, Incidencia>(&query)
                    .bind(&pattern)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await?;
                Ok((rows, total))
            }
            None => {
                let total = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM incidencias WHERE deleted_at IS NULL",
                )
                .fetch_one(pool)
                .await?;

                let query = format!(
                    "SELECT {COLUMNS} FROM incidencias WHERE deleted_at IS NULL \
                     ORDER BY created_at DESC LIMIT $1 OFFSET $2"
                );
                let rows = sqlx::query_as::<_, Incidencia>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await?;
                Ok((rows, total))
            }
        }
    }

    /// Update an incident's root fields and append any supplied movements,
    /// in one transaction.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        servidor_id: &str,
        id: &str,
        input: &UpdateIncidencia,
    ) -> Result<Option<Incidencia>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE incidencias SET motivo_ingreso = $2, impresion_diagnostica = $3, \
                updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        let incidencia = sqlx::query_as::<_, Incidencia>(&query)
            .bind(id)
            .bind(&input.motivo_ingreso)
            .bind(&input.impresion_diagnostica)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(incidencia) = incidencia else {
            return Ok(None);
        };

        for movimiento in &input.movimientos_incidencias {
            Self::insert_movimiento(&mut tx, servidor_id, id, movimiento).await?;
        }

        tx.commit().await?;
        Ok(Some(incidencia))
    }

    /// Soft-delete an incident. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE incidencias SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Insert or refresh a `personas` row.
    ///
    /// Persons are client-keyed and recur across incidents (the same
    /// relative may appear as responsible party one week and companion the
    /// next), so an existing id refreshes the demographic fields instead of
    /// failing.
    #[allow(clippy::too_many_arguments)]
    async fn upsert_persona(
        tx: &mut Transaction<'_, Postgres>,
        servidor_id: &str,
        id: Option<&str>,
        nombre: &str,
        paterno: Option<&str>,
        materno: Option<&str>,
        fecha_nacimiento: Option<chrono::NaiveDate>,
        telefono: Option<&str>,
    ) -> Result<String, sqlx::Error> {
        let id = id
            .map(str::to_owned)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        sqlx::query(
            "INSERT INTO personas (id, servidor_id, nombre, paterno, materno, \
                fecha_nacimiento, telefono) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (id) DO UPDATE SET \
                nombre = EXCLUDED.nombre, \
                paterno = EXCLUDED.paterno, \
                materno = EXCLUDED.materno, \
                fecha_nacimiento = COALESCE(EXCLUDED.fecha_nacimiento, personas.fecha_nacimiento), \
                telefono = EXCLUDED.telefono, \
                updated_at = now()",
        )
        .bind(&id)
        .bind(servidor_id)
        .bind(nombre)
        .bind(paterno)
        .bind(materno)
        .bind(fecha_nacimiento)
        .bind(telefono)
        .execute(&mut **tx)
        .await?;

        Ok(id)
    }

    async fn insert_movimiento(
        tx: &mut Transaction<'_, Postgres>,
        servidor_id: &str,
        incidencia_id: &str,
        movimiento: &CreateMovimientoIncidencia,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO movimientos_incidencias (servidor_id, incidencias_id, \
                medico_reporta_id, indicaciones, reporte_medico, estados_incidencias_id, \
                valoraciones_pacientes_id, estados_pacientes_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(servidor_id)
        .bind(incidencia_id)
        .bind(&movimiento.medico_reporta_id)
        .bind(&movimiento.indicaciones)
        .bind(&movimiento.reporte_medico)
        .bind(movimiento.estados_incidencias_id)
        .bind(movimiento.valoraciones_pacientes_id)
        .bind(movimiento.estados_pacientes_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
