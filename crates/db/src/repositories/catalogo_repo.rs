//! Repository for the simple catalog tables.
//!
//! Four tables share the exact row shape and CRUD contract, so one repo
//! carries the table name as data instead of copying the SQL four times.
//! Each table gets a `const` instance; handlers pick the one they route to.

use sqlx::PgPool;
use ugus_core::types::DbId;

use crate::models::catalogo::{Catalogo, CreateCatalogo, UpdateCatalogo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nombre, descripcion, created_at, updated_at, deleted_at";

/// Provides CRUD operations over one simple catalog table.
pub struct CatalogoRepo {
    table: &'static str,
    /// Entity name used in not-found errors ("EstadoIncidencia", ...).
    entity: &'static str,
}

impl CatalogoRepo {
    pub const ESTADOS_INCIDENCIAS: CatalogoRepo = CatalogoRepo {
        table: "estados_incidencias",
        entity: "EstadoIncidencia",
    };
    pub const ESTADOS_PACIENTES: CatalogoRepo = CatalogoRepo {
        table: "estados_pacientes",
        entity: "EstadoPaciente",
    };
    pub const VALORACIONES_PACIENTES: CatalogoRepo = CatalogoRepo {
        table: "valoraciones_pacientes",
        entity: "ValoracionPaciente",
    };
    pub const PARENTESCOS: CatalogoRepo = CatalogoRepo {
        table: "parentescos",
        entity: "Parentesco",
    };

    /// Entity name for error messages.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Insert a new catalog row, returning the created row.
    pub async fn create(
        &self,
        pool: &PgPool,
        input: &CreateCatalogo,
    ) -> Result<Catalogo, sqlx::Error> {
        let query = format!(
            "INSERT INTO {table} (nombre, descripcion) VALUES ($1, $2) RETURNING {COLUMNS}",
            table = self.table,
        );
        sqlx::query_as::<_, Catalogo>(&query)
            .bind(&input.nombre)
            .bind(&input.descripcion)
            .fetch_one(pool)
            .await
    }

    /// Find a catalog row by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(&self, pool: &PgPool, id: DbId) -> Result<Option<Catalogo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {table} WHERE id = $1 AND deleted_at IS NULL",
            table = self.table,
        );
        sqlx::query_as::<_, Catalogo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List live rows, optionally substring-filtered on id, nombre, or
    /// descripcion.
    pub async fn list(&self, pool: &PgPool, q: Option<&str>) -> Result<Vec<Catalogo>, sqlx::Error> {
        match q {
            Some(q) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM {table} \
                     WHERE deleted_at IS NULL AND (CAST(id AS TEXT) LIKE $1 \
                        OR nombre ILIKE $1 OR descripcion ILIKE $1) \
                     ORDER BY nombre",
                    table = self.table,
                );
                sqlx::query_as::<_, Catalogo>(&query)
                    .bind(format!("%{q}%"))
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM {table} WHERE deleted_at IS NULL ORDER BY nombre",
                    table = self.table,
                );
                sqlx::query_as::<_, Catalogo>(&query).fetch_all(pool).await
            }
        }
    }

    /// Paginated variant of [`list`](Self::list). Returns the page of rows
    /// plus the total count of matching rows.
    pub async fn list_page(
        &self,
        pool: &PgPool,
        q: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Catalogo>, i64), sqlx::Error> {
        let pattern = q.map(|q| format!("%{q}%"));
        let filter = match &pattern {
            Some(_) => {
                "deleted_at IS NULL AND (CAST(id AS TEXT) LIKE $1 \
                 OR nombre ILIKE $1 OR descripcion ILIKE $1)"
            }
            None => "deleted_at IS NULL",
        };

        let count_query = format!("SELECT COUNT(*) FROM {table} WHERE {filter}", table = self.table);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(p) = &pattern {
            count = count.bind(p.clone());
        }
        let total = count.fetch_one(pool).await?;

        let (rows_query, bind_base) = match &pattern {
            Some(_) => (
                format!(
                    "SELECT {COLUMNS} FROM {table} WHERE {filter} \
                     ORDER BY nombre LIMIT $2 OFFSET $3",
                    table = self.table,
                ),
                true,
            ),
            None => (
                format!(
                    "SELECT {COLUMNS} FROM {table} WHERE {filter} \
                     ORDER BY nombre LIMIT $1 OFFSET $2",
                    table = self.table,
                ),
                false,
            ),
        };

        let mut rows = sqlx::query_as::<_, Catalogo>(&rows_query);
        if bind_base {
            rows = rows.bind(pattern.clone().unwrap_or_default());
        }
        let rows = rows.bind(limit).bind(offset).fetch_all(pool).await?;

        Ok((rows, total))
    }

    /// Update a catalog row. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        &self,
        pool: &PgPool,
        id: DbId,
        input: &UpdateCatalogo,
    ) -> Result<Option<Catalogo>, sqlx::Error> {
        let query = format!(
            "UPDATE {table} SET \
                nombre = COALESCE($2, nombre), \
                descripcion = COALESCE($3, descripcion), \
                updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}",
            table = self.table,
        );
        sqlx::query_as::<_, Catalogo>(&query)
            .bind(id)
            .bind(&input.nombre)
            .bind(&input.descripcion)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a catalog row. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(&self, pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE {table} SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
            table = self.table,
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
