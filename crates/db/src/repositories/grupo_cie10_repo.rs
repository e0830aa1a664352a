//! Repository for the `grupos_cie10` table and its category/subcategory
//! children.
//!
//! Children are managed as a set: every create/update soft-deletes the
//! parent's existing children, then each incoming child either revives a
//! soft-deleted row matching on (parent, nombre, codigo), keeping its row
//! identity, or is inserted fresh.

use sqlx::PgPool;
use ugus_core::types::DbId;

use crate::models::grupo_cie10::{
    CategoriaCie10, CategoriaConSubcategorias, CreateCategoriaCie10, CreateGrupoCie10, GrupoCie10,
    GrupoCie10ConCategorias, SubCategoriaCie10,
};

/// Column list for the `grupos_cie10` table.
const COLUMNS: &str = "id, nombre, codigo, created_at, updated_at, deleted_at";

/// Column list for the `categorias_cie10` table.
const CATEGORIA_COLUMNS: &str =
    "id, grupos_cie10_id, nombre, codigo, created_at, updated_at, deleted_at";

/// Column list for the `subcategorias_cie10` table.
const SUBCATEGORIA_COLUMNS: &str =
    "id, categorias_cie10_id, nombre, codigo, created_at, updated_at, deleted_at";

/// Provides CRUD operations for CIE10 groups and their nested children.
pub struct GrupoCie10Repo;

impl GrupoCie10Repo {
    /// Insert a new group and its category tree in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGrupoCie10,
    ) -> Result<GrupoCie10, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO grupos_cie10 (nombre, codigo) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let grupo = sqlx::query_as::<_, GrupoCie10>(&query)
            .bind(&input.nombre)
            .bind(&input.codigo)
            .fetch_one(&mut *tx)
            .await?;

        Self::sync_categorias(&mut tx, grupo.id, &input.categorias_cie10).await?;

        tx.commit().await?;
        Ok(grupo)
    }

    /// Find a group by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GrupoCie10>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM grupos_cie10 WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, GrupoCie10>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a group by ID, enriched with its live category tree.
    pub async fn find_by_id_with_categorias(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GrupoCie10ConCategorias>, sqlx::Error> {
        let Some(grupo) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let query = format!(
            "SELECT {CATEGORIA_COLUMNS} FROM categorias_cie10 \
             WHERE grupos_cie10_id = $1 AND deleted_at IS NULL \
             ORDER BY codigo"
        );
        let categorias = sqlx::query_as::<_, CategoriaCie10>(&query)
            .bind(grupo.id)
            .fetch_all(pool)
            .await?;

        let mut con_subs = Vec::with_capacity(categorias.len());
        for categoria in categorias {
            let query = format!(
                "SELECT {SUBCATEGORIA_COLUMNS} FROM subcategorias_cie10 \
                 WHERE categorias_cie10_id = $1 AND deleted_at IS NULL \
                 ORDER BY codigo"
            );
            let subcategorias = sqlx::query_as::<_, SubCategoriaCie10>(&query)
                .bind(categoria.id)
                .fetch_all(pool)
                .await?;
            con_subs.push(CategoriaConSubcategorias {
                categoria,
                subcategorias_cie10: subcategorias,
            });
        }

        Ok(Some(GrupoCie10ConCategorias {
            grupo,
            categorias_cie10: con_subs,
        }))
    }

    /// List live groups, optionally substring-filtered on id, codigo, or
    /// nombre.
    pub async fn list(pool: &PgPool, q: Option<&str>) -> Result<Vec<GrupoCie10>, sqlx::Error> {
        match q {
            Some(q) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM grupos_cie10 \
                     WHERE deleted_at IS NULL AND (CAST(id AS TEXT) LIKE $1 \
                        OR codigo ILIKE $1 OR nombre ILIKE $1) \
                     ORDER BY codigo"
                );
                sqlx::query_as::<_, GrupoCie10>(&query)
                    .bind(format!("%{q}%"))
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM grupos_cie10 WHERE deleted_at IS NULL ORDER BY codigo"
                );
                sqlx::query_as::<_, GrupoCie10>(&query).fetch_all(pool).await
            }
        }
    }

    /// Paginated variant of [`list`](Self::list) with a total row count.
    pub async fn list_page(
        pool: &PgPool,
        q: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<GrupoCie10>, i64), sqlx::Error> {
        match q {
            Some(q) => {
                let pattern = format!("%{q}%");
                let total = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM grupos_cie10 \
                     WHERE deleted_at IS NULL AND (CAST(id AS TEXT) LIKE $1 \
                        OR codigo ILIKE $1 OR nombre ILIKE $1)",
                )
                .bind(&pattern)
                .fetch_one(pool)
                .await?;

                let query = format!(
                    "SELECT {COLUMNS} FROM grupos_cie10 \
                     WHERE deleted_at IS NULL AND (CAST(id AS TEXT) LIKE $1 \
                        OR codigo ILIKE $1 OR nombre ILIKE $1) \
                     ORDER BY codigo LIMIT $2 OFFSET $3"
                );
                let rows = sqlx::query_as::<_, GrupoCie10>(&query)
                    .bind(&pattern)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await?;
                Ok((rows, total))
            }
            None => {
                let total = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM grupos_cie10 WHERE deleted_at IS NULL",
                )
                .fetch_one(pool)
                .await?;

                let query = format!(
                    "SELECT {COLUMNS} FROM grupos_cie10 WHERE deleted_at IS NULL \
                     ORDER BY codigo LIMIT $1 OFFSET $2"
                );
                let rows = sqlx::query_as::<_, GrupoCie10>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await?;
                Ok((rows, total))
            }
        }
    }

    /// Update a group's root fields and rewrite its category tree, all in
    /// one transaction.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateGrupoCie10,
    ) -> Result<Option<GrupoCie10>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE grupos_cie10 SET nombre = $2, codigo = $3, updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        let grupo = sqlx::query_as::<_, GrupoCie10>(&query)
            .bind(id)
            .bind(&input.nombre)
            .bind(&input.codigo)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(grupo) = grupo else {
            return Ok(None);
        };

        Self::sync_categorias(&mut tx, grupo.id, &input.categorias_cie10).await?;

        tx.commit().await?;
        Ok(Some(grupo))
    }

    /// Soft-delete a group. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE grupos_cie10 SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Replace a group's category set within an existing transaction.
    ///
    /// Soft-deletes every live category of the group, then revives or
    /// inserts each incoming one and recurses into its subcategories.
    async fn sync_categorias(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        grupo_id: DbId,
        categorias: &[CreateCategoriaCie10],
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE categorias_cie10 SET deleted_at = now() \
             WHERE grupos_cie10_id = $1 AND deleted_at IS NULL",
        )
        .bind(grupo_id)
        .execute(&mut **tx)
        .await?;

        for categoria in categorias {
            // Revive a matching row (deleted just above, or long ago) before
            // falling back to a fresh insert.
            let revived = sqlx::query_scalar::<_, DbId>(
                "UPDATE categorias_cie10 SET deleted_at = NULL, updated_at = now() \
                 WHERE grupos_cie10_id = $1 AND nombre = $2 AND codigo = $3 \
                 RETURNING id",
            )
            .bind(grupo_id)
            .bind(&categoria.nombre)
            .bind(&categoria.codigo)
            .fetch_optional(&mut **tx)
            .await?;

            let categoria_id = match revived {
                Some(id) => id,
                None => {
                    sqlx::query_scalar::<_, DbId>(
                        "INSERT INTO categorias_cie10 (grupos_cie10_id, nombre, codigo) \
                         VALUES ($1, $2, $3) RETURNING id",
                    )
                    .bind(grupo_id)
                    .bind(&categoria.nombre)
                    .bind(&categoria.codigo)
                    .fetch_one(&mut **tx)
                    .await?
                }
            };

            Self::sync_subcategorias(tx, categoria_id, categoria).await?;
        }

        Ok(())
    }

    /// Same rewrite pattern, one level down.
    async fn sync_subcategorias(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        categoria_id: DbId,
        categoria: &CreateCategoriaCie10,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE subcategorias_cie10 SET deleted_at = now() \
             WHERE categorias_cie10_id = $1 AND deleted_at IS NULL",
        )
        .bind(categoria_id)
        .execute(&mut **tx)
        .await?;

        for sub in &categoria.subcategorias_cie10 {
            let revived = sqlx::query_scalar::<_, DbId>(
                "UPDATE subcategorias_cie10 SET deleted_at = NULL, updated_at = now() \
                 WHERE categorias_cie10_id = $1 AND nombre = $2 AND codigo = $3 \
                 RETURNING id",
            )
            .bind(categoria_id)
            .bind(&sub.nombre)
            .bind(&sub.codigo)
            .fetch_optional(&mut **tx)
            .await?;

            if revived.is_none() {
                sqlx::query(
                    "INSERT INTO subcategorias_cie10 (categorias_cie10_id, nombre, codigo) \
                     VALUES ($1, $2, $3)",
                )
                .bind(categoria_id)
                .bind(&sub.nombre)
                .bind(&sub.codigo)
                .execute(&mut **tx)
                .await?;
            }
        }

        Ok(())
    }
}
