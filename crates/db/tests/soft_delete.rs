//! Integration tests for soft-delete behaviour.
//!
//! Exercises the repository layer against a real database to verify that:
//! - Soft-deleted rows are hidden from `find_by_id` and list queries
//! - Soft-delete is idempotent (second call returns `false`)
//! - The pattern is consistent across catalog and transactional entities

use sqlx::PgPool;
use ugus_db::models::catalogo::CreateCatalogo;
use ugus_db::models::grupo_cie10::CreateGrupoCie10;
use ugus_db::models::incidencia::CreateIncidencia;
use ugus_db::repositories::{CatalogoRepo, GrupoCie10Repo, IncidenciaRepo};

fn new_grupo(nombre: &str, codigo: &str) -> CreateGrupoCie10 {
    CreateGrupoCie10 {
        nombre: nombre.to_string(),
        codigo: codigo.to_string(),
        categorias_cie10: vec![],
    }
}

fn new_incidencia(motivo: &str) -> CreateIncidencia {
    CreateIncidencia {
        id: None,
        motivo_ingreso: motivo.to_string(),
        impresion_diagnostica: "sin datos".to_string(),
        referencias: vec![],
        responsable: vec![],
        paciente: vec![],
        acompaniante: vec![],
        movimientos_incidencias: vec![],
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_soft_delete_hides_from_find_by_id(pool: PgPool) {
    let grupo = GrupoCie10Repo::create(&pool, &new_grupo("Enfermedades infecciosas", "A00-B99"))
        .await
        .unwrap();

    let deleted = GrupoCie10Repo::soft_delete(&pool, grupo.id).await.unwrap();
    assert!(deleted, "soft_delete should return true on first call");

    let found = GrupoCie10Repo::find_by_id(&pool, grupo.id).await.unwrap();
    assert!(found.is_none(), "find_by_id should hide soft-deleted rows");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_soft_delete_hides_from_list(pool: PgPool) {
    let grupo = GrupoCie10Repo::create(&pool, &new_grupo("Neoplasias", "C00-D48"))
        .await
        .unwrap();

    let before = GrupoCie10Repo::list(&pool, None).await.unwrap();
    assert!(before.iter().any(|g| g.id == grupo.id));

    GrupoCie10Repo::soft_delete(&pool, grupo.id).await.unwrap();

    let after = GrupoCie10Repo::list(&pool, None).await.unwrap();
    assert!(!after.iter().any(|g| g.id == grupo.id));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_soft_delete_idempotent_on_already_deleted(pool: PgPool) {
    let grupo = GrupoCie10Repo::create(&pool, &new_grupo("Borrar dos veces", "X00"))
        .await
        .unwrap();

    let first = GrupoCie10Repo::soft_delete(&pool, grupo.id).await.unwrap();
    assert!(first, "first soft_delete should return true");

    let second = GrupoCie10Repo::soft_delete(&pool, grupo.id).await.unwrap();
    assert!(!second, "second soft_delete should return false (already deleted)");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_catalog_soft_delete_hides_row(pool: PgPool) {
    let repo = &CatalogoRepo::PARENTESCOS;
    let row = repo
        .create(
            &pool,
            &CreateCatalogo {
                nombre: "Hermano".to_string(),
                descripcion: None,
            },
        )
        .await
        .unwrap();

    let deleted = repo.soft_delete(&pool, row.id).await.unwrap();
    assert!(deleted);
    assert!(repo.find_by_id(&pool, row.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_deleted_group_name_can_be_reused(pool: PgPool) {
    // The unique index on nombre only covers live rows.
    let grupo = GrupoCie10Repo::create(&pool, &new_grupo("Traumatismos", "S00-T98"))
        .await
        .unwrap();
    GrupoCie10Repo::soft_delete(&pool, grupo.id).await.unwrap();

    let again = GrupoCie10Repo::create(&pool, &new_grupo("Traumatismos", "S00-T98"))
        .await
        .unwrap();
    assert_ne!(again.id, grupo.id);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_soft_delete_incidencia_also_works(pool: PgPool) {
    let incidencia = IncidenciaRepo::create(&pool, "SRV1", &new_incidencia("dolor abdominal"))
        .await
        .unwrap();

    let deleted = IncidenciaRepo::soft_delete(&pool, &incidencia.id)
        .await
        .unwrap();
    assert!(deleted);

    let found = IncidenciaRepo::find_by_id(&pool, &incidencia.id)
        .await
        .unwrap();
    assert!(found.is_none());
}
