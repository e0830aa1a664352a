//! Integration tests for the CIE10 group nested rewrite.
//!
//! The child set (categories, then subcategories) is rewritten on every
//! create/update: prior children are soft-deleted, matching ones are
//! revived in place, new ones are inserted.

use sqlx::PgPool;
use ugus_db::models::grupo_cie10::{
    CreateCategoriaCie10, CreateGrupoCie10, CreateSubCategoriaCie10,
};
use ugus_db::repositories::GrupoCie10Repo;

fn categoria(nombre: &str, codigo: &str, subs: Vec<CreateSubCategoriaCie10>) -> CreateCategoriaCie10 {
    CreateCategoriaCie10 {
        nombre: nombre.to_string(),
        codigo: codigo.to_string(),
        subcategorias_cie10: subs,
    }
}

fn subcategoria(nombre: &str, codigo: &str) -> CreateSubCategoriaCie10 {
    CreateSubCategoriaCie10 {
        nombre: nombre.to_string(),
        codigo: codigo.to_string(),
    }
}

fn grupo(nombre: &str, codigo: &str, categorias: Vec<CreateCategoriaCie10>) -> CreateGrupoCie10 {
    CreateGrupoCie10 {
        nombre: nombre.to_string(),
        codigo: codigo.to_string(),
        categorias_cie10: categorias,
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_with_nested_tree(pool: PgPool) {
    let input = grupo(
        "Enfermedades infecciosas intestinales",
        "A00-A09",
        vec![
            categoria(
                "Colera",
                "A00",
                vec![
                    subcategoria("Colera debido a Vibrio cholerae 01", "A00.0"),
                    subcategoria("Colera no especificado", "A00.9"),
                ],
            ),
            categoria("Fiebres tifoidea y paratifoidea", "A01", vec![]),
        ],
    );

    let created = GrupoCie10Repo::create(&pool, &input).await.unwrap();

    let tree = GrupoCie10Repo::find_by_id_with_categorias(&pool, created.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(tree.categorias_cie10.len(), 2);
    let colera = &tree.categorias_cie10[0];
    assert_eq!(colera.categoria.codigo, "A00");
    assert_eq!(colera.subcategorias_cie10.len(), 2);
    assert_eq!(tree.categorias_cie10[1].subcategorias_cie10.len(), 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_rewrites_category_set(pool: PgPool) {
    let created = GrupoCie10Repo::create(
        &pool,
        &grupo(
            "Grupo de prueba",
            "Z00",
            vec![
                categoria("Mantener", "Z00.1", vec![]),
                categoria("Quitar", "Z00.2", vec![]),
            ],
        ),
    )
    .await
    .unwrap();

    let tree = GrupoCie10Repo::find_by_id_with_categorias(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    let kept_id = tree.categorias_cie10[0].categoria.id;

    // Update: keep one category, drop the other, add a new one.
    GrupoCie10Repo::update(
        &pool,
        created.id,
        &grupo(
            "Grupo de prueba",
            "Z00",
            vec![
                categoria("Mantener", "Z00.1", vec![]),
                categoria("Nueva", "Z00.3", vec![]),
            ],
        ),
    )
    .await
    .unwrap()
    .unwrap();

    let tree = GrupoCie10Repo::find_by_id_with_categorias(&pool, created.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(tree.categorias_cie10.len(), 2);
    let nombres: Vec<_> = tree
        .categorias_cie10
        .iter()
        .map(|c| c.categoria.nombre.as_str())
        .collect();
    assert!(nombres.contains(&"Mantener"));
    assert!(nombres.contains(&"Nueva"));
    assert!(!nombres.contains(&"Quitar"));

    // The matching category was revived, not re-created.
    let revived = tree
        .categorias_cie10
        .iter()
        .find(|c| c.categoria.nombre == "Mantener")
        .unwrap();
    assert_eq!(revived.categoria.id, kept_id);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_missing_group_returns_none(pool: PgPool) {
    let result = GrupoCie10Repo::update(&pool, 999_999, &grupo("Nada", "X99", vec![]))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_subcategories_follow_their_category_rewrite(pool: PgPool) {
    let created = GrupoCie10Repo::create(
        &pool,
        &grupo(
            "Grupo de subcategorias",
            "B00",
            vec![categoria(
                "Herpes",
                "B00",
                vec![
                    subcategoria("Eczema herpetico", "B00.0"),
                    subcategoria("Dermatitis vesicular", "B00.1"),
                ],
            )],
        ),
    )
    .await
    .unwrap();

    // Rewrite the category with a reduced subcategory set.
    GrupoCie10Repo::update(
        &pool,
        created.id,
        &grupo(
            "Grupo de subcategorias",
            "B00",
            vec![categoria(
                "Herpes",
                "B00",
                vec![subcategoria("Eczema herpetico", "B00.0")],
            )],
        ),
    )
    .await
    .unwrap()
    .unwrap();

    let tree = GrupoCie10Repo::find_by_id_with_categorias(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(tree.categorias_cie10.len(), 1);
    assert_eq!(tree.categorias_cie10[0].subcategorias_cie10.len(), 1);
    assert_eq!(
        tree.categorias_cie10[0].subcategorias_cie10[0].codigo,
        "B00.0"
    );
}
