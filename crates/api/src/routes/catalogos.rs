//! Route definitions for the simple catalog resources.
//!
//! One builder serves all four catalogs; the closures capture the table's
//! `const` repo and forward to the shared handlers.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use ugus_core::types::DbId;
use ugus_db::models::catalogo::{CreateCatalogo, UpdateCatalogo};
use ugus_db::repositories::CatalogoRepo;

use crate::handlers::catalogos;
use crate::query::ListParams;
use crate::state::AppState;

/// Routes for one simple catalog table.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router(repo: &'static CatalogoRepo) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(move |State(state): State<AppState>, Query(params): Query<ListParams>| {
                catalogos::list(repo, state, params)
            })
            .post(
                move |State(state): State<AppState>, Json(input): Json<CreateCatalogo>| {
                    catalogos::create(repo, state, input)
                },
            ),
        )
        .route(
            "/{id}",
            get(move |State(state): State<AppState>, Path(id): Path<DbId>| {
                catalogos::get_by_id(repo, state, id)
            })
            .put(
                move |State(state): State<AppState>,
                      Path(id): Path<DbId>,
                      Json(input): Json<UpdateCatalogo>| {
                    catalogos::update(repo, state, id, input)
                },
            )
            .delete(move |State(state): State<AppState>, Path(id): Path<DbId>| {
                catalogos::delete(repo, state, id)
            }),
        )
}
