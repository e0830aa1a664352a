//! Handlers for the `/grupos-cie10` resource.
//!
//! CIE10 diagnosis groups with their nested category/subcategory tree.
//! Create and update take the full tree; the stored child set is rewritten
//! to match the payload.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ugus_core::error::CoreError;
use ugus_core::types::DbId;
use ugus_core::validation;
use ugus_db::models::grupo_cie10::CreateGrupoCie10;
use ugus_db::repositories::GrupoCie10Repo;

use crate::error::AppResult;
use crate::query::ListParams;
use crate::response::Envelope;
use crate::state::AppState;

/// GET /v1/grupos-cie10?q=&page=&per_page=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    match params.page {
        Some(page) => {
            let (limit, offset) = ugus_db::page_bounds(page, params.per_page);
            let (rows, total) =
                GrupoCie10Repo::list_page(&state.pool, params.q.as_deref(), limit, offset).await?;
            Ok(Json(Envelope::page(rows, page.max(1), limit, total)).into_response())
        }
        None => {
            let rows = GrupoCie10Repo::list(&state.pool, params.q.as_deref()).await?;
            Ok(Json(Envelope::ok(rows)).into_response())
        }
    }
}

/// POST /v1/grupos-cie10
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateGrupoCie10>,
) -> AppResult<Response> {
    validation::check(&input)?;
    let grupo = GrupoCie10Repo::create(&state.pool, &input).await?;
    let con_categorias = GrupoCie10Repo::find_by_id_with_categorias(&state.pool, grupo.id)
        .await?
        .expect("just created");
    Ok((StatusCode::CREATED, Json(Envelope::created(con_categorias))).into_response())
}

/// GET /v1/grupos-cie10/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let grupo = GrupoCie10Repo::find_by_id_with_categorias(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("GrupoCie10", id))?;
    Ok(Json(Envelope::ok(grupo)).into_response())
}

/// PUT /v1/grupos-cie10/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateGrupoCie10>,
) -> AppResult<Response> {
    validation::check(&input)?;
    GrupoCie10Repo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("GrupoCie10", id))?;
    let con_categorias = GrupoCie10Repo::find_by_id_with_categorias(&state.pool, id)
        .await?
        .expect("just updated");
    Ok(Json(Envelope::ok(con_categorias)).into_response())
}

/// DELETE /v1/grupos-cie10/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Response> {
    let deleted = GrupoCie10Repo::soft_delete(&state.pool, id).await?;
    if deleted {
        Ok(Json(Envelope::ok_empty()).into_response())
    } else {
        Err(CoreError::not_found("GrupoCie10", id).into())
    }
}
