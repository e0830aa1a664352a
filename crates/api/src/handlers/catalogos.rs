//! Shared handlers for the simple catalog resources.
//!
//! `estados-incidencias`, `estados-pacientes`, `valoraciones-pacientes`,
//! and `parentescos` expose the same contract over identically-shaped
//! tables, so one handler set takes the target [`CatalogoRepo`] as an
//! argument; the route layer wires each table's `const` repo in.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ugus_core::error::CoreError;
use ugus_core::types::DbId;
use ugus_core::validation;
use ugus_db::models::catalogo::{CreateCatalogo, UpdateCatalogo};
use ugus_db::repositories::CatalogoRepo;

use crate::error::AppResult;
use crate::query::ListParams;
use crate::response::Envelope;
use crate::state::AppState;

pub async fn list(
    repo: &'static CatalogoRepo,
    state: AppState,
    params: ListParams,
) -> AppResult<Response> {
    match params.page {
        Some(page) => {
            let (limit, offset) = ugus_db::page_bounds(page, params.per_page);
            let (rows, total) = repo
                .list_page(&state.pool, params.q.as_deref(), limit, offset)
                .await?;
            Ok(Json(Envelope::page(rows, page.max(1), limit, total)).into_response())
        }
        None => {
            let rows = repo.list(&state.pool, params.q.as_deref()).await?;
            Ok(Json(Envelope::ok(rows)).into_response())
        }
    }
}

pub async fn create(
    repo: &'static CatalogoRepo,
    state: AppState,
    input: CreateCatalogo,
) -> AppResult<Response> {
    validation::check(&input)?;
    let row = repo.create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(Envelope::created(row))).into_response())
}

pub async fn get_by_id(
    repo: &'static CatalogoRepo,
    state: AppState,
    id: DbId,
) -> AppResult<Response> {
    let row = repo
        .find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found(repo.entity(), id))?;
    Ok(Json(Envelope::ok(row)).into_response())
}

pub async fn update(
    repo: &'static CatalogoRepo,
    state: AppState,
    id: DbId,
    input: UpdateCatalogo,
) -> AppResult<Response> {
    validation::check(&input)?;
    let row = repo
        .update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found(repo.entity(), id))?;
    Ok(Json(Envelope::ok(row)).into_response())
}

pub async fn delete(
    repo: &'static CatalogoRepo,
    state: AppState,
    id: DbId,
) -> AppResult<Response> {
    let deleted = repo.soft_delete(&state.pool, id).await?;
    if deleted {
        Ok(Json(Envelope::ok_empty()).into_response())
    } else {
        Err(CoreError::not_found(repo.entity(), id).into())
    }
}
