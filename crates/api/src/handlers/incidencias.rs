//! Handlers for the `/incidencias` resource.
//!
//! Incident create is the one genuinely transactional operation in the
//! system: the payload may carry referrals, a responsible party, patients,
//! companions, and movements, all persisted atomically by the repository.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ugus_core::error::CoreError;
use ugus_core::validation;
use ugus_db::models::incidencia::{CreateIncidencia, UpdateIncidencia};
use ugus_db::repositories::IncidenciaRepo;

use crate::error::AppResult;
use crate::query::ListParams;
use crate::response::Envelope;
use crate::state::AppState;

/// GET /v1/incidencias?q=&page=&per_page=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    match params.page {
        Some(page) => {
            let (limit, offset) = ugus_db::page_bounds(page, params.per_page);
            let (rows, total) =
                IncidenciaRepo::list_page(&state.pool, params.q.as_deref(), limit, offset).await?;
            Ok(Json(Envelope::page(rows, page.max(1), limit, total)).into_response())
        }
        None => {
            let rows = IncidenciaRepo::list(&state.pool, params.q.as_deref()).await?;
            Ok(Json(Envelope::ok(rows)).into_response())
        }
    }
}

/// POST /v1/incidencias
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateIncidencia>,
) -> AppResult<Response> {
    validation::check(&input)?;
    let incidencia =
        IncidenciaRepo::create(&state.pool, &state.config.servidor_id, &input).await?;
    let con_detalle = IncidenciaRepo::find_by_id_with_detalle(&state.pool, &incidencia.id)
        .await?
        .expect("just created");
    Ok((StatusCode::CREATED, Json(Envelope::created(con_detalle))).into_response())
}

/// GET /v1/incidencias/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let incidencia = IncidenciaRepo::find_by_id_with_detalle(&state.pool, &id)
        .await?
        .ok_or_else(|| CoreError::not_found("Incidencia", &id))?;
    Ok(Json(Envelope::ok(incidencia)).into_response())
}

/// PUT /v1/incidencias/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateIncidencia>,
) -> AppResult<Response> {
    validation::check(&input)?;
    IncidenciaRepo::update(&state.pool, &state.config.servidor_id, &id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Incidencia", &id))?;
    let con_detalle = IncidenciaRepo::find_by_id_with_detalle(&state.pool, &id)
        .await?
        .expect("just updated");
    Ok(Json(Envelope::ok(con_detalle)).into_response())
}

/// DELETE /v1/incidencias/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let deleted = IncidenciaRepo::soft_delete(&state.pool, &id).await?;
    if deleted {
        Ok(Json(Envelope::ok_empty()).into_response())
    } else {
        Err(CoreError::not_found("Incidencia", &id).into())
    }
}
