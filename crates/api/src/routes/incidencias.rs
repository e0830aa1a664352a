//! Route definitions for the `/incidencias` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::incidencias;
use crate::state::AppState;

/// Routes mounted at `/incidencias`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create (transactional aggregate)
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(incidencias::list).post(incidencias::create))
        .route(
            "/{id}",
            get(incidencias::get_by_id)
                .put(incidencias::update)
                .delete(incidencias::delete),
        )
}
