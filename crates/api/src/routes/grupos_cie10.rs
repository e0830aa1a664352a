//! Route definitions for the `/grupos-cie10` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::grupos_cie10;
use crate::state::AppState;

/// Routes mounted at `/grupos-cie10`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(grupos_cie10::list).post(grupos_cie10::create))
        .route(
            "/{id}",
            get(grupos_cie10::get_by_id)
                .put(grupos_cie10::update)
                .delete(grupos_cie10::delete),
        )
}
