//! Route registration.
//!
//! Route hierarchy (mounted under `/v1`; health lives at root level):
//!
//! ```text
//! /grupos-cie10                       list, create
//! /grupos-cie10/{id}                  get, update, delete
//!
//! /estados-incidencias                list, create
//! /estados-incidencias/{id}           get, update, delete
//! /estados-pacientes                  list, create
//! /estados-pacientes/{id}             get, update, delete
//! /valoraciones-pacientes             list, create
//! /valoraciones-pacientes/{id}        get, update, delete
//! /parentescos                        list, create
//! /parentescos/{id}                   get, update, delete
//!
//! /incidencias                        list, create
//! /incidencias/{id}                   get, update, delete
//! ```

pub mod catalogos;
pub mod grupos_cie10;
pub mod health;
pub mod incidencias;

use axum::Router;
use ugus_db::repositories::CatalogoRepo;

use crate::state::AppState;

/// Build the `/v1` route tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/grupos-cie10", grupos_cie10::router())
        .nest(
            "/estados-incidencias",
            catalogos::router(&CatalogoRepo::ESTADOS_INCIDENCIAS),
        )
        .nest(
            "/estados-pacientes",
            catalogos::router(&CatalogoRepo::ESTADOS_PACIENTES),
        )
        .nest(
            "/valoraciones-pacientes",
            catalogos::router(&CatalogoRepo::VALORACIONES_PACIENTES),
        )
        .nest("/parentescos", catalogos::router(&CatalogoRepo::PARENTESCOS))
        .nest("/incidencias", incidencias::router())
}
