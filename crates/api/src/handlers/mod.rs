//! Request handlers.
//!
//! Each submodule provides async handler functions (list, create,
//! get_by_id, update, delete) for one resource. Handlers delegate to the
//! corresponding repository in `ugus_db` and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod catalogos;
pub mod grupos_cie10;
pub mod incidencias;
