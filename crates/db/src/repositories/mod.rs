//! Repository structs. All SQL lives here; handlers never touch sqlx.

pub mod catalogo_repo;
pub mod grupo_cie10_repo;
pub mod incidencia_repo;

pub use catalogo_repo::CatalogoRepo;
pub use grupo_cie10_repo::GrupoCie10Repo;
pub use incidencia_repo::IncidenciaRepo;
