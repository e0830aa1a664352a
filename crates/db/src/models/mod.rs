//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - An update DTO where the update shape differs from the create shape
//! - Aggregate structs bundling an entity with its child collections

pub mod catalogo;
pub mod grupo_cie10;
pub mod incidencia;
