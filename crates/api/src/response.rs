//! Shared response envelope types for API handlers.
//!
//! All API responses use the `{ "status": .., "messages": .., "data": .. }`
//! envelope the field clients expect. Use [`Envelope`] instead of ad-hoc
//! `serde_json::json!` so serialization stays consistent.

use serde::Serialize;

/// Messages carried in the envelope. Spanish on purpose: these reach the
/// end-user clients of the health system unchanged.
pub const MSG_OK: &str = "Operación realizada con exito";
pub const MSG_CREATED: &str = "Creado";
pub const MSG_NOT_FOUND: &str = "No se encontro el registro";
pub const MSG_CONFLICT: &str = "Conflicto";
pub const MSG_INTERNAL: &str = "Error interno del servidor";

/// Standard response envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: u16,
    pub messages: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Pagination block attached to paginated list responses.
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

impl<T: Serialize> Envelope<T> {
    /// 200 envelope with a payload.
    pub fn ok(data: T) -> Self {
        Envelope {
            status: 200,
            messages: MSG_OK,
            data: Some(data),
            pagination: None,
        }
    }

    /// 201 envelope with the created aggregate.
    pub fn created(data: T) -> Self {
        Envelope {
            status: 201,
            messages: MSG_CREATED,
            data: Some(data),
            pagination: None,
        }
    }

    /// 200 envelope for a paginated list.
    pub fn page(data: T, page: i64, per_page: i64, total: i64) -> Self {
        Envelope {
            status: 200,
            messages: MSG_OK,
            data: Some(data),
            pagination: Some(Pagination {
                page,
                per_page,
                total,
            }),
        }
    }
}

impl Envelope<()> {
    /// 200 envelope with no payload (e.g. after a delete).
    pub fn ok_empty() -> Self {
        Envelope {
            status: 200,
            messages: MSG_OK,
            data: None,
            pagination: None,
        }
    }
}
