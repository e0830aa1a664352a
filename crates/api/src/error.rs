use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use ugus_core::error::CoreError;

use crate::response::{MSG_CONFLICT, MSG_INTERNAL, MSG_NOT_FOUND};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the project's JSON error envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `ugus_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, messages, errors) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, MSG_NOT_FOUND, None),
                CoreError::Validation(violations) => (
                    StatusCode::CONFLICT,
                    MSG_CONFLICT,
                    Some(json!(violations)),
                ),
                CoreError::Conflict(msg) => (
                    StatusCode::CONFLICT,
                    MSG_CONFLICT,
                    Some(json!([{ "field": null, "messages": [msg] }])),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL, None)
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL, None)
            }
        };

        let mut body = json!({
            "status": status.as_u16(),
            "messages": messages,
        });
        if let Some(errors) = errors {
            body["errors"] = errors;
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, envelope message, and
/// optional field errors.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`)
///   map to 409; this is how catalog name uniqueness surfaces.
/// - Everything else maps to 500 with a sanitized message. The raw error
///   goes to the log only, never to the client.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, Option<serde_json::Value>) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, MSG_NOT_FOUND, None),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        MSG_CONFLICT,
                        Some(json!([{
                            "field": constraint,
                            "messages": ["unique"],
                        }])),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL, None)
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL, None)
        }
    }
}
