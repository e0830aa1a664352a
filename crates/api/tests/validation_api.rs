//! HTTP-level tests for request validation and malformed-payload handling.
//!
//! Validation failures return 409 with a per-field `errors` array in the
//! envelope; payloads the JSON extractor cannot read are rejected before
//! any handler runs.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Field-level validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_short_nombre_returns_409_with_field_errors(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/v1/parentescos", json!({"nombre": "ab"})).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["status"], 409);
    assert_eq!(body["messages"], "Conflicto");
    assert_eq!(body["errors"][0]["field"], "nombre");
    assert_eq!(body["errors"][0]["messages"][0], "min:3|max:250");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_violations_cover_every_bad_field(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/v1/grupos-cie10",
        json!({"nombre": "ab", "codigo": ""}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;

    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    // Violations are sorted by field name.
    assert_eq!(errors[0]["field"], "codigo");
    assert_eq!(errors[0]["messages"][0], "required");
    assert_eq!(errors[1]["field"], "nombre");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_nested_child_violations_reach_the_errors_array(pool: PgPool) {
    // Parent fields are valid; the only broken field sits inside a
    // nested category.
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/v1/grupos-cie10",
        json!({
            "nombre": "Ciertas enfermedades infecciosas",
            "codigo": "A00-B99",
            "categorias_cie10": [
                {"nombre": "Colera", "codigo": "A00"},
                {"nombre": "Fiebre tifoidea", "codigo": ""}
            ]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;

    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "categorias_cie10[1].codigo");
    assert_eq!(errors[0]["messages"][0], "required");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_payload_is_validated_too(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let created = body_json(
        post_json(app, "/v1/parentescos", json!({"nombre": "Madre"})).await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = build_test_app(pool);
    let response = put_json(
        app,
        &format!("/v1/parentescos/{id}"),
        json!({"nombre": "ab"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_failed_validation_persists_nothing(pool: PgPool) {
    let app = build_test_app(pool.clone());
    post_json(app, "/v1/parentescos", json!({"nombre": "ab"})).await;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM parentescos")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

// ---------------------------------------------------------------------------
// Payloads the extractor rejects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_syntactically_broken_json_returns_400(pool: PgPool) {
    let app = build_test_app(pool);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/parentescos")
        .header("content-type", "application/json")
        .body(Body::from("{\"nombre\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_wrong_field_type_returns_422(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/v1/parentescos", json!({"nombre": 42})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_missing_content_type_returns_415(pool: PgPool) {
    let app = build_test_app(pool);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/parentescos")
        .body(Body::from("{\"nombre\": \"Madre\"}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_unknown_fields_are_ignored(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/v1/parentescos",
        json!({"nombre": "Madre", "inventado": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
