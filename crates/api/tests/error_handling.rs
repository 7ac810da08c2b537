//! Tests for `AppError` -> HTTP response mapping.
//!
//! These tests call `IntoResponse` directly on `AppError` values and check
//! the status code and the envelope fields. No HTTP server is involved.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use matstock_api::error::AppError;
use matstock_core::error::CoreError;
use matstock_core::validation::ValidationErrors;
use matstock_db::StoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Material",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["error_code"], "NOT_FOUND");
    assert_eq!(json["message"], "Material with id 42 not found");
    assert_eq!(json["details"]["id"], 42);
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 422 with per-field details
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_422_with_fields() {
    let mut errors = ValidationErrors::single("quantity", "must not be negative");
    errors.add("unit", "must not be empty");
    let err = AppError::Core(CoreError::Validation(errors));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error_code"], "VALIDATION_ERROR");
    assert_eq!(json["details"]["errors"][0]["field"], "quantity");
    assert_eq!(json["details"]["errors"][0]["message"], "must not be negative");
    assert_eq!(json["details"]["errors"][1]["field"], "unit");
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to the same 422 envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_returns_422() {
    let err = AppError::BadRequest {
        field: "body",
        message: "expected value at line 1 column 1".into(),
    };

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error_code"], "VALIDATION_ERROR");
    assert_eq!(json["details"]["errors"][0]["field"], "body");
}

// ---------------------------------------------------------------------------
// Test: storage failures map to 500 and do not leak paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_error_returns_500_and_sanitizes_message() {
    let err = AppError::Store(StoreError::Io {
        path: PathBuf::from("/srv/secret/inventory.json"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error_code"], "INTERNAL_SERVER_ERROR");
    assert_eq!(json["message"], "Internal server error");
    assert!(json.get("details").is_none());
    assert!(
        !json.to_string().contains("secret"),
        "Storage error response must not leak file paths"
    );
}
