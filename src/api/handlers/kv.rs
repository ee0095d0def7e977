//! Handlers for the operational key-value store.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use std::time::Duration;

use crate::api::dto::kv::{KvEntryResponse, KvPutParams};
use crate::error::AppError;
use crate::state::AppState;

/// Reads a key.
///
/// # Endpoint
///
/// `GET /kv/{key}`
///
/// # Errors
///
/// - 400 Bad Request for malformed keys
/// - 404 Not Found if the key is absent
/// - 503 Service Unavailable if the backend fails
pub async fn get_kv_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<KvEntryResponse>, AppError> {
    let value = state
        .kv_service
        .get(&key)
        .await?
        .ok_or_else(|| AppError::not_found("Key not found", json!({ "key": key })))?;

    Ok(Json(KvEntryResponse {
        key,
        value,
        ttl_seconds: None,
    }))
}

/// Stores the request body under a key.
///
/// # Endpoint
///
/// `PUT /kv/{key}?ttl_seconds={n}`
///
/// The body is stored as-is (UTF-8 text). Without `ttl_seconds` the entry
/// does not expire.
///
/// # Errors
///
/// - 400 Bad Request for malformed keys, oversized values, or a TTL outside
///   one second to one year
/// - 503 Service Unavailable if the backend fails
pub async fn put_kv_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<KvPutParams>,
    body: String,
) -> Result<Json<KvEntryResponse>, AppError> {
    let ttl = params.ttl_seconds.map(Duration::from_secs);
    state.kv_service.put(&key, &body, ttl).await?;

    Ok(Json(KvEntryResponse {
        key,
        value: body,
        ttl_seconds: params.ttl_seconds,
    }))
}

/// Deletes a key.
///
/// # Endpoint
///
/// `DELETE /kv/{key}`
///
/// Returns 204 No Content, or 404 if the key did not exist.
pub async fn delete_kv_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.kv_service.delete(&key).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Key not found", json!({ "key": key })))
    }
}
