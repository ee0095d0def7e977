//! API route configuration.

use crate::api::handlers::{
    delete_kv_handler, get_kv_handler, health_handler, put_kv_handler, query_handler,
    root_handler, tracking_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Tracking lookup routes.
///
/// # Endpoints
///
/// - `GET /query?sno={sno}`   - Look up by query parameter
/// - `GET /tracking/{sno}`    - Look up by path segment
pub fn tracking_routes() -> Router<AppState> {
    Router::new()
        .route("/query", get(query_handler))
        .route("/tracking/{sno}", get(tracking_handler))
}

/// Operational key-value routes.
///
/// # Endpoints
///
/// - `GET    /kv/{key}` - Read a value
/// - `PUT    /kv/{key}` - Store the request body (optional `ttl_seconds`)
/// - `DELETE /kv/{key}` - Remove a value
pub fn kv_routes() -> Router<AppState> {
    Router::new().route(
        "/kv/{key}",
        get(get_kv_handler)
            .put(put_kv_handler)
            .delete(delete_kv_handler),
    )
}

/// Liveness and health routes.
///
/// # Endpoints
///
/// - `GET /`             - Liveness probe
/// - `GET /health`       - Component health
/// - `GET /healthcheck`  - Alias of `/health`
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/healthcheck", get(health_handler))
}
