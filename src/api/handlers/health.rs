//! Handlers for liveness and health check endpoints.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tokio::time::timeout;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::infrastructure::cache::NullCache;
use crate::state::AppState;

/// Liveness probe.
///
/// `GET /` always returns `{"status": "ok"}`.
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health` (also mounted at `/healthcheck`)
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: Runs `SELECT 1` within the query timeout
/// 2. **Cache**: Tests backend PING within the cache timeout
///
/// When caching is disabled the cache check reports `"cache disabled"` and
/// still counts as ok: lookups are then served from the database alone.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" },
///     "cache": { "status": "ok", "message": "redis connected" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;

    let cache_check = check_cache(&state).await;

    let all_healthy = db_check.is_ok() && cache_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks database connectivity.
async fn check_database(state: &AppState) -> CheckStatus {
    let limit = state.settings.query_timeout;

    match timeout(limit, state.repository.ping()).await {
        Ok(Ok(())) => CheckStatus::ok("Connected"),
        Ok(Err(e)) => CheckStatus::error(format!("Database error: {}", e)),
        Err(_) => CheckStatus::error(format!("Database ping timed out after {:?}", limit)),
    }
}

/// Checks cache connectivity via the backend's health probe.
async fn check_cache(state: &AppState) -> CheckStatus {
    let backend = state.cache.backend();
    if backend == NullCache::BACKEND {
        return CheckStatus::ok("cache disabled");
    }

    let limit = state.settings.cache_timeout;

    match timeout(limit, state.cache.health_check()).await {
        Ok(true) => CheckStatus::ok(format!("{} connected", backend)),
        Ok(false) => CheckStatus::error(format!("{} connection failed", backend)),
        Err(_) => CheckStatus::error(format!("{} ping timed out after {:?}", backend, limit)),
    }
}
