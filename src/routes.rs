//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`                  - Liveness probe
//! - `GET  /health`            - Health check: DB and cache
//! - `GET  /query?sno=...`     - Tracking lookup
//! - `GET  /tracking/{sno}`    - Tracking lookup
//! - `/kv/{key}`               - Operational key-value entries
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::middleware::tracing;
use crate::api::routes::{health_routes, kv_routes, tracking_routes};
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(health_routes())
        .merge(tracking_routes())
        .merge(kv_routes())
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
