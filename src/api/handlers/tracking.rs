//! Handlers for tracking lookups.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::api::dto::tracking::{TrackingQuery, TrackingResponse};
use crate::application::services::LookupSource;
use crate::error::AppError;
use crate::state::AppState;

/// Response header telling clients whether the cache served the lookup.
pub const CACHE_STATUS_HEADER: HeaderName = HeaderName::from_static("x-cache");

/// Looks up a package by tracking number given in the query string.
///
/// # Endpoint
///
/// `GET /query?sno={tracking_number}`
///
/// # Request Flow
///
/// 1. Validate the tracking number
/// 2. Check cache (key: the tracking number)
/// 3. On cache miss or cache error, assemble the record from the database
/// 4. Write the record back to cache with the configured TTL
///
/// # Response
///
/// ```json
/// {
///   "status": "success",
///   "data": {
///     "sno": "SNO123",
///     "tracking_status": "In Transit",
///     "estimated_delivery": "2024-01-10",
///     "details": [ ... ],
///     "recipient": { ... },
///     "current_location": { ... }
///   }
/// }
/// ```
///
/// The `x-cache` header is `HIT` when served from cache and `MISS` otherwise.
///
/// # Errors
///
/// - 400 Bad Request if `sno` is missing or malformed
/// - 404 Not Found if the tracking number does not exist
/// - 503 Service Unavailable if a database query timed out
/// - 500 Internal Server Error on database failures or a corrupt cache entry
pub async fn query_handler(
    State(state): State<AppState>,
    Query(query): Query<TrackingQuery>,
) -> Result<Response, AppError> {
    lookup(&state, query).await
}

/// Looks up a package by tracking number given in the path.
///
/// # Endpoint
///
/// `GET /tracking/{sno}`
///
/// Behaves exactly like [`query_handler`].
pub async fn tracking_handler(
    State(state): State<AppState>,
    Path(sno): Path<String>,
) -> Result<Response, AppError> {
    lookup(&state, TrackingQuery { sno }).await
}

async fn lookup(state: &AppState, query: TrackingQuery) -> Result<Response, AppError> {
    query.validate()?;

    let result = state.tracking_service.lookup(&query.sno).await?;

    let cache_status = match result.source {
        LookupSource::Cache => HeaderValue::from_static("HIT"),
        LookupSource::Store => HeaderValue::from_static("MISS"),
    };

    Ok((
        [(CACHE_STATUS_HEADER, cache_status)],
        Json(TrackingResponse::success(result.record)),
    )
        .into_response())
}
