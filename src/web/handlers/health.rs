//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::state::AppState;
use crate::web::dto::health::{CacheCheck, CheckStatus, HealthChecks, HealthResponse};

/// Returns front-end health with dependency checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: The shortening service answered
/// - **503 Service Unavailable**: The shortening service is unreachable or failing
///
/// The mapping list cache is reported but never makes the front-end
/// unhealthy: stale data is still served.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "service": { "status": "ok", "message": "12 mappings" },
///     "cache": { "status": "fresh", "mappings": 12 }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let service_check = match state.gateway.list_mappings().await {
        Ok(mappings) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("{} mappings", mappings.len())),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(e.to_string()),
        },
    };

    let snapshot = state.cache.snapshot();
    let cache_check = CacheCheck {
        status: snapshot.status(),
        mappings: snapshot.mappings.len(),
        last_error: snapshot.error.as_ref().map(ToString::to_string),
    };

    let healthy = service_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            service: service_check,
            cache: cache_check,
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
