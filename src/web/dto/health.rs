//! DTOs for health check endpoint.

use serde::Serialize;

use crate::application::CacheStatus;

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Health status for each dependency of the front-end.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub service: CheckStatus,
    pub cache: CacheCheck,
}

/// Individual component health status.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// State of the mapping list cache.
#[derive(Debug, Serialize)]
pub struct CacheCheck {
    pub status: CacheStatus,
    pub mappings: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}
