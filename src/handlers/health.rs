use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    #[serde(with = "crate::schema::wire::date")]
    pub timestamp: DateTime<Utc>,
}

/// Liveness of the procedure surface itself; storage is checked by `/health`.
pub async fn healthcheck(_state: AppState) -> Result<HealthStatus, ApiError> {
    Ok(HealthStatus {
        status: "ok",
        timestamp: Utc::now(),
    })
}
