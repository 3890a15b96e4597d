use chrono::{TimeDelta, Utc};
use tracing::error;

use crate::database::models::DashboardStats;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_dashboard_stats(state: AppState) -> Result<DashboardStats, ApiError> {
    let days = state.config.dashboard.recent_window_days;
    let recent_since = Some(days)
        .filter(|days| *days > 0)
        .and_then(TimeDelta::try_days)
        .and_then(|window| Utc::now().checked_sub_signed(window))
        .ok_or_else(|| {
            error!(days, "Dashboard recent window is out of range");
            ApiError::internal_server_error("Dashboard window is misconfigured")
        })?;

    let stats = state.repos.dashboard.dashboard_stats(recent_since).await?;
    Ok(stats)
}
