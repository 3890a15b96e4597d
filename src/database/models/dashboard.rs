use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Headline counters for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DashboardStats {
    pub total_complaints: i64,
    pub pending_complaints: i64,
    pub resolved_complaints: i64,
    pub total_work_orders: i64,
    pub active_work_orders: i64,
    pub completed_work_orders: i64,
    pub total_housing_units: i64,
    pub occupied_units: i64,
    pub vacant_units: i64,
    pub total_users: i64,
    pub active_users: i64,
    pub recent_complaints: i64,
    pub recent_reports: i64,
}
