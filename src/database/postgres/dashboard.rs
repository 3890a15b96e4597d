use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::PgStore;
use crate::database::manager::DatabaseError;
use crate::database::models::DashboardStats;
use crate::database::repository::DashboardRepository;

/// One round trip; every counter is read from the live tables.
const DASHBOARD_STATS_SQL: &str = r#"
SELECT
    (SELECT COUNT(*) FROM complaints) AS total_complaints,
    (SELECT COUNT(*) FROM complaints WHERE status = 'PENDING') AS pending_complaints,
    (SELECT COUNT(*) FROM complaints WHERE status IN ('RESOLVED', 'CLOSED')) AS resolved_complaints,
    (SELECT COUNT(*) FROM work_orders) AS total_work_orders,
    (SELECT COUNT(*) FROM work_orders WHERE status IN ('PENDING', 'ASSIGNED', 'IN_PROGRESS')) AS active_work_orders,
    (SELECT COUNT(*) FROM work_orders WHERE status = 'COMPLETED') AS completed_work_orders,
    (SELECT COUNT(*) FROM housing_units) AS total_housing_units,
    (SELECT COUNT(*) FROM housing_units WHERE occupancy_status = 'OCCUPIED') AS occupied_units,
    (SELECT COUNT(*) FROM housing_units WHERE occupancy_status = 'VACANT') AS vacant_units,
    (SELECT COUNT(*) FROM users) AS total_users,
    (SELECT COUNT(*) FROM users WHERE is_active) AS active_users,
    (SELECT COUNT(*) FROM complaints WHERE created_at >= $1) AS recent_complaints,
    (SELECT COUNT(*) FROM infrastructure_reports WHERE created_at >= $1) AS recent_reports
"#;

#[async_trait]
impl DashboardRepository for PgStore {
    async fn dashboard_stats(&self, recent_since: DateTime<Utc>) -> Result<DashboardStats, DatabaseError> {
        Ok(sqlx::query_as::<_, DashboardStats>(DASHBOARD_STATS_SQL)
            .bind(recent_since)
            .fetch_one(self.pool())
            .await?)
    }
}
