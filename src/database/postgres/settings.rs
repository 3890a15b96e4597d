use async_trait::async_trait;

use super::{write_error, PgStore};
use crate::database::manager::DatabaseError;
use crate::database::models::{AuditLog, SettingWrite, SystemSetting};
use crate::database::repository::{AuditLogRepository, SystemSettingRepository};

#[async_trait]
impl SystemSettingRepository for PgStore {
    async fn list_settings(&self) -> Result<Vec<SystemSetting>, DatabaseError> {
        Ok(sqlx::query_as::<_, SystemSetting>("SELECT * FROM system_settings ORDER BY key")
            .fetch_all(self.pool())
            .await?)
    }

    async fn upsert_setting(&self, write: SettingWrite) -> Result<SystemSetting, DatabaseError> {
        sqlx::query_as::<_, SystemSetting>(
            "INSERT INTO system_settings (key, value, description, updated_by, updated_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, \
             description = CASE WHEN $6 THEN EXCLUDED.description ELSE system_settings.description END, \
             updated_by = EXCLUDED.updated_by, updated_at = EXCLUDED.updated_at \
             RETURNING *",
        )
        .bind(&write.key)
        .bind(&write.value)
        .bind(write.description.clone().flatten())
        .bind(write.updated_by)
        .bind(write.updated_at)
        .bind(write.description.is_some())
        .fetch_one(self.pool())
        .await
        .map_err(write_error("system setting", "system_settings"))
    }
}

#[async_trait]
impl AuditLogRepository for PgStore {
    async fn list_audit_logs(&self) -> Result<Vec<AuditLog>, DatabaseError> {
        Ok(sqlx::query_as::<_, AuditLog>("SELECT * FROM audit_logs ORDER BY created_at DESC, id DESC")
            .fetch_all(self.pool())
            .await?)
    }
}
