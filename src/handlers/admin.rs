//! Audit trail and system settings.

use chrono::Utc;
use tracing::info;

use crate::auth::Actor;
use crate::database::models::{AuditLog, SettingWrite, SystemSetting};
use crate::error::ApiError;
use crate::schema::UpdateSystemSettingInput;
use crate::state::AppState;

pub async fn get_audit_logs(state: AppState) -> Result<Vec<AuditLog>, ApiError> {
    Ok(state.repos.audit_logs.list_audit_logs().await?)
}

pub async fn get_system_settings(state: AppState) -> Result<Vec<SystemSetting>, ApiError> {
    Ok(state.repos.settings.list_settings().await?)
}

/// Writes a setting by key, creating it on first write. An omitted
/// description keeps the stored one.
pub async fn update_system_setting(
    state: AppState,
    input: UpdateSystemSettingInput,
    updated_by: Actor,
) -> Result<SystemSetting, ApiError> {
    let setting = state
        .repos
        .settings
        .upsert_setting(SettingWrite {
            key: input.key,
            value: input.value,
            description: input.description,
            updated_by: updated_by.id,
            updated_at: Utc::now(),
        })
        .await?;

    info!(key = %setting.key, updated_by = setting.updated_by, "System setting written");
    Ok(setting)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::database::{MemoryStore, Repositories};
    use crate::handlers::test_support;
    use crate::schema::FromPayload;
    use serde_json::json;
    use std::sync::Arc;

    fn write(body: serde_json::Value) -> UpdateSystemSettingInput {
        UpdateSystemSettingInput::from_payload(&body).unwrap()
    }

    #[tokio::test]
    async fn settings_keep_description_unless_supplied() {
        let state = test_support::state();

        let first = update_system_setting(
            state.clone(),
            write(json!({ "key": "site_name", "value": "Portal", "description": "Shown in the header" })),
            test_support::actor(1),
        )
        .await
        .unwrap();
        assert_eq!(first.updated_by, 1);

        let second = update_system_setting(
            state.clone(),
            write(json!({ "key": "site_name", "value": "City Portal" })),
            test_support::actor(2),
        )
        .await
        .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.value, "City Portal");
        assert_eq!(second.description.as_deref(), Some("Shown in the header"));
        assert_eq!(second.updated_by, 2);

        let cleared = update_system_setting(
            state.clone(),
            write(json!({ "key": "site_name", "value": "City Portal", "description": null })),
            test_support::actor(2),
        )
        .await
        .unwrap();
        assert_eq!(cleared.description, None);

        assert_eq!(get_system_settings(state).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn audit_logs_are_listed_newest_first() {
        let now = Utc::now();
        let entry = |id: i32, minutes_ago: i64| AuditLog {
            id,
            user_id: 1,
            action: "UPDATE".to_string(),
            entity_type: "complaint".to_string(),
            entity_id: Some(1),
            old_values: Some("{\"status\":\"PENDING\"}".to_string()),
            new_values: Some("{\"status\":\"VERIFIED\"}".to_string()),
            ip_address: Some("10.0.0.1".to_string()),
            user_agent: None,
            created_at: now - chrono::Duration::minutes(minutes_ago),
        };
        let store = MemoryStore::new().with_audit_logs(vec![entry(1, 30), entry(2, 5)]);
        let state = AppState::new(Repositories::from_store(Arc::new(store)), AppConfig::development());

        let ids: Vec<i32> = get_audit_logs(state).await.unwrap().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
