use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SystemSetting {
    pub id: i32,
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub updated_by: i32,
    #[serde(with = "crate::schema::wire::date")]
    pub updated_at: DateTime<Utc>,
}

/// Replacement of the row stored under `key`.
#[derive(Debug, Clone)]
pub struct SettingWrite {
    pub key: String,
    pub value: String,
    /// `None` keeps the stored description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    pub updated_by: i32,
    pub updated_at: DateTime<Utc>,
}
