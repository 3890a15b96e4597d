use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Metadata for an uploaded file; the bytes live in external storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MediaFile {
    pub id: i32,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub file_path: String,
    pub uploaded_by: i32,
    #[serde(with = "crate::schema::wire::date")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMediaFile {
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub file_path: String,
    pub uploaded_by: i32,
    pub created_at: DateTime<Utc>,
}
