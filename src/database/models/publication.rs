use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::schema::{PublicationStatus, PublicationType};

/// News item, announcement or event notice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Publication {
    pub id: i32,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: PublicationType,
    pub status: PublicationStatus,
    pub featured: bool,
    pub author_id: i32,
    #[serde(with = "crate::schema::wire::option_date")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(with = "crate::schema::wire::date")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::schema::wire::date")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPublication {
    pub title: String,
    pub content: String,
    pub kind: PublicationType,
    pub status: PublicationStatus,
    pub featured: bool,
    pub author_id: i32,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
