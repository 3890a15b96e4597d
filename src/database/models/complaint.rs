use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::schema::{ComplaintStatus, Priority};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Complaint {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub citizen_name: String,
    pub citizen_email: String,
    pub citizen_phone: Option<String>,
    pub address: String,
    pub status: ComplaintStatus,
    pub priority: Priority,
    pub assigned_to: Option<i32>,
    #[serde(with = "crate::schema::wire::date")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::schema::wire::date")]
    pub updated_at: DateTime<Utc>,
    #[serde(with = "crate::schema::wire::option_date")]
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub citizen_name: String,
    pub citizen_email: String,
    pub citizen_phone: Option<String>,
    pub address: String,
    pub status: ComplaintStatus,
    pub priority: Priority,
    pub assigned_to: Option<i32>,
    pub created_at: DateTime<Utc>,
}
