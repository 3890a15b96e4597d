use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::schema::InfrastructureStatus;

/// Technical condition assessment filed by a staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InfrastructureReport {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub coordinates: Option<String>,
    pub status: InfrastructureStatus,
    pub maintenance_required: bool,
    pub estimated_cost: Option<Decimal>,
    pub reported_by: i32,
    #[serde(with = "crate::schema::wire::date")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::schema::wire::date")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewInfrastructureReport {
    pub title: String,
    pub description: String,
    pub location: String,
    pub coordinates: Option<String>,
    pub status: InfrastructureStatus,
    pub maintenance_required: bool,
    pub estimated_cost: Option<Decimal>,
    pub reported_by: i32,
    pub created_at: DateTime<Utc>,
}
