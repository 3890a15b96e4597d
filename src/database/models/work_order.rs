use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::schema::{Priority, WorkOrderStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WorkOrder {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub complaint_id: Option<i32>,
    pub assigned_to: Option<i32>,
    pub status: WorkOrderStatus,
    pub priority: Priority,
    pub estimated_cost: Option<Decimal>,
    pub actual_cost: Option<Decimal>,
    #[serde(with = "crate::schema::wire::option_date")]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(with = "crate::schema::wire::option_date")]
    pub completed_date: Option<DateTime<Utc>>,
    pub created_by: i32,
    #[serde(with = "crate::schema::wire::date")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::schema::wire::date")]
    pub updated_at: DateTime<Utc>,
}

/// Status, actual cost and completion date are not part of a new work order;
/// stores write PENDING and nulls.
#[derive(Debug, Clone)]
pub struct NewWorkOrder {
    pub title: String,
    pub description: String,
    pub complaint_id: Option<i32>,
    pub assigned_to: Option<i32>,
    pub priority: Priority,
    pub estimated_cost: Option<Decimal>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}
